//! Numbered GPIO access for ESP32 through the ESP-IDF GPIO driver.
//!
//! The sketches address pins by number, so this board talks to the raw
//! `gpio_*` driver functions instead of typed `PinDriver`s. Ownership of
//! the [`Pins`] peripheral is taken on construction so nothing else can
//! drive the same GPIOs.

use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::Pins;
use esp_idf_hal::sys::{self, esp, EspError};

use super::Esp32Clock;
use crate::traits::{Clock, DigitalIo, PinMode};

/// ESP32 board implementing [`DigitalIo`], [`Clock`] and [`DelayNs`].
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::peripherals::Peripherals;
/// use rs_sketchbook::hal::esp32::Esp32Board;
/// use rs_sketchbook::traits::{DigitalIo, PinMode};
///
/// let peripherals = Peripherals::take()?;
/// let mut board = Esp32Board::new(peripherals.pins);
///
/// board.configure_pin_mode(8, PinMode::Output)?;
/// board.write_digital(8, true)?;
/// ```
pub struct Esp32Board {
    clock: Esp32Clock,
    _pins: Pins,
}

impl Esp32Board {
    /// Take ownership of the GPIO peripheral.
    pub fn new(pins: Pins) -> Self {
        Self {
            clock: Esp32Clock::new(),
            _pins: pins,
        }
    }
}

impl DigitalIo for Esp32Board {
    type Error = EspError;

    fn configure_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), EspError> {
        let gpio = sys::gpio_num_t::from(pin);
        // Safe: the board owns all pins, the driver validates the number
        unsafe {
            esp!(sys::gpio_reset_pin(gpio))?;
            match mode {
                PinMode::Input => {
                    esp!(sys::gpio_set_direction(gpio, sys::gpio_mode_t_GPIO_MODE_INPUT))?;
                    esp!(sys::gpio_set_pull_mode(gpio, sys::gpio_pull_mode_t_GPIO_FLOATING))
                }
                PinMode::InputPullUp => {
                    esp!(sys::gpio_set_direction(gpio, sys::gpio_mode_t_GPIO_MODE_INPUT))?;
                    esp!(sys::gpio_set_pull_mode(
                        gpio,
                        sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY
                    ))
                }
                PinMode::Output => {
                    // input stays enabled so the driven level can be read back
                    esp!(sys::gpio_set_direction(
                        gpio,
                        sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT
                    ))
                }
            }
        }
    }

    fn read_digital(&self, pin: u8) -> bool {
        // Safe: level read has no side effects
        unsafe { sys::gpio_get_level(sys::gpio_num_t::from(pin)) != 0 }
    }

    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), EspError> {
        // Safe: the board owns all pins
        unsafe { esp!(sys::gpio_set_level(sys::gpio_num_t::from(pin), u32::from(high))) }
    }
}

impl Clock for Esp32Board {
    #[inline]
    fn now_micros(&self) -> u64 {
        self.clock.now_micros()
    }
}

impl DelayNs for Esp32Board {
    fn delay_ns(&mut self, ns: u32) {
        Ets::delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        Ets::delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        // yields to other FreeRTOS tasks
        FreeRtos::delay_ms(ms);
    }
}
