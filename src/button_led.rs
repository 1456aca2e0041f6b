//! Two debounced buttons switching one LED.
//!
//! Pressing the "on" button lights the LED, pressing the "off" button turns
//! it dark again. Without a press the LED keeps its last state. Only the
//! press edge counts, so holding a button does nothing further.
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::{ButtonLed, Config};
//! use rs_sketchbook::hal::MockBoard;
//!
//! let config = Config::default();
//! let mut board = MockBoard::new();
//! let mut sketch = ButtonLed::new(&config);
//! sketch.initialize(&mut board).unwrap();
//!
//! // Press the "on" button and hold it past the debounce time
//! board.set_input(config.button_led.on_button, false);
//! sketch.poll(&mut board).unwrap();
//! board.clock.advance_ms(101);
//! assert_eq!(sketch.poll(&mut board).unwrap(), Some(true));
//! assert!(sketch.is_on());
//! ```

use crate::config::Config;
use crate::debounce::DebouncedInput;
use crate::traits::{Clock, DigitalIo, PinMode};

/// LED controlled by an on button and an off button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonLed {
    on_button: DebouncedInput,
    off_button: DebouncedInput,
    led_pin: u8,
    led_on: bool,
}

impl ButtonLed {
    /// Build the sketch from configuration. Does not touch hardware.
    ///
    /// Both buttons share the debounce settings of `config.button`.
    pub fn new(config: &Config) -> Self {
        let pins = &config.button_led;
        let button = &config.button;
        Self {
            on_button: DebouncedInput::new(pins.on_button, button.pull_up, button.hold_ms),
            off_button: DebouncedInput::new(pins.off_button, button.pull_up, button.hold_ms),
            led_pin: pins.led,
            led_on: false,
        }
    }

    /// Configure both buttons and switch the LED off.
    ///
    /// # Errors
    ///
    /// Returns the HAL error if any pin cannot be configured.
    pub fn initialize<H>(&mut self, hw: &mut H) -> Result<(), H::Error>
    where
        H: DigitalIo + Clock,
    {
        self.on_button.initialize(hw)?;
        self.off_button.initialize(hw)?;
        hw.configure_pin_mode(self.led_pin, PinMode::Output)?;
        hw.write_digital(self.led_pin, false)?;
        self.led_on = false;
        Ok(())
    }

    /// Poll both buttons and update the LED.
    ///
    /// Returns the new LED level when it changed. If both buttons are
    /// accepted in the same poll the LED ends up off.
    ///
    /// # Errors
    ///
    /// Returns the HAL error if the LED cannot be driven.
    pub fn poll<H>(&mut self, hw: &mut H) -> Result<Option<bool>, H::Error>
    where
        H: DigitalIo + Clock,
    {
        self.on_button.poll(hw);
        self.off_button.poll(hw);

        let mut target = self.led_on;
        if self.on_button.activated() {
            target = true;
        }
        if self.off_button.activated() {
            target = false;
        }

        if target == self.led_on {
            return Ok(None);
        }
        hw.write_digital(self.led_pin, target)?;
        self.led_on = target;
        log::info!("led {}", if target { "on" } else { "off" });
        Ok(Some(target))
    }

    /// Level currently driven on the LED.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.led_on
    }
}
