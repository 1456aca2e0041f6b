//! Non-blocking blinker for a group of output pins.
//!
//! All pins are switched together every `interval_ms`. Unlike the classic
//! `delay(1000)` sketch, [`Blink::poll`] returns immediately so it can share
//! a loop with other pollers.
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::Blink;
//! use rs_sketchbook::hal::MockBoard;
//!
//! let mut board = MockBoard::new();
//! let mut blink = Blink::new(&[2, 3], 500);
//! blink.initialize(&mut board).unwrap();
//!
//! assert_eq!(blink.poll(&mut board).unwrap(), None);
//! board.clock.advance_ms(500);
//! assert_eq!(blink.poll(&mut board).unwrap(), Some(true));
//! ```

use crate::config::{pin_list, BlinkConfig, PinList};
use crate::traits::{Clock, DigitalIo, PinMode};

/// Toggles a set of pins at a fixed interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blink {
    pins: PinList,
    interval_ms: u64,
    level: bool,
    last_toggle_ms: u64,
}

impl Blink {
    /// Create a blinker. Pins beyond the list capacity are ignored.
    pub fn new(pins: &[u8], interval_ms: u64) -> Self {
        Self {
            pins: pin_list(pins),
            interval_ms,
            level: false,
            last_toggle_ms: 0,
        }
    }

    /// Create a blinker from configuration.
    pub fn from_config(config: &BlinkConfig) -> Self {
        Self::new(&config.pins, config.interval_ms)
    }

    /// Configure all pins as outputs and drive them low.
    ///
    /// # Errors
    ///
    /// Returns the first HAL error; remaining pins are left untouched.
    pub fn initialize<H>(&mut self, hw: &mut H) -> Result<(), H::Error>
    where
        H: DigitalIo + Clock,
    {
        for &pin in &self.pins {
            hw.configure_pin_mode(pin, PinMode::Output)?;
            hw.write_digital(pin, false)?;
        }
        self.level = false;
        self.last_toggle_ms = hw.now_millis();
        Ok(())
    }

    /// Toggle the pins if the interval has elapsed.
    ///
    /// Returns the new level when a toggle happened.
    ///
    /// # Errors
    ///
    /// Returns the first HAL error from writing a pin.
    pub fn poll<H>(&mut self, hw: &mut H) -> Result<Option<bool>, H::Error>
    where
        H: DigitalIo + Clock,
    {
        let now_ms = hw.now_millis();
        if now_ms.wrapping_sub(self.last_toggle_ms) < self.interval_ms {
            return Ok(None);
        }

        self.level = !self.level;
        self.last_toggle_ms = now_ms;
        log::debug!("blink {}", if self.level { "on" } else { "off" });
        for &pin in &self.pins {
            hw.write_digital(pin, self.level)?;
        }
        Ok(Some(self.level))
    }

    /// Level currently driven on the pins.
    #[inline]
    pub fn level(&self) -> bool {
        self.level
    }

    /// Pins driven by this blinker.
    #[inline]
    pub fn pins(&self) -> &[u8] {
        &self.pins
    }
}
