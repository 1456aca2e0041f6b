//! Hardware abstraction traits for digital I/O and time.
//!
//! This module defines the narrow hardware interface every component in
//! rs-sketchbook is written against, so the same logic runs on an ESP32
//! and inside desktop tests.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`DigitalIo`] | Pin mode configuration, digital reads and writes |
//! | [`Clock`] | Microsecond/millisecond time source |
//!
//! Blocking delays are taken from [`embedded_hal::delay::DelayNs`].
//!
//! # Implementation
//!
//! For testing and desktop development, use [`crate::hal::mock::MockBoard`]
//! (requires `std`). For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::traits::{DigitalIo, PinMode};
//! use rs_sketchbook::hal::MockBoard;
//!
//! let mut board = MockBoard::new();
//! board.configure_pin_mode(13, PinMode::Output).unwrap();
//! board.write_digital(13, true).unwrap();
//!
//! assert!(board.read_digital(13));
//! ```

/// Electrical mode of a GPIO pin.
///
/// # Default
///
/// Defaults to [`Input`](Self::Input), the reset state of most MCUs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PinMode {
    /// Floating input.
    #[default]
    Input,
    /// Input with the internal pull-up resistor enabled.
    ///
    /// The attached switch has to pull the line to ground when active,
    /// so an idle line reads high.
    InputPullUp,
    /// Push-pull output.
    Output,
}

impl PinMode {
    /// Input mode matching a pull-up preference.
    ///
    /// ```
    /// use rs_sketchbook::traits::PinMode;
    ///
    /// assert_eq!(PinMode::input(true), PinMode::InputPullUp);
    /// assert_eq!(PinMode::input(false), PinMode::Input);
    /// ```
    #[inline]
    pub const fn input(pull_up: bool) -> Self {
        if pull_up {
            PinMode::InputPullUp
        } else {
            PinMode::Input
        }
    }

    /// Returns true for both input modes.
    #[inline]
    pub const fn is_input(&self) -> bool {
        matches!(self, PinMode::Input | PinMode::InputPullUp)
    }
}

/// Digital GPIO access by pin number.
///
/// Pins are addressed by their board number, the way Arduino sketches do.
/// Reading the current electrical level is assumed to be infallible;
/// configuration and writes may fail on real hardware.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_sketchbook::traits::{DigitalIo, PinMode};
///
/// struct MyBoard { /* register handles */ }
///
/// impl DigitalIo for MyBoard {
///     type Error = ();
///
///     fn configure_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), ()> {
///         // Program direction and pull registers...
///         Ok(())
///     }
///
///     fn read_digital(&self, pin: u8) -> bool {
///         // Read input register bit...
///         false
///     }
///
///     fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), ()> {
///         // Set or clear output register bit...
///         Ok(())
///     }
/// }
/// ```
pub trait DigitalIo {
    /// Error type for configuration and writes.
    type Error;

    /// Configure the electrical mode of a pin.
    fn configure_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Read the current level of a pin (`true` = high).
    fn read_digital(&self, pin: u8) -> bool;

    /// Drive an output pin high or low.
    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), Self::Error>;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides time since an arbitrary epoch. Implementations may wrap around;
/// every consumer in this crate compares timestamps with wrapping
/// subtraction.
///
/// # Example
///
/// ```rust
/// use rs_sketchbook::traits::Clock;
/// use rs_sketchbook::hal::MockClock;
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_micros(), 0);
///
/// clock.advance_ms(2);
/// assert_eq!(clock.now_micros(), 2_000);
/// assert_eq!(clock.now_millis(), 2);
/// ```
pub trait Clock {
    /// Returns current time in microseconds.
    fn now_micros(&self) -> u64;

    /// Returns current time in milliseconds.
    ///
    /// Derived from [`now_micros`](Self::now_micros) by default.
    fn now_millis(&self) -> u64 {
        self.now_micros() / 1_000
    }
}

impl<T: DigitalIo + ?Sized> DigitalIo for &mut T {
    type Error = T::Error;

    fn configure_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        (**self).configure_pin_mode(pin, mode)
    }

    fn read_digital(&self, pin: u8) -> bool {
        (**self).read_digital(pin)
    }

    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), Self::Error> {
        (**self).write_digital(pin, high)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }

    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }

    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}
