//! Time-based debouncing of a polled digital input.
//!
//! [`DebouncedInput`] turns a bouncing switch contact into a clean boolean.
//! A raw transition is only accepted once the signal has stayed unchanged
//! for longer than the configured hold time; anything shorter is treated as
//! a glitch and never reaches the caller.
//!
//! # Polling Contract
//!
//! The filter samples the pin only when [`DebouncedInput::poll`] is called,
//! so it must be polled on every control-loop iteration. Polling rarely
//! lets bounces slip between samples.
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::DebouncedInput;
//!
//! let mut input = DebouncedInput::new(2, false, 50);
//! input.seed(false, 0);
//!
//! // A 20ms glitch is ignored
//! assert!(!input.update(true, 0));
//! assert!(!input.update(false, 20));
//! assert!(!input.update(false, 100));
//!
//! // A held press is accepted once it outlasts the hold time
//! assert!(!input.update(true, 200));
//! assert!(!input.update(true, 250));
//! assert!(input.update(true, 251));
//! ```

use crate::traits::{Clock, DigitalIo, PinMode};

/// Debounced digital input.
///
/// The returned value is the electrical level, not the logical switch
/// state: with the internal pull-up enabled a closed switch reads `false`.
/// Use [`is_active`](Self::is_active) for the logical state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebouncedInput {
    pin: u8,
    use_pull_up: bool,
    hold_ms: u64,
    last_change_ms: u64,
    raw_value: bool,
    stable_value: bool,
    changed: bool,
}

impl DebouncedInput {
    /// Create an input filter. Does not touch the hardware.
    ///
    /// # Arguments
    ///
    /// * `pin` - GPIO number of the input
    /// * `use_pull_up` - enable the internal pull-up on [`initialize`](Self::initialize)
    /// * `hold_ms` - how long the raw signal must stay unchanged before it is accepted
    pub const fn new(pin: u8, use_pull_up: bool, hold_ms: u64) -> Self {
        Self {
            pin,
            use_pull_up,
            hold_ms,
            last_change_ms: 0,
            raw_value: false,
            stable_value: false,
            changed: false,
        }
    }

    /// Configure the pin and seed the filter with one reading.
    ///
    /// Must be called once before the first [`poll`](Self::poll). Seeding
    /// avoids reporting a spurious transition on the first poll.
    ///
    /// # Errors
    ///
    /// Returns the HAL error if the pin mode cannot be configured.
    pub fn initialize<H>(&mut self, hw: &mut H) -> Result<(), H::Error>
    where
        H: DigitalIo + Clock,
    {
        hw.configure_pin_mode(self.pin, PinMode::input(self.use_pull_up))?;
        let now_ms = hw.now_millis();
        let level = hw.read_digital(self.pin);
        self.seed(level, now_ms);
        Ok(())
    }

    /// Seed raw and stable values without touching hardware.
    pub fn seed(&mut self, level: bool, now_ms: u64) {
        self.raw_value = level;
        self.stable_value = level;
        self.last_change_ms = now_ms;
        self.changed = false;
    }

    /// Sample the pin and return the debounced level.
    ///
    /// Call this on every loop iteration.
    pub fn poll<H>(&mut self, hw: &H) -> bool
    where
        H: DigitalIo + Clock,
    {
        let now_ms = hw.now_millis();
        let level = hw.read_digital(self.pin);
        self.update(level, now_ms)
    }

    /// Feed one raw sample taken at `now_ms` and return the debounced level.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> bool {
        let previous = self.stable_value;

        if raw != self.raw_value {
            self.raw_value = raw;
            self.last_change_ms = now_ms;
        } else if now_ms.wrapping_sub(self.last_change_ms) > self.hold_ms {
            self.stable_value = self.raw_value;
        }

        self.changed = self.stable_value != previous;
        if self.changed {
            log::debug!("pin {} settled {}", self.pin, self.stable_value);
        }
        self.stable_value
    }

    /// Last debounced level.
    #[inline]
    pub fn value(&self) -> bool {
        self.stable_value
    }

    /// Last raw sample, possibly still bouncing.
    #[inline]
    pub fn raw(&self) -> bool {
        self.raw_value
    }

    /// Logical switch state: `true` when the switch is closed.
    ///
    /// With the pull-up enabled the switch pulls the line low, so the
    /// debounced level is inverted; without it the level is returned as is.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.stable_value != self.use_pull_up
    }

    /// True if the most recent update changed the debounced level.
    #[inline]
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// True if the most recent update made the input logically active.
    #[inline]
    pub fn activated(&self) -> bool {
        self.changed && self.is_active()
    }

    /// GPIO number of the input.
    #[inline]
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Whether the internal pull-up is requested.
    #[inline]
    pub fn use_pull_up(&self) -> bool {
        self.use_pull_up
    }

    /// Configured hold time in milliseconds.
    #[inline]
    pub fn hold_ms(&self) -> u64 {
        self.hold_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(level: bool, hold_ms: u64) -> DebouncedInput {
        let mut input = DebouncedInput::new(4, false, hold_ms);
        input.seed(level, 0);
        input
    }

    #[test]
    fn new_does_not_report_change() {
        let input = DebouncedInput::new(4, true, 30);
        assert_eq!(input.pin(), 4);
        assert!(input.use_pull_up());
        assert_eq!(input.hold_ms(), 30);
        assert!(!input.changed());
    }

    #[test]
    fn seed_sets_raw_and_stable() {
        let input = seeded(true, 50);
        assert!(input.value());
        assert!(input.raw());
    }

    #[test]
    fn steady_signal_is_reported() {
        let mut input = seeded(false, 50);
        for t in 0..200 {
            assert!(!input.update(false, t));
        }
    }

    #[test]
    fn short_glitch_is_suppressed() {
        let mut input = seeded(false, 50);
        assert!(!input.update(true, 0));
        assert!(!input.update(true, 10));
        assert!(!input.update(false, 20));
        for t in 21..500 {
            assert!(!input.update(false, t));
        }
    }

    #[test]
    fn transition_accepted_after_hold_time() {
        let mut input = seeded(false, 50);
        assert!(!input.update(true, 100));
        assert!(!input.update(true, 150)); // exactly hold_ms is not enough
        assert!(input.update(true, 151));
        assert!(input.changed());
        assert!(input.update(true, 152));
        assert!(!input.changed());
    }

    #[test]
    fn each_raw_flip_restarts_the_hold_window() {
        let mut input = seeded(false, 50);
        input.update(true, 0);
        input.update(false, 40);
        input.update(true, 80);
        assert!(!input.update(true, 120));
        assert!(input.update(true, 131));
    }

    #[test]
    fn release_is_debounced_too() {
        let mut input = seeded(true, 20);
        assert!(input.update(false, 0));
        assert!(input.update(true, 5));
        assert!(input.update(false, 10));
        assert!(input.update(false, 30));
        assert!(!input.update(false, 31));
    }

    #[test]
    fn zero_hold_accepts_on_next_later_sample() {
        let mut input = seeded(false, 0);
        assert!(!input.update(true, 10));
        assert!(!input.update(true, 10));
        assert!(input.update(true, 11));
    }

    #[test]
    fn clock_wraparound_is_tolerated() {
        let mut input = DebouncedInput::new(4, false, 50);
        input.seed(false, u64::MAX - 10);
        input.update(true, u64::MAX - 10);
        assert!(!input.update(true, 30));
        assert!(input.update(true, 40));
    }

    #[test]
    fn is_active_respects_pull_up() {
        let mut pulled_up = DebouncedInput::new(4, true, 10);
        pulled_up.seed(true, 0);
        assert!(!pulled_up.is_active());
        pulled_up.update(false, 0);
        pulled_up.update(false, 11);
        assert!(pulled_up.is_active());
        assert!(pulled_up.activated());

        let mut plain = DebouncedInput::new(4, false, 10);
        plain.seed(true, 0);
        assert!(plain.is_active());
    }
}
