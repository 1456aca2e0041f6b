//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a physical board.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockClock`] | [`Clock`], [`DelayNs`] | Controllable time source |
//! | [`MockBoard`] | [`DigitalIo`], [`Clock`], [`DelayNs`] | Scriptable pins with simulated time |
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::DebouncedInput;
//! use rs_sketchbook::hal::MockBoard;
//!
//! let mut board = MockBoard::new();
//! board.set_input(2, false);
//!
//! let mut button = DebouncedInput::new(2, false, 50);
//! button.initialize(&mut board).unwrap();
//!
//! // Raw signal goes high and stays there
//! board.set_input(2, true);
//! assert!(!button.poll(&board));
//!
//! board.clock.advance_ms(51);
//! assert!(button.poll(&board));
//! ```
//!
//! [`Clock`]: crate::traits::Clock
//! [`DigitalIo`]: crate::traits::DigitalIo

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use embedded_hal::delay::DelayNs;

use crate::distance::MICROS_PER_CM;
use crate::traits::{Clock, DigitalIo, PinMode};

// ============================================================================
// Clock Mock
// ============================================================================

/// Mock clock for testing.
///
/// Time only moves when told to. Interior mutability lets a
/// [`MockBoard`] advance it from `&self` reads.
///
/// # Example
///
/// ```rust
/// use rs_sketchbook::hal::MockClock;
/// use rs_sketchbook::traits::Clock;
///
/// let clock = MockClock::new();
/// clock.set_ms(100);
/// assert_eq!(clock.now_millis(), 100);
///
/// clock.advance_us(500);
/// assert_eq!(clock.now_micros(), 100_500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    now_us: Cell<u64>,
}

impl MockClock {
    /// Creates a new mock clock starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock clock starting at the given microsecond timestamp.
    pub fn starting_at_us(us: u64) -> Self {
        Self {
            now_us: Cell::new(us),
        }
    }

    /// Set the current time in microseconds.
    pub fn set_us(&self, us: u64) {
        self.now_us.set(us);
    }

    /// Set the current time in milliseconds.
    pub fn set_ms(&self, ms: u64) {
        self.now_us.set(ms * 1_000);
    }

    /// Advance time by the given number of microseconds (wrapping).
    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get().wrapping_add(us));
    }

    /// Advance time by the given number of milliseconds (wrapping).
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1_000);
    }
}

impl Clock for MockClock {
    fn now_micros(&self) -> u64 {
        self.now_us.get()
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance_us(u64::from(ns).div_ceil(1_000));
    }
}

// ============================================================================
// Board Mock
// ============================================================================

/// Simulated state of a single pin.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MockPin {
    /// Last configured mode.
    pub mode: PinMode,
    /// Number of times the mode was configured.
    pub configure_count: usize,
    /// Levels written through [`DigitalIo::write_digital`], in order.
    pub writes: Vec<bool>,
    /// Number of digital reads.
    pub read_count: usize,
    /// Timeline of level changes as `(at_us, level)`, sorted by time.
    events: Vec<(u64, bool)>,
}

impl MockPin {
    fn push_event(&mut self, at_us: u64, level: bool) {
        // later insertions win ties
        let idx = self.events.partition_point(|(t, _)| *t <= at_us);
        self.events.insert(idx, (at_us, level));
    }

    fn level_at(&self, now_us: u64) -> bool {
        let idx = self.events.partition_point(|(t, _)| *t <= now_us);
        match idx.checked_sub(1) {
            Some(i) => self.events[i].1,
            None => self.mode == PinMode::InputPullUp,
        }
    }
}

/// How a simulated ultrasonic sensor answers a trigger pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EchoResponse {
    /// Echo rises `delay_us` after the trigger falls and stays high for `pulse_us`.
    Pulse {
        /// Time from trigger falling edge to echo rising edge.
        delay_us: u64,
        /// Width of the echo pulse.
        pulse_us: u64,
    },
    /// Echo rises and never falls again.
    Stuck {
        /// Time from trigger falling edge to echo rising edge.
        delay_us: u64,
    },
    /// Echo never rises.
    Silent,
}

#[derive(Clone, Copy, Debug)]
struct EchoSim {
    trigger: u8,
    echo: u8,
    response: EchoResponse,
}

/// Error returned by [`MockBoard`] for pins marked as failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockPinError(pub u8);

impl core::fmt::Display for MockPinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "pin {} failed", self.0)
    }
}

impl std::error::Error for MockPinError {}

/// Mock board with scriptable pins and simulated time.
///
/// Inputs are driven either immediately ([`set_input`](Self::set_input))
/// or at a given instant ([`schedule`](Self::schedule)). Every read costs
/// a configurable number of microseconds so busy-wait loops make progress.
/// Never-driven pins read low, except pull-up inputs, which idle high.
///
/// # Example
///
/// ```rust
/// use rs_sketchbook::hal::MockBoard;
/// use rs_sketchbook::traits::DigitalIo;
///
/// let board = MockBoard::new().with_read_cost_us(0);
/// board.schedule(4, 1_000, true);
///
/// assert!(!board.read_digital(4));
/// board.clock.set_us(1_000);
/// assert!(board.read_digital(4));
/// ```
#[derive(Debug)]
pub struct MockBoard {
    /// Simulated time source shared by all pins.
    pub clock: MockClock,
    pins: RefCell<BTreeMap<u8, MockPin>>,
    read_cost_us: u64,
    echo: Option<EchoSim>,
    failing_pin: Option<u8>,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self {
            clock: MockClock::new(),
            pins: RefCell::new(BTreeMap::new()),
            read_cost_us: 1,
            echo: None,
            failing_pin: None,
        }
    }
}

impl MockBoard {
    /// Creates a new mock board at time 0 with a 1µs read cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how far the clock advances on every digital read.
    pub fn with_read_cost_us(mut self, us: u64) -> Self {
        self.read_cost_us = us;
        self
    }

    /// Makes every configure/write on `pin` fail.
    pub fn with_failing_pin(mut self, pin: u8) -> Self {
        self.failing_pin = Some(pin);
        self
    }

    /// Drive an input pin to `level` from now on.
    pub fn set_input(&self, pin: u8, level: bool) {
        self.schedule(pin, self.clock.now_micros(), level);
    }

    /// Drive an input pin to `level` at an absolute time.
    pub fn schedule(&self, pin: u8, at_us: u64, level: bool) {
        self.pins
            .borrow_mut()
            .entry(pin)
            .or_default()
            .push_event(at_us, level);
    }

    /// Answer trigger pulses on `trigger` with the given echo on `echo`.
    pub fn attach_echo(&mut self, trigger: u8, echo: u8, response: EchoResponse) {
        self.echo = Some(EchoSim {
            trigger,
            echo,
            response,
        });
    }

    /// Simulate an obstacle `cm` centimetres in front of an ultrasonic sensor.
    pub fn simulate_obstacle_cm(&mut self, trigger: u8, echo: u8, cm: f32) {
        let pulse_us = (cm * MICROS_PER_CM) as u64;
        self.attach_echo(
            trigger,
            echo,
            EchoResponse::Pulse {
                delay_us: 450,
                pulse_us,
            },
        );
    }

    /// Snapshot of the simulated state of a pin.
    pub fn pin(&self, pin: u8) -> Option<MockPin> {
        self.pins.borrow().get(&pin).cloned()
    }

    /// Last configured mode of a pin.
    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.pins.borrow().get(&pin).map(|p| p.mode)
    }

    /// Levels written to a pin, in order.
    pub fn writes(&self, pin: u8) -> Vec<bool> {
        self.pins
            .borrow()
            .get(&pin)
            .map(|p| p.writes.clone())
            .unwrap_or_default()
    }

    fn check(&self, pin: u8) -> Result<(), MockPinError> {
        if self.failing_pin == Some(pin) {
            Err(MockPinError(pin))
        } else {
            Ok(())
        }
    }

    fn fire_echo(&self, sim: EchoSim, now: u64) {
        let mut pins = self.pins.borrow_mut();
        let echo = pins.entry(sim.echo).or_default();
        match sim.response {
            EchoResponse::Pulse { delay_us, pulse_us } => {
                echo.push_event(now + delay_us, true);
                echo.push_event(now + delay_us + pulse_us, false);
            }
            EchoResponse::Stuck { delay_us } => {
                echo.push_event(now + delay_us, true);
            }
            EchoResponse::Silent => {}
        }
    }
}

impl DigitalIo for MockBoard {
    type Error = MockPinError;

    fn configure_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), MockPinError> {
        self.check(pin)?;
        let mut pins = self.pins.borrow_mut();
        let state = pins.entry(pin).or_default();
        state.mode = mode;
        state.configure_count += 1;
        Ok(())
    }

    fn read_digital(&self, pin: u8) -> bool {
        let now = self.clock.now_micros();
        let level = {
            let mut pins = self.pins.borrow_mut();
            let state = pins.entry(pin).or_default();
            state.read_count += 1;
            state.level_at(now)
        };
        self.clock.advance_us(self.read_cost_us);
        level
    }

    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), MockPinError> {
        self.check(pin)?;
        let now = self.clock.now_micros();
        let was_high = {
            let mut pins = self.pins.borrow_mut();
            let state = pins.entry(pin).or_default();
            let was_high = state.level_at(now);
            state.writes.push(high);
            state.push_event(now, high);
            was_high
        };

        // falling edge on the trigger starts a measurement
        if let Some(sim) = self.echo {
            if sim.trigger == pin && was_high && !high {
                self.fire_echo(sim, now);
            }
        }
        Ok(())
    }
}

impl Clock for MockBoard {
    fn now_micros(&self) -> u64 {
        self.clock.now_micros()
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_default() {
        let clock = MockClock::new();
        assert_eq!(clock.now_micros(), 0);
        assert_eq!(clock.now_millis(), 0);
    }

    #[test]
    fn mock_clock_set() {
        let clock = MockClock::new();
        clock.set_ms(1000);
        assert_eq!(clock.now_millis(), 1000);
        clock.set_us(1_500);
        assert_eq!(clock.now_micros(), 1_500);
    }

    #[test]
    fn mock_clock_advance() {
        let clock = MockClock::starting_at_us(100);
        clock.advance_us(50);
        assert_eq!(clock.now_micros(), 150);
        clock.advance_ms(1);
        assert_eq!(clock.now_micros(), 1_150);
    }

    #[test]
    fn mock_clock_advance_wraps() {
        let clock = MockClock::starting_at_us(u64::MAX - 1);
        clock.advance_us(3);
        assert_eq!(clock.now_micros(), 1);
    }

    #[test]
    fn mock_clock_delay_rounds_up_to_micros() {
        let mut clock = MockClock::new();
        clock.delay_us(10);
        assert_eq!(clock.now_micros(), 10);
        clock.delay_ns(1);
        assert_eq!(clock.now_micros(), 11);
        clock.delay_ms(2);
        assert_eq!(clock.now_micros(), 2_011);
    }

    // =========================================================================
    // MockBoard Pin Tests
    // =========================================================================

    #[test]
    fn mock_board_default_levels() {
        let mut board = MockBoard::new().with_read_cost_us(0);
        assert!(!board.read_digital(3));

        board.configure_pin_mode(3, PinMode::InputPullUp).unwrap();
        assert!(board.read_digital(3));
    }

    #[test]
    fn mock_board_set_input() {
        let board = MockBoard::new();
        board.set_input(5, true);
        assert!(board.read_digital(5));
        board.set_input(5, false);
        assert!(!board.read_digital(5));
    }

    #[test]
    fn mock_board_schedule_future_level() {
        let board = MockBoard::new().with_read_cost_us(0);
        board.schedule(5, 100, true);
        board.schedule(5, 200, false);

        board.clock.set_us(99);
        assert!(!board.read_digital(5));
        board.clock.set_us(100);
        assert!(board.read_digital(5));
        board.clock.set_us(199);
        assert!(board.read_digital(5));
        board.clock.set_us(200);
        assert!(!board.read_digital(5));
    }

    #[test]
    fn mock_board_read_cost_advances_clock() {
        let board = MockBoard::new().with_read_cost_us(3);
        board.read_digital(1);
        board.read_digital(1);
        assert_eq!(board.now_micros(), 6);
        assert_eq!(board.pin(1).unwrap().read_count, 2);
    }

    #[test]
    fn mock_board_records_writes_and_modes() {
        let mut board = MockBoard::new();
        board.configure_pin_mode(13, PinMode::Output).unwrap();
        board.write_digital(13, true).unwrap();
        board.write_digital(13, false).unwrap();

        assert_eq!(board.mode(13), Some(PinMode::Output));
        assert_eq!(board.writes(13), vec![true, false]);
        assert_eq!(board.pin(13).unwrap().configure_count, 1);
        assert!(board.writes(12).is_empty());
    }

    #[test]
    fn mock_board_failing_pin() {
        let mut board = MockBoard::new().with_failing_pin(7);
        assert_eq!(
            board.configure_pin_mode(7, PinMode::Output),
            Err(MockPinError(7))
        );
        assert_eq!(board.write_digital(7, true), Err(MockPinError(7)));
        assert!(board.write_digital(8, true).is_ok());
    }

    // =========================================================================
    // Echo Simulation Tests
    // =========================================================================

    #[test]
    fn mock_board_echo_pulse_follows_trigger_fall() {
        let mut board = MockBoard::new().with_read_cost_us(0);
        board.attach_echo(
            1,
            2,
            EchoResponse::Pulse {
                delay_us: 10,
                pulse_us: 100,
            },
        );

        board.write_digital(1, true).unwrap();
        assert!(!board.read_digital(2));
        board.write_digital(1, false).unwrap();

        board.clock.advance_us(10);
        assert!(board.read_digital(2));
        board.clock.advance_us(99);
        assert!(board.read_digital(2));
        board.clock.advance_us(1);
        assert!(!board.read_digital(2));
    }

    #[test]
    fn mock_board_echo_requires_falling_edge() {
        let mut board = MockBoard::new().with_read_cost_us(0);
        board.attach_echo(1, 2, EchoResponse::Stuck { delay_us: 0 });

        // low -> low is not a falling edge
        board.write_digital(1, false).unwrap();
        assert!(!board.read_digital(2));

        board.write_digital(1, true).unwrap();
        board.write_digital(1, false).unwrap();
        assert!(board.read_digital(2));
    }
}
