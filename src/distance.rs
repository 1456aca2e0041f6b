//! HC-SR04 ultrasonic distance sensor.
//!
//! The sensor is started by a 10µs high pulse on its trigger pin. It then
//! raises the echo pin for as long as the sound took to travel to the
//! obstacle and back. Sound covers one centimetre and back in roughly
//! 58.2µs, so the distance is `pulse_us / 58.2`.
//!
//! # Wiring
//!
//! - Trigger → any output pin
//! - Echo → any input pin (through a level shifter on 3.3V boards)
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::DistanceSensor;
//! use rs_sketchbook::hal::MockBoard;
//!
//! let mut board = MockBoard::new();
//! board.simulate_obstacle_cm(27, 22, 12.0);
//!
//! let sensor = DistanceSensor::new(27, 22);
//! sensor.initialize(&mut board).unwrap();
//!
//! let cm = sensor.measure_cm(&mut board).unwrap();
//! assert!((cm - 12.0).abs() < 0.1);
//! ```

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::traits::{Clock, DigitalIo, PinMode};

/// Round-trip echo time per centimetre of distance, in microseconds.
pub const MICROS_PER_CM: f32 = 58.2;

/// Default time to wait for each echo edge (about 5m of range).
pub const DEFAULT_ECHO_TIMEOUT_US: u64 = 30_000;

const SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

/// Errors from a distance measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangingError<E> {
    /// Driving the trigger pin failed.
    Hardware(E),
    /// The echo pin never went high. Usually a wiring problem.
    EchoStartTimeout,
    /// The echo pin stayed high too long. Nothing in range.
    EchoEndTimeout,
}

impl<E: fmt::Debug> fmt::Display for RangingError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangingError::Hardware(err) => write!(f, "trigger pin error: {:?}", err),
            RangingError::EchoStartTimeout => f.write_str("timed out waiting for echo to start"),
            RangingError::EchoEndTimeout => f.write_str("timed out waiting for echo to end"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for RangingError<E> {}

/// HC-SR04 driver addressing its pins by number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceSensor {
    trigger_pin: u8,
    echo_pin: u8,
    echo_timeout_us: u64,
}

impl DistanceSensor {
    /// Create a driver. Does not touch the hardware.
    pub const fn new(trigger_pin: u8, echo_pin: u8) -> Self {
        Self {
            trigger_pin,
            echo_pin,
            echo_timeout_us: DEFAULT_ECHO_TIMEOUT_US,
        }
    }

    /// Override how long to wait for each echo edge.
    pub const fn with_echo_timeout_us(mut self, timeout_us: u64) -> Self {
        self.echo_timeout_us = timeout_us;
        self
    }

    /// Trigger pin number.
    #[inline]
    pub fn trigger_pin(&self) -> u8 {
        self.trigger_pin
    }

    /// Echo pin number.
    #[inline]
    pub fn echo_pin(&self) -> u8 {
        self.echo_pin
    }

    /// Configure trigger as output (driven low) and echo as input.
    ///
    /// # Errors
    ///
    /// Returns the HAL error if either pin cannot be configured.
    pub fn initialize<H: DigitalIo>(&self, hw: &mut H) -> Result<(), H::Error> {
        hw.configure_pin_mode(self.trigger_pin, PinMode::Output)?;
        hw.write_digital(self.trigger_pin, false)?;
        hw.configure_pin_mode(self.echo_pin, PinMode::Input)
    }

    /// Fire one ping and time the echo. Blocks for up to twice the echo timeout.
    ///
    /// # Errors
    ///
    /// - [`RangingError::Hardware`] if the trigger cannot be driven
    /// - [`RangingError::EchoStartTimeout`] if no echo starts
    /// - [`RangingError::EchoEndTimeout`] if the echo does not end
    pub fn measure_pulse_us<H>(&self, hw: &mut H) -> Result<u64, RangingError<H::Error>>
    where
        H: DigitalIo + Clock + DelayNs,
    {
        hw.write_digital(self.trigger_pin, false)
            .map_err(RangingError::Hardware)?;
        hw.delay_us(SETTLE_US);
        hw.write_digital(self.trigger_pin, true)
            .map_err(RangingError::Hardware)?;
        hw.delay_us(TRIGGER_PULSE_US);
        hw.write_digital(self.trigger_pin, false)
            .map_err(RangingError::Hardware)?;

        let wait_start = hw.now_micros();
        while !hw.read_digital(self.echo_pin) {
            if hw.now_micros().wrapping_sub(wait_start) > self.echo_timeout_us {
                log::warn!("no echo on pin {}", self.echo_pin);
                return Err(RangingError::EchoStartTimeout);
            }
        }

        let pulse_start = hw.now_micros();
        while hw.read_digital(self.echo_pin) {
            if hw.now_micros().wrapping_sub(pulse_start) > self.echo_timeout_us {
                log::warn!("echo on pin {} did not end", self.echo_pin);
                return Err(RangingError::EchoEndTimeout);
            }
        }

        Ok(hw.now_micros().wrapping_sub(pulse_start))
    }

    /// Measure the distance to the nearest obstacle in centimetres.
    ///
    /// # Errors
    ///
    /// See [`measure_pulse_us`](Self::measure_pulse_us).
    pub fn measure_cm<H>(&self, hw: &mut H) -> Result<f32, RangingError<H::Error>>
    where
        H: DigitalIo + Clock + DelayNs,
    {
        let pulse_us = self.measure_pulse_us(hw)?;
        Ok(pulse_to_cm(pulse_us))
    }
}

/// Convert an echo pulse width to centimetres.
///
/// ```
/// use rs_sketchbook::distance::pulse_to_cm;
///
/// assert_eq!(pulse_to_cm(0), 0.0);
/// assert!((pulse_to_cm(582) - 10.0).abs() < 1e-4);
/// ```
#[inline]
pub fn pulse_to_cm(pulse_us: u64) -> f32 {
    pulse_us as f32 / MICROS_PER_CM
}
