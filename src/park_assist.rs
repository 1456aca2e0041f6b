//! Parking aid: distance-dependent beeping while a button is held.
//!
//! While the enable button is pressed the ultrasonic sensor is pinged
//! periodically and the measured distance is turned into a [`Tone`]:
//!
//! | Distance | Tone |
//! |----------|------|
//! | below `min_cm` | continuous |
//! | `min_cm..=max_cm` | beeping, faster when closer (`max_hz` .. `min_hz`) |
//! | above `max_cm`, or no echo | silent |
//!
//! The beep itself is the square output of a [`PhaseOscillator`], so the
//! loop never blocks on the buzzer.
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::{Config, ParkAssist, Tone};
//! use rs_sketchbook::hal::MockBoard;
//!
//! let config = Config::default();
//! let mut board = MockBoard::new();
//! board.simulate_obstacle_cm(config.pins.trigger, config.pins.echo, 2.0);
//!
//! let mut assist = ParkAssist::new(&config);
//! assist.initialize(&mut board).unwrap();
//!
//! // Button pulls the pull-up line low and is held past the debounce time
//! board.set_input(config.pins.button, false);
//! board.clock.advance_ms(101);
//! assist.tick(&mut board).unwrap();
//! board.clock.advance_ms(101);
//! let state = assist.tick(&mut board).unwrap();
//!
//! assert!(state.engaged);
//! assert_eq!(state.tone, Tone::Continuous);
//! assert!(state.buzzer_on);
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::{Config, ParkAssistConfig};
use crate::debounce::DebouncedInput;
use crate::distance::{DistanceSensor, RangingError};
use crate::oscillator::PhaseOscillator;
use crate::traits::{Clock, DigitalIo, PinMode};

/// What the buzzer should be doing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Tone {
    /// Buzzer off.
    #[default]
    Silent,
    /// On/off at the given rate (full cycles per second).
    Beep {
        /// Beep rate in Hz.
        frequency_hz: f32,
    },
    /// Buzzer permanently on.
    Continuous,
}

impl Tone {
    /// Map a distance to a tone. `None` means nothing was detected.
    ///
    /// ```
    /// use rs_sketchbook::{ParkAssistConfig, Tone};
    ///
    /// let cfg = ParkAssistConfig::default();
    /// assert_eq!(Tone::for_distance(&cfg, Some(2.0)), Tone::Continuous);
    /// assert_eq!(Tone::for_distance(&cfg, Some(3.0)), Tone::Beep { frequency_hz: 8.0 });
    /// assert_eq!(Tone::for_distance(&cfg, Some(30.0)), Tone::Beep { frequency_hz: 1.0 });
    /// assert_eq!(Tone::for_distance(&cfg, Some(31.0)), Tone::Silent);
    /// assert_eq!(Tone::for_distance(&cfg, None), Tone::Silent);
    /// ```
    pub fn for_distance(cfg: &ParkAssistConfig, distance_cm: Option<f32>) -> Self {
        let Some(distance) = distance_cm else {
            return Tone::Silent;
        };

        if distance < cfg.min_cm {
            Tone::Continuous
        } else if distance > cfg.max_cm {
            Tone::Silent
        } else {
            let span = cfg.max_cm - cfg.min_cm;
            let percent = if span > 0.0 {
                (distance - cfg.min_cm) / span
            } else {
                0.0
            };
            let frequency_hz = (1.0 - percent) * (cfg.max_hz - cfg.min_hz) + cfg.min_hz;
            Tone::Beep { frequency_hz }
        }
    }
}

/// Snapshot returned by every [`ParkAssist::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ParkAssistState {
    /// Enable button is (debounced) pressed.
    pub engaged: bool,
    /// Last measured distance, `None` if disengaged or nothing in range.
    pub distance_cm: Option<f32>,
    /// Tone derived from the distance.
    pub tone: Tone,
    /// Level currently driven on the buzzer pin.
    pub buzzer_on: bool,
}

/// Park assist controller.
///
/// Owns the button filter, sensor driver and beep oscillator; the board is
/// passed in on every call.
#[derive(Clone, Debug)]
pub struct ParkAssist {
    button: DebouncedInput,
    sensor: DistanceSensor,
    buzzer_pin: u8,
    beeper: PhaseOscillator,
    ranges: ParkAssistConfig,
    last_ping_ms: Option<u64>,
    state: ParkAssistState,
}

impl ParkAssist {
    /// Build the controller from configuration. Does not touch hardware.
    pub fn new(config: &Config) -> Self {
        Self {
            button: DebouncedInput::new(
                config.pins.button,
                config.button.pull_up,
                config.button.hold_ms,
            ),
            sensor: DistanceSensor::new(config.pins.trigger, config.pins.echo),
            buzzer_pin: config.pins.buzzer,
            beeper: PhaseOscillator::new(),
            ranges: config.park_assist,
            last_ping_ms: None,
            state: ParkAssistState::default(),
        }
    }

    /// Configure all pins, seed the button filter and silence the buzzer.
    ///
    /// # Errors
    ///
    /// Returns the HAL error if any pin cannot be configured.
    pub fn initialize<H>(&mut self, hw: &mut H) -> Result<(), H::Error>
    where
        H: DigitalIo + Clock,
    {
        self.button.initialize(hw)?;
        self.sensor.initialize(hw)?;
        hw.configure_pin_mode(self.buzzer_pin, PinMode::Output)?;
        hw.write_digital(self.buzzer_pin, false)?;
        self.beeper = PhaseOscillator::starting_at(hw.now_micros());
        self.last_ping_ms = None;
        self.state = ParkAssistState::default();
        Ok(())
    }

    /// Run one loop iteration.
    ///
    /// Call as often as possible; the beep oscillator needs at least
    /// `64 * max_hz` calls per second to keep its rate.
    ///
    /// # Errors
    ///
    /// Returns the HAL error if the trigger or buzzer pin cannot be driven.
    /// Echo timeouts are not errors, they read as "nothing in range".
    pub fn tick<H>(&mut self, hw: &mut H) -> Result<ParkAssistState, H::Error>
    where
        H: DigitalIo + Clock + DelayNs,
    {
        self.button.poll(hw);
        let engaged = self.button.is_active();
        if self.button.changed() {
            log::info!("park assist {}", if engaged { "engaged" } else { "idle" });
        }

        let distance_cm = if engaged {
            self.ping_if_due(hw)?
        } else {
            self.last_ping_ms = None;
            None
        };

        let tone = Tone::for_distance(&self.ranges, distance_cm);
        let buzzer_on = match tone {
            Tone::Silent => false,
            Tone::Continuous => true,
            Tone::Beep { frequency_hz } => {
                self.beeper.square(frequency_hz, hw.now_micros()) != 0
            }
        };

        if buzzer_on != self.state.buzzer_on {
            hw.write_digital(self.buzzer_pin, buzzer_on)?;
        }

        self.state = ParkAssistState {
            engaged,
            distance_cm,
            tone,
            buzzer_on,
        };
        Ok(self.state)
    }

    /// State after the most recent tick.
    #[inline]
    pub fn state(&self) -> ParkAssistState {
        self.state
    }

    /// Active distance/rate mapping.
    #[inline]
    pub fn ranges(&self) -> &ParkAssistConfig {
        &self.ranges
    }

    fn ping_if_due<H>(&mut self, hw: &mut H) -> Result<Option<f32>, H::Error>
    where
        H: DigitalIo + Clock + DelayNs,
    {
        let now_ms = hw.now_millis();
        let due = match self.last_ping_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.ranges.measure_interval_ms,
        };
        if !due {
            return Ok(self.state.distance_cm);
        }
        self.last_ping_ms = Some(now_ms);

        match self.sensor.measure_cm(hw) {
            Ok(cm) => Ok(Some(cm)),
            Err(RangingError::Hardware(err)) => Err(err),
            Err(RangingError::EchoStartTimeout | RangingError::EchoEndTimeout) => Ok(None),
        }
    }
}
