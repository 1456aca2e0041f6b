//! Phase-accumulator oscillator producing 8-bit waveforms.
//!
//! [`PhaseOscillator`] steps a phase counter through [`TABLE_SIZE`]
//! positions per cycle, advancing at most one position per call. Waveform
//! values are derived from the phase and scaled to `0..=255`, the range of
//! an 8-bit PWM duty register.
//!
//! The oscillator is driven by elapsed time, not by call count, so it has to
//! be polled faster than one step interval (`1 / (f * 64)` seconds) to keep
//! the nominal frequency. Polling slower stretches the waveform; there is
//! no catch-up.
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::PhaseOscillator;
//!
//! let mut osc = PhaseOscillator::new();
//!
//! // 1 Hz => one phase step every 15625µs
//! let mut t = 0;
//! for _ in 0..16 {
//!     t += 15_625;
//!     osc.sin(1.0, t);
//! }
//! assert_eq!(osc.phase(), 16);
//! assert_eq!(osc.sin(1.0, t), 255); // quarter cycle: peak
//! ```

use crate::traits::Clock;

/// Number of phase steps per waveform cycle.
pub const TABLE_SIZE: u8 = 64;

/// Largest waveform value.
pub const MAX_VALUE: u8 = 255;

/// Default pulse width for [`PhaseOscillator::pwm`] (50% duty).
pub const DEFAULT_PULSE_WIDTH: u8 = 127;

/// Default peak position for [`PhaseOscillator::saw`] (symmetric triangle).
pub const DEFAULT_PEAK_WIDTH: u8 = 127;

const PHASE_SCALE: u8 = (256 / TABLE_SIZE as u16) as u8;

/// One sine cycle in 64 steps, offset to 128 and scaled to `0..=255`.
///
/// `round((sin(2π·i/64) + 1) / 2 · 255)`
pub static SINE_TABLE: [u8; TABLE_SIZE as usize] = [
    128, 140, 152, 165, 176, 188, 198, 208, 218, 226, 234, 240, 245, 250, 253, 254, //
    255, 254, 253, 250, 245, 240, 234, 226, 218, 208, 198, 188, 176, 165, 152, 140, //
    128, 115, 103, 90, 79, 67, 57, 47, 37, 29, 21, 15, 10, 5, 2, 1, //
    0, 1, 2, 5, 10, 15, 21, 29, 37, 47, 57, 67, 79, 90, 103, 115, //
];

/// Waveform shapes the oscillator can produce.
///
/// Lets the shape be chosen at runtime, e.g. from configuration.
///
/// ```
/// use rs_sketchbook::{PhaseOscillator, Waveform};
///
/// let mut osc = PhaseOscillator::new();
/// assert_eq!(osc.sample(Waveform::Sine, 1.0, 0), 128);
/// assert_eq!(osc.sample(Waveform::square(), 1.0, 0), 255);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Waveform {
    /// Linear ramp from 0 up to 252, then reset.
    Phasor,
    /// Rectangle: 255 while the scaled phase is `<= pulse_width`, else 0.
    Pwm {
        /// High-time threshold on the `0..=255` phase scale.
        pulse_width: u8,
    },
    /// Triangle peaking at `peak_width` on the `0..=255` phase scale.
    Saw {
        /// Phase position of the peak.
        peak_width: u8,
    },
    /// Table-driven sine.
    #[default]
    Sine,
}

impl Waveform {
    /// 50% duty square wave.
    pub const fn square() -> Self {
        Waveform::Pwm {
            pulse_width: DEFAULT_PULSE_WIDTH,
        }
    }

    /// Symmetric triangle wave.
    pub const fn triangle() -> Self {
        Waveform::Saw {
            peak_width: DEFAULT_PEAK_WIDTH,
        }
    }

    /// Value of this waveform at a given phase, without advancing anything.
    ///
    /// `phase` is taken modulo [`TABLE_SIZE`].
    pub fn at_phase(self, phase: u8) -> u8 {
        let phase = phase % TABLE_SIZE;
        let scaled = phase * PHASE_SCALE;
        match self {
            Waveform::Phasor => scaled,
            Waveform::Pwm { pulse_width } => pulse_at(scaled, pulse_width),
            Waveform::Saw { peak_width } => triangle_at(scaled, peak_width),
            Waveform::Sine => SINE_TABLE[phase as usize],
        }
    }
}

fn pulse_at(scaled: u8, pulse_width: u8) -> u8 {
    if scaled <= pulse_width {
        MAX_VALUE
    } else {
        0
    }
}

/// Piecewise triangle. `peak_width == 0` gives a pure falling ramp and
/// `peak_width == 255` a pure rising one; neither divides by zero.
fn triangle_at(scaled: u8, peak_width: u8) -> u8 {
    let p = u32::from(scaled);
    let peak = u32::from(peak_width);
    let max = u32::from(MAX_VALUE);

    let value = if p <= peak {
        if peak == 0 {
            max
        } else {
            max * p / peak
        }
    } else {
        // p > peak, so peak < 255
        max - max * (p - peak) / (max - peak)
    };
    value as u8
}

/// Phase-accumulator oscillator.
///
/// One instance holds one phase. Several waveforms at the same frequency
/// can share an instance; different frequencies need separate instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseOscillator {
    phase: u8,
    last_update_us: u64,
}

impl PhaseOscillator {
    /// Create an oscillator at phase 0 with its reference time at 0.
    pub const fn new() -> Self {
        Self {
            phase: 0,
            last_update_us: 0,
        }
    }

    /// Create an oscillator whose first step is timed from `now_us`.
    pub const fn starting_at(now_us: u64) -> Self {
        Self {
            phase: 0,
            last_update_us: now_us,
        }
    }

    /// Current phase in `0..TABLE_SIZE`.
    #[inline]
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Current phase on the `0..=255` scale.
    #[inline]
    pub fn scaled_phase(&self) -> u8 {
        self.phase * PHASE_SCALE
    }

    /// Timestamp of the last phase step.
    #[inline]
    pub fn last_update_us(&self) -> u64 {
        self.last_update_us
    }

    /// Microseconds between phase steps for a frequency.
    ///
    /// Returns `None` for frequencies that cannot advance the phase
    /// (zero, negative, NaN or infinite).
    pub fn step_interval_us(frequency_hz: f32) -> Option<f32> {
        if frequency_hz.is_finite() && frequency_hz > 0.0 {
            Some(1_000_000.0 / (frequency_hz * f32::from(TABLE_SIZE)))
        } else {
            None
        }
    }

    /// Advance the phase by one step if a step interval has elapsed.
    ///
    /// A clock that wrapped since the last step (`now_us` below the last
    /// timestamp) counts as a long wait and fires the step. Returns true if
    /// the phase moved.
    pub fn update_phase(&mut self, frequency_hz: f32, now_us: u64) -> bool {
        let Some(step_us) = Self::step_interval_us(frequency_hz) else {
            return false;
        };

        let wrapped = now_us < self.last_update_us;
        if wrapped || (now_us - self.last_update_us) as f32 >= step_us {
            self.phase += 1;
            if self.phase >= TABLE_SIZE {
                self.phase = 0;
            }
            self.last_update_us = now_us;
            true
        } else {
            false
        }
    }

    /// Ramp from 0 to 252 once per cycle.
    pub fn phasor(&mut self, frequency_hz: f32, now_us: u64) -> u8 {
        self.sample(Waveform::Phasor, frequency_hz, now_us)
    }

    /// Rectangle wave with duty cycle `pulse_width / 255`.
    pub fn pwm(&mut self, frequency_hz: f32, pulse_width: u8, now_us: u64) -> u8 {
        self.sample(Waveform::Pwm { pulse_width }, frequency_hz, now_us)
    }

    /// 50% duty square wave.
    pub fn square(&mut self, frequency_hz: f32, now_us: u64) -> u8 {
        self.pwm(frequency_hz, DEFAULT_PULSE_WIDTH, now_us)
    }

    /// Triangle rising to 255 at `peak_width`, then falling back.
    pub fn saw(&mut self, frequency_hz: f32, peak_width: u8, now_us: u64) -> u8 {
        self.sample(Waveform::Saw { peak_width }, frequency_hz, now_us)
    }

    /// Table-driven sine centred on 128.
    pub fn sin(&mut self, frequency_hz: f32, now_us: u64) -> u8 {
        self.sample(Waveform::Sine, frequency_hz, now_us)
    }

    /// Advance the phase, then evaluate `waveform`.
    pub fn sample(&mut self, waveform: Waveform, frequency_hz: f32, now_us: u64) -> u8 {
        self.update_phase(frequency_hz, now_us);
        waveform.at_phase(self.phase)
    }

    /// [`sample`](Self::sample) with the time taken from a [`Clock`].
    pub fn sample_with<C: Clock + ?Sized>(
        &mut self,
        clock: &C,
        waveform: Waveform,
        frequency_hz: f32,
    ) -> u8 {
        self.sample(waveform, frequency_hz, clock.now_micros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Step the oscillator `n` times at exactly the step interval.
    fn run_steps(osc: &mut PhaseOscillator, frequency_hz: f32, n: usize, t: &mut u64) {
        let step = PhaseOscillator::step_interval_us(frequency_hz).unwrap().ceil() as u64;
        for _ in 0..n {
            *t += step;
            osc.update_phase(frequency_hz, *t);
        }
    }

    // =========================================================================
    // Phase Update Tests
    // =========================================================================

    #[test]
    fn step_interval_for_one_hz() {
        assert_eq!(PhaseOscillator::step_interval_us(1.0), Some(15_625.0));
        assert_eq!(PhaseOscillator::step_interval_us(10.0), Some(1_562.5));
    }

    #[test]
    fn step_interval_rejects_invalid_frequencies() {
        assert_eq!(PhaseOscillator::step_interval_us(0.0), None);
        assert_eq!(PhaseOscillator::step_interval_us(-1.0), None);
        assert_eq!(PhaseOscillator::step_interval_us(f32::NAN), None);
        assert_eq!(PhaseOscillator::step_interval_us(f32::INFINITY), None);
    }

    #[test]
    fn phase_does_not_advance_before_interval() {
        let mut osc = PhaseOscillator::new();
        assert!(!osc.update_phase(1.0, 15_624));
        assert_eq!(osc.phase(), 0);
        assert_eq!(osc.last_update_us(), 0);
    }

    #[test]
    fn phase_advances_at_interval() {
        let mut osc = PhaseOscillator::new();
        assert!(osc.update_phase(1.0, 15_625));
        assert_eq!(osc.phase(), 1);
        assert_eq!(osc.last_update_us(), 15_625);
    }

    #[test]
    fn long_stall_advances_only_one_step() {
        let mut osc = PhaseOscillator::new();
        assert!(osc.update_phase(1.0, 10_000_000));
        assert_eq!(osc.phase(), 1);
    }

    #[test]
    fn phase_wraps_after_full_table() {
        let mut osc = PhaseOscillator::new();
        let mut t = 0;
        run_steps(&mut osc, 1.0, 63, &mut t);
        assert_eq!(osc.phase(), 63);
        run_steps(&mut osc, 1.0, 1, &mut t);
        assert_eq!(osc.phase(), 0);
    }

    #[test]
    fn clock_wraparound_fires_update() {
        let mut osc = PhaseOscillator::starting_at(u64::MAX - 5);
        assert!(osc.update_phase(1.0, 3));
        assert_eq!(osc.phase(), 1);
        assert_eq!(osc.last_update_us(), 3);
    }

    #[test]
    fn invalid_frequency_holds_phase() {
        let mut osc = PhaseOscillator::new();
        assert!(!osc.update_phase(0.0, u64::MAX / 2));
        assert!(!osc.update_phase(f32::NAN, u64::MAX / 2));
        assert_eq!(osc.phase(), 0);
    }

    // =========================================================================
    // Waveform Tests
    // =========================================================================

    #[test]
    fn phasor_scales_phase() {
        assert_eq!(Waveform::Phasor.at_phase(0), 0);
        assert_eq!(Waveform::Phasor.at_phase(1), 4);
        assert_eq!(Waveform::Phasor.at_phase(32), 128);
        assert_eq!(Waveform::Phasor.at_phase(63), 252);
    }

    #[test]
    fn pwm_threshold() {
        let square = Waveform::square();
        assert_eq!(square.at_phase(0), 255);
        assert_eq!(square.at_phase(31), 255); // 124
        assert_eq!(square.at_phase(32), 0); // 128
        assert_eq!(square.at_phase(63), 0);
    }

    #[test]
    fn pwm_extremes() {
        let never = Waveform::Pwm { pulse_width: 0 };
        let always = Waveform::Pwm { pulse_width: 255 };
        assert_eq!(never.at_phase(0), 255);
        assert_eq!(never.at_phase(1), 0);
        for phase in 0..TABLE_SIZE {
            assert_eq!(always.at_phase(phase), 255);
        }
    }

    #[test]
    fn triangle_symmetric() {
        let tri = Waveform::triangle();
        assert_eq!(tri.at_phase(0), 0);
        assert_eq!(tri.at_phase(16), 128); // 64 * 255 / 127
        assert_eq!(tri.at_phase(31), 248); // 124 * 255 / 127
        assert_eq!(tri.at_phase(32), 254); // 255 - 255 / 128
        assert_eq!(tri.at_phase(63), 6); // 255 - 125 * 255 / 128
    }

    #[test]
    fn triangle_rising_half_reaches_full_scale() {
        // 255 * 128 / 128, where (255 / 128) * 128 would give 128
        assert_eq!(Waveform::Saw { peak_width: 128 }.at_phase(32), 255);
        assert_eq!(Waveform::Saw { peak_width: 200 }.at_phase(50), 255);
    }

    #[test]
    fn triangle_rises_then_falls() {
        let tri = Waveform::triangle();
        let values: Vec<u8> = (0..TABLE_SIZE).map(|p| tri.at_phase(p)).collect();
        assert!(values[..32].windows(2).all(|w| w[0] <= w[1]));
        assert!(values[32..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn triangle_zero_peak_is_falling_ramp() {
        let ramp = Waveform::Saw { peak_width: 0 };
        assert_eq!(ramp.at_phase(0), 255);
        assert_eq!(ramp.at_phase(1), 251);
        assert_eq!(ramp.at_phase(63), 3);
    }

    #[test]
    fn triangle_full_peak_is_rising_ramp() {
        let ramp = Waveform::Saw { peak_width: 255 };
        for phase in 0..TABLE_SIZE {
            assert_eq!(ramp.at_phase(phase), phase * 4);
        }
    }

    #[test]
    fn triangle_never_panics() {
        for peak_width in 0..=255u8 {
            for phase in 0..TABLE_SIZE {
                Waveform::Saw { peak_width }.at_phase(phase);
            }
        }
    }

    #[test]
    fn sine_matches_table() {
        for phase in 0..TABLE_SIZE {
            assert_eq!(Waveform::Sine.at_phase(phase), SINE_TABLE[phase as usize]);
        }
        assert_eq!(SINE_TABLE[0], 128);
        assert_eq!(SINE_TABLE[16], 255);
        assert_eq!(SINE_TABLE[48], 0);
    }

    #[test]
    fn all_methods_share_one_phase() {
        let mut osc = PhaseOscillator::new();
        osc.phasor(1.0, 15_625);
        osc.sin(1.0, 31_250);
        osc.pwm(1.0, 127, 46_875);
        osc.saw(1.0, 127, 62_500);
        assert_eq!(osc.phase(), 4);
    }
}
