//! # rs-sketchbook
//!
//! Building blocks for polled microcontroller loops: debounced inputs,
//! phase-accumulator waveforms and ultrasonic ranging, plus the small
//! sketches built from them.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for digital I/O and time, with a mock board for desktop tests
//! - **Debouncing**: Hold-time filter that never lets short glitches through
//! - **Waveforms**: 64-step phase accumulator with phasor, PWM, triangle and sine outputs
//! - **Ranging**: HC-SR04 ultrasonic driver with bounded echo timeouts
//! - **Sketches**: Park assist, a two-button LED switch and a non-blocking blinker
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `debounce` - Debounced digital input
//! - `oscillator` - Phase-accumulator oscillator
//! - `distance` - Ultrasonic distance sensor
//! - `park_assist` / `button_led` / `blink` - Complete sketches
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! Components never own the board. It is passed into every call that needs
//! it, so one board can serve several components in the same loop.
//!
//! ## Example
//!
//! ```rust
//! use rs_sketchbook::{DebouncedInput, PhaseOscillator, PinMode, hal::MockBoard};
//! use rs_sketchbook::traits::{Clock, DigitalIo};
//!
//! let mut board = MockBoard::new();
//! let mut button = DebouncedInput::new(2, true, 50);
//! button.initialize(&mut board).unwrap();
//! board.configure_pin_mode(8, PinMode::Output).unwrap();
//!
//! let mut led = PhaseOscillator::new();
//!
//! // Main loop: flash the LED at 2Hz unless the button is held
//! for _ in 0..1000 {
//!     board.clock.advance_us(500);
//!     button.poll(&board);
//!     let level = if button.is_active() {
//!         0
//!     } else {
//!         led.square(2.0, board.now_micros())
//!     };
//!     board.write_digital(8, level != 0).unwrap();
//! }
//!
//! // Half a second at 2Hz is one full on/off cycle
//! let writes = board.writes(8);
//! assert!(writes.contains(&true));
//! assert!(writes.contains(&false));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

/// Blinking a group of output pins without blocking.
pub mod blink;
/// One LED switched by two debounced buttons.
pub mod button_led;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Time-based debouncing of digital inputs.
pub mod debounce;
/// HC-SR04 ultrasonic distance sensor.
pub mod distance;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Phase-accumulator oscillator and waveform tables.
pub mod oscillator;
/// Distance-dependent beeping while a button is held.
pub mod park_assist;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use blink::Blink;
pub use button_led::ButtonLed;
pub use config::{
    BlinkConfig, ButtonLedConfig, Config, DebounceConfig, DeviceConfig, ParkAssistConfig, PinConfig,
};
pub use debounce::DebouncedInput;
pub use distance::{DistanceSensor, RangingError};
pub use oscillator::{PhaseOscillator, Waveform, SINE_TABLE, TABLE_SIZE};
pub use park_assist::{ParkAssist, ParkAssistState, Tone};
pub use traits::{Clock, DigitalIo, PinMode};
