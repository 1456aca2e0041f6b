//! Trait definitions for hardware abstraction.
//!
//! Every component in rs-sketchbook talks to the board only through these
//! traits, which lets it:
//! - Run on different hardware (ESP32, desktop mock)
//! - Be driven from simulated time in tests
//!
//! # Hardware Abstraction
//!
//! - [`DigitalIo`]: pin modes, digital reads and writes
//! - [`Clock`]: microsecond and millisecond time source
//! - [`PinMode`]: input, input with pull-up, output

pub mod hardware;

pub use hardware::*;
