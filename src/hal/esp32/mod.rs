//! ESP32-C3 SuperMini hardware abstraction layer.
//!
//! This module provides hardware implementations for the ESP32-C3 SuperMini
//! board running the sketches in this crate.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Sensor**: HC-SR04 ultrasonic module (echo through a 5V→3.3V level shifter)
//! - **Buzzer**: active piezo buzzer, or an LED with series resistor
//! - **Button**: push button to ground (internal pull-up)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod board;
mod clock;

pub use board::Esp32Board;
pub use clock::Esp32Clock;

/// Pin assignments for SuperMini ESP32-C3.
///
/// These are the defaults of [`crate::config::PinConfig`].
pub mod pins {
    /// Enable button (to ground, active low)
    pub const BUTTON: u8 = 6;

    /// LED "on" button (to ground, active low)
    pub const ON_BUTTON: u8 = 4;

    /// LED "off" button (to ground, active low)
    pub const OFF_BUTTON: u8 = 5;

    /// HC-SR04 trigger output
    pub const TRIGGER: u8 = 7;

    /// HC-SR04 echo input (through level shifter)
    pub const ECHO: u8 = 10;

    /// Active buzzer output
    pub const BUZZER: u8 = 3;

    /// Onboard blue LED (also I2C SDA, will flicker during I2C)
    pub const LED: u8 = 8;
}
