//! Shared configuration for desktop simulation and ESP32 firmware.
//!
//! Uses `heapless` containers for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_sketchbook::config::{Config, DebounceConfig, ParkAssistConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.button.hold_ms, 100);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_button(DebounceConfig::default().with_hold_ms(30))
//!     .with_park_assist(ParkAssistConfig::default().with_range_cm(5.0, 50.0));
//! assert_eq!(config.park_assist.max_cm, 50.0);
//! ```

use heapless::String as HString;
use heapless::Vec as HVec;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 32;

/// Maximum number of pins a [`BlinkConfig`] can drive
pub const MAX_BLINK_PINS: usize = 20;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for blink pin lists
pub type PinList = HVec<u8, MAX_BLINK_PINS>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

/// Create a PinList from a slice, dropping pins that do not fit
pub fn pin_list(pins: &[u8]) -> PinList {
    pins.iter().copied().take(MAX_BLINK_PINS).collect()
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// GPIO assignments
    pub pins: PinConfig,
    /// Enable button debouncing
    pub button: DebounceConfig,
    /// Distance-to-tone mapping
    pub park_assist: ParkAssistConfig,
    /// Blink sketch settings
    pub blink: BlinkConfig,
    /// Two-button LED sketch pins
    pub button_led: ButtonLedConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set pin configuration
    pub fn with_pins(mut self, pins: PinConfig) -> Self {
        self.pins = pins;
        self
    }

    /// Set button debounce configuration
    pub fn with_button(mut self, button: DebounceConfig) -> Self {
        self.button = button;
        self
    }

    /// Set park assist configuration
    pub fn with_park_assist(mut self, park_assist: ParkAssistConfig) -> Self {
        self.park_assist = park_assist;
        self
    }

    /// Set blink configuration
    pub fn with_blink(mut self, blink: BlinkConfig) -> Self {
        self.blink = blink;
        self
    }

    /// Set two-button LED configuration
    pub fn with_button_led(mut self, button_led: ButtonLedConfig) -> Self {
        self.button_led = button_led;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Pin Config
// ============================================================================

/// GPIO assignments for the park assist build
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinConfig {
    /// Enable button (switches to ground)
    pub button: u8,
    /// Ultrasonic sensor trigger output
    pub trigger: u8,
    /// Ultrasonic sensor echo input
    pub echo: u8,
    /// Active buzzer or LED output
    pub buzzer: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            button: 6,
            trigger: 7,
            echo: 10,
            buzzer: 3,
        }
    }
}

impl PinConfig {
    /// Set the button pin
    pub fn with_button(mut self, pin: u8) -> Self {
        self.button = pin;
        self
    }

    /// Set the ultrasonic sensor pins
    pub fn with_sensor(mut self, trigger: u8, echo: u8) -> Self {
        self.trigger = trigger;
        self.echo = echo;
        self
    }

    /// Set the buzzer pin
    pub fn with_buzzer(mut self, pin: u8) -> Self {
        self.buzzer = pin;
        self
    }
}

// ============================================================================
// Debounce Config
// ============================================================================

/// Debounce settings for a digital input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebounceConfig {
    /// Enable the internal pull-up (switch pulls to ground)
    pub pull_up: bool,
    /// Time the raw signal must be stable before it is accepted
    pub hold_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            pull_up: true,
            hold_ms: 100,
        }
    }
}

impl DebounceConfig {
    /// Set the pull-up preference
    pub fn with_pull_up(mut self, pull_up: bool) -> Self {
        self.pull_up = pull_up;
        self
    }

    /// Set the hold time
    pub fn with_hold_ms(mut self, ms: u64) -> Self {
        self.hold_ms = ms;
        self
    }
}

// ============================================================================
// Park Assist Config
// ============================================================================

/// Distance-to-tone mapping for the park assist
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkAssistConfig {
    /// Below this distance the buzzer sounds continuously
    pub min_cm: f32,
    /// Above this distance the buzzer is silent
    pub max_cm: f32,
    /// Beep rate at `max_cm`
    pub min_hz: f32,
    /// Beep rate just above `min_cm`
    pub max_hz: f32,
    /// Minimum time between two ultrasonic pings
    pub measure_interval_ms: u64,
}

impl Default for ParkAssistConfig {
    fn default() -> Self {
        Self {
            min_cm: 3.0,
            max_cm: 30.0,
            min_hz: 1.0,
            max_hz: 8.0,
            measure_interval_ms: 60,
        }
    }
}

impl ParkAssistConfig {
    /// Set the active distance range (values are ordered if swapped)
    pub fn with_range_cm(mut self, min_cm: f32, max_cm: f32) -> Self {
        self.min_cm = min_cm.min(max_cm);
        self.max_cm = max_cm.max(min_cm);
        self
    }

    /// Set the beep rate range (values are ordered if swapped)
    pub fn with_rate_hz(mut self, min_hz: f32, max_hz: f32) -> Self {
        self.min_hz = min_hz.min(max_hz);
        self.max_hz = max_hz.max(min_hz);
        self
    }

    /// Set the ping interval
    pub fn with_measure_interval_ms(mut self, ms: u64) -> Self {
        self.measure_interval_ms = ms;
        self
    }
}

// ============================================================================
// Blink Config
// ============================================================================

/// Settings for the blink sketch
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlinkConfig {
    /// Pins toggled together
    pub pins: PinList,
    /// Time between toggles
    pub interval_ms: u64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            // SuperMini onboard LED
            pins: pin_list(&[8]),
            interval_ms: 1000,
        }
    }
}

impl BlinkConfig {
    /// Set the pins to toggle
    pub fn with_pins(mut self, pins: &[u8]) -> Self {
        self.pins = pin_list(pins);
        self
    }

    /// Set the toggle interval
    pub fn with_interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }
}

// ============================================================================
// Button LED Config
// ============================================================================

/// Pins for the two-button LED sketch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonLedConfig {
    /// Button that switches the LED on (to ground)
    pub on_button: u8,
    /// Button that switches the LED off (to ground)
    pub off_button: u8,
    /// LED output
    pub led: u8,
}

impl Default for ButtonLedConfig {
    fn default() -> Self {
        Self {
            on_button: 4,
            off_button: 5,
            led: 8,
        }
    }
}

impl ButtonLedConfig {
    /// Set all three pins
    pub fn with_pins(mut self, on_button: u8, off_button: u8, led: u8) -> Self {
        self.on_button = on_button;
        self.off_button = off_button;
        self.led = led;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name, printed in the startup banner
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("rs-sketchbook"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.pins, PinConfig::default());
        assert!(config.button.pull_up);
        assert_eq!(config.button.hold_ms, 100);
        assert_eq!(config.park_assist.min_cm, 3.0);
        assert_eq!(config.park_assist.max_cm, 30.0);
        assert_eq!(config.park_assist.min_hz, 1.0);
        assert_eq!(config.park_assist.max_hz, 8.0);
        assert_eq!(config.blink.interval_ms, 1000);
        assert_eq!(config.button_led, ButtonLedConfig::default());
        assert_eq!(config.device.name.as_str(), "rs-sketchbook");
    }

    #[test]
    fn builder_pattern() {
        let config = Config::default()
            .with_pins(PinConfig::default().with_button(26).with_sensor(27, 22).with_buzzer(21))
            .with_button(DebounceConfig::default().with_pull_up(false).with_hold_ms(20))
            .with_blink(BlinkConfig::default().with_pins(&[1, 2, 3]).with_interval_ms(250))
            .with_button_led(ButtonLedConfig::default().with_pins(2, 3, 17))
            .with_device(DeviceConfig::default().with_name("garage"));

        assert_eq!(config.pins.button, 26);
        assert_eq!(config.pins.trigger, 27);
        assert_eq!(config.pins.echo, 22);
        assert_eq!(config.pins.buzzer, 21);
        assert!(!config.button.pull_up);
        assert_eq!(config.button.hold_ms, 20);
        assert_eq!(config.blink.pins.as_slice(), &[1, 2, 3]);
        assert_eq!(config.blink.interval_ms, 250);
        assert_eq!(config.button_led.on_button, 2);
        assert_eq!(config.button_led.off_button, 3);
        assert_eq!(config.button_led.led, 17);
        assert_eq!(config.device.name.as_str(), "garage");
    }

    #[test]
    fn park_assist_ranges_are_ordered() {
        let cfg = ParkAssistConfig::default()
            .with_range_cm(40.0, 10.0)
            .with_rate_hz(6.0, 2.0)
            .with_measure_interval_ms(100);
        assert_eq!(cfg.min_cm, 10.0);
        assert_eq!(cfg.max_cm, 40.0);
        assert_eq!(cfg.min_hz, 2.0);
        assert_eq!(cfg.max_hz, 6.0);
        assert_eq!(cfg.measure_interval_ms, 100);
    }

    #[test]
    fn short_string_truncation() {
        let long = "a".repeat(100);
        assert_eq!(short_string(&long).len(), MAX_SHORT_STRING);
    }

    #[test]
    fn short_string_utf8_boundary() {
        // 31 ASCII bytes + a 2-byte char must not split the char
        let s = format!("{}é", "a".repeat(31));
        let hs = short_string(&s);
        assert_eq!(hs.len(), 31);
    }

    #[test]
    fn pin_list_truncation() {
        let pins: Vec<u8> = (0..30).collect();
        let list = pin_list(&pins);
        assert_eq!(list.len(), MAX_BLINK_PINS);
        assert_eq!(list[MAX_BLINK_PINS - 1], 19);
    }
}
