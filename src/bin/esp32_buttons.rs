//! ESP32-C3 SuperMini two-button LED switch.
//!
//! One button switches the onboard LED on, the other switches it off.
//! Without a press the LED keeps its last state.
//!
//! # Hardware Setup
//!
//! ```text
//!   [GPIO4] --> [On button]  --> [GND]
//!   [GPIO5] --> [Off button] --> [GND]
//!   [GPIO8] --> onboard LED
//! ```
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_buttons
//! ```

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use rs_sketchbook::hal::esp32::{pins, Esp32Board};
use rs_sketchbook::{ButtonLed, ButtonLedConfig, Config, DeviceConfig};

/// Loop interval in milliseconds, well below the debounce hold time
const LOOP_INTERVAL_MS: u32 = 5;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config::default()
        .with_button_led(ButtonLedConfig::default().with_pins(
            pins::ON_BUTTON,
            pins::OFF_BUTTON,
            pins::LED,
        ))
        .with_device(DeviceConfig::default().with_name("buttons"));

    println!();
    println!("{}", config.device.name);

    let peripherals = Peripherals::take()?;
    let mut board = Esp32Board::new(peripherals.pins);

    let mut sketch = ButtonLed::new(&config);
    sketch.initialize(&mut board)?;
    println!(
        "[OK] On button GPIO{}, off button GPIO{} ({}ms debounce)",
        config.button_led.on_button, config.button_led.off_button, config.button.hold_ms
    );
    println!("[OK] LED GPIO{}", config.button_led.led);

    loop {
        if let Some(on) = sketch.poll(&mut board)? {
            println!("LED {}", if on { "on" } else { "off" });
        }
        FreeRtos::delay_ms(LOOP_INTERVAL_MS);
    }
}
