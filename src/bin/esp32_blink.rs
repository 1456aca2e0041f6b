//! ESP32-C3 SuperMini "hello, world": blinks the onboard LED.
//!
//! Any extra output pins listed in the blink configuration toggle together
//! with the LED, so a buzzer or external LED can be attached for testing.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_blink
//! ```

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use rs_sketchbook::hal::esp32::{pins, Esp32Board};
use rs_sketchbook::{Blink, BlinkConfig, Config, DeviceConfig};

/// Loop interval in milliseconds
const LOOP_INTERVAL_MS: u32 = 10;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config::default()
        .with_blink(BlinkConfig::default().with_pins(&[pins::LED, pins::BUZZER]))
        .with_device(DeviceConfig::default().with_name("blink"));

    println!();
    println!("The board says hello! ({})", config.device.name);

    let peripherals = Peripherals::take()?;
    let mut board = Esp32Board::new(peripherals.pins);

    let mut blink = Blink::from_config(&config.blink);
    blink.initialize(&mut board)?;
    println!(
        "[OK] Blinking GPIO {:?} every {}ms",
        blink.pins(),
        config.blink.interval_ms
    );

    loop {
        if let Some(level) = blink.poll(&mut board)? {
            println!("{}", if level { "Switching pins on." } else { "Switching pins off." });
        }
        FreeRtos::delay_ms(LOOP_INTERVAL_MS);
    }
}
