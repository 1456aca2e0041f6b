//! ESP32-C3 SuperMini parking aid.
//!
//! Hold the button and the buzzer beeps faster the closer the obstacle in
//! front of the ultrasonic sensor gets, down to a continuous tone.
//!
//! The loop runs free (no sleep) so the beep oscillator and the button
//! filter are polled as often as possible. Ultrasonic pings are rate
//! limited by `ParkAssistConfig::measure_interval_ms`.
//!
//! # Hardware Setup
//!
//! ```text
//!   [GPIO6]  --> [Button] --> [GND]
//!   [GPIO7]  --> [Level shifter] --> [HC-SR04 Trig]
//!   [GPIO10] <-- [Level shifter] <-- [HC-SR04 Echo]
//!   [GPIO3]  --> [Buzzer SIGNAL]
//! ```
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_park_assist
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_park_assist
//! ```

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use rs_sketchbook::hal::esp32::{pins, Esp32Board};
use rs_sketchbook::{Config, DeviceConfig, ParkAssist, PinConfig, Tone};

/// Ticks between status lines on the console
const REPORT_EVERY: u32 = 5_000;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config::default()
        .with_pins(
            PinConfig::default()
                .with_button(pins::BUTTON)
                .with_sensor(pins::TRIGGER, pins::ECHO)
                .with_buzzer(pins::BUZZER),
        )
        .with_device(DeviceConfig::default().with_name("park-assist"));

    println!();
    println!("================================");
    println!("  {}", config.device.name);
    println!("================================");
    println!();

    let peripherals = Peripherals::take()?;
    let mut board = Esp32Board::new(peripherals.pins);

    let mut assist = ParkAssist::new(&config);
    assist.initialize(&mut board)?;
    println!(
        "[OK] Button GPIO{} (pull-up, {}ms debounce)",
        config.pins.button, config.button.hold_ms
    );
    println!(
        "[OK] HC-SR04 trigger GPIO{} / echo GPIO{}",
        config.pins.trigger, config.pins.echo
    );
    println!("[OK] Buzzer GPIO{}", config.pins.buzzer);

    println!();
    println!(
        "Hold the button to measure ({:.0}-{:.0}cm range)",
        config.park_assist.min_cm, config.park_assist.max_cm
    );
    println!();

    let mut ticks: u32 = 0;
    let mut was_engaged = false;

    loop {
        let state = assist.tick(&mut board)?;

        if state.engaged != was_engaged {
            println!("{}", if state.engaged { "Measuring" } else { "Idle" });
            was_engaged = state.engaged;
        }

        ticks = ticks.wrapping_add(1);
        if state.engaged && ticks % REPORT_EVERY == 0 {
            match (state.distance_cm, state.tone) {
                (Some(cm), Tone::Beep { frequency_hz }) => {
                    println!("Distance: {:.1}cm, beeping at {:.1}Hz", cm, frequency_hz)
                }
                (Some(cm), Tone::Continuous) => println!("Distance: {:.1}cm, STOP", cm),
                (Some(cm), Tone::Silent) => println!("Distance: {:.1}cm", cm),
                (None, _) => println!("Distance: out of range"),
            }
        }

        // keep the idle task fed without stretching the beep
        if ticks % 1_000 == 0 {
            FreeRtos::delay_ms(1);
        }
    }
}
