//! Desktop waveform simulation.
//!
//! Runs a [`PhaseOscillator`] against a simulated clock and prints every
//! waveform as a column of ASCII bars, one line per phase step. Useful to
//! eyeball the shape of the tables without an oscilloscope.
//!
//! A simulated button is also debounced in the same loop: it bounces for a
//! few milliseconds at t=0.25s and the sine is only shown while it is held.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example waveform_sim
//! ```

use rs_sketchbook::hal::MockBoard;
use rs_sketchbook::traits::Clock;
use rs_sketchbook::{DebouncedInput, PhaseOscillator, Waveform, TABLE_SIZE};

/// Simulated loop period
const LOOP_US: u64 = 100;

/// Slow enough that one cycle spans 250ms of simulated time
const FREQUENCY_HZ: f32 = 4.0;

const BUTTON_PIN: u8 = 2;

fn bar(value: u8) -> String {
    let width = usize::from(value) / 16;
    format!("{:<16}", "#".repeat(width))
}

fn main() {
    let mut board = MockBoard::new().with_read_cost_us(0);
    let mut button = DebouncedInput::new(BUTTON_PIN, true, 20);
    if let Err(err) = button.initialize(&mut board) {
        eprintln!("failed to set up button: {}", err);
        return;
    }

    // Press at 250ms with 4ms of contact bounce
    for (i, at_ms) in [250u64, 251, 252, 253, 254].iter().enumerate() {
        board.schedule(BUTTON_PIN, at_ms * 1_000, i % 2 == 1);
    }

    let waveforms = [
        ("phasor", Waveform::Phasor),
        ("square", Waveform::square()),
        ("pwm25", Waveform::Pwm { pulse_width: 63 }),
        ("tri", Waveform::triangle()),
        ("ramp", Waveform::Saw { peak_width: 255 }),
    ];

    let mut osc = PhaseOscillator::starting_at(board.now_micros());
    let mut last_phase = osc.phase();

    println!("Waveform simulation at {}Hz, {} steps per cycle", FREQUENCY_HZ, TABLE_SIZE);
    println!();
    print!("{:>6} ", "t(ms)");
    for (name, _) in &waveforms {
        print!("{:<16} ", name);
    }
    println!("sine (button)");

    // Two full cycles
    let end_us = 2 * 1_000_000 / FREQUENCY_HZ as u64;
    while board.now_micros() < end_us {
        board.clock.advance_us(LOOP_US);
        let now = board.now_micros();

        button.poll(&board);
        if button.changed() {
            println!(
                "{:>6} button {}",
                now / 1_000,
                if button.is_active() { "pressed" } else { "released" }
            );
        }

        osc.update_phase(FREQUENCY_HZ, now);
        if osc.phase() == last_phase {
            continue;
        }
        last_phase = osc.phase();

        print!("{:>6} ", now / 1_000);
        for (_, waveform) in &waveforms {
            print!("{} ", bar(waveform.at_phase(osc.phase())));
        }
        if button.is_active() {
            println!("{}", bar(Waveform::Sine.at_phase(osc.phase())));
        } else {
            println!();
        }
    }
}
