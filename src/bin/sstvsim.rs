//! SSTV waveform synthesizer CLI
//!
//! Synthesizes a calibration header, VIS byte, and a test pattern for a named mode,
//! writing the result as a 16-bit PCM WAV file for use as a decoder test fixture.
//!
//! **Usage**:
//! ```bash
//! cargo run --bin sstvsim -- martin-m1 output.wav [--pattern checkerboard]
//! ```

use std::env;

use sstv_decode::mode::Mode;
use sstv_decode::simulation::synth::{synth_transmission, TestPattern};
use sstv_decode::wav;

fn mode_for_name(name: &str) -> Option<Mode> {
    let vis = match name {
        "robot-12" => 0,
        "robot-24" => 4,
        "robot-36" => 8,
        "robot-72" => 12,
        "martin-m1" => 44,
        "martin-m2" => 40,
        "scottie-s1" => 60,
        "scottie-s2" => 56,
        "scottie-dx" => 76,
        "pd90" => 99,
        "pd120" => 95,
        "pd160" => 98,
        "pd180" => 96,
        "pd240" => 97,
        "pd290" => 94,
        "pd50" => 93,
        _ => return None,
    };
    Mode::from_vis(vis)
}

fn pattern_for_name(name: &str) -> Option<TestPattern> {
    match name {
        "white" => Some(TestPattern::SolidWhite),
        "black" => Some(TestPattern::SolidBlack),
        "gradient" => Some(TestPattern::Gradient),
        "checkerboard" => Some(TestPattern::Checkerboard),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut positional = Vec::new();
    let mut pattern = TestPattern::Gradient;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pattern" => {
                i += 1;
                let name = args.get(i).map(String::as_str).unwrap_or("");
                pattern = match pattern_for_name(name) {
                    Some(p) => p,
                    None => {
                        eprintln!("Unknown pattern: {name}");
                        std::process::exit(1);
                    }
                };
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    if positional.len() != 2 {
        eprintln!(
            "Usage: {} <mode> <output.wav> [--pattern white|black|gradient|checkerboard]",
            args[0]
        );
        eprintln!(
            "Modes: robot-12, robot-24, robot-36, robot-72, martin-m1, martin-m2, \
             scottie-s1, scottie-s2, scottie-dx, pd50, pd90, pd120, pd160, pd180, pd240, pd290"
        );
        std::process::exit(1);
    }

    let mode = match mode_for_name(&positional[0]) {
        Some(m) => m,
        None => {
            eprintln!("Unknown mode: {}", positional[0]);
            std::process::exit(1);
        }
    };
    let output_path = &positional[1];

    println!(
        "Synthesizing {} ({}x{}) with {:?} pattern",
        mode.name(),
        mode.horizontal_pixels(),
        mode.vertical_lines(),
        pattern
    );

    let samples = synth_transmission(mode, pattern);
    println!("  {} samples ({:.2} s)", samples.len(), samples.len() as f32 / 12_000.0);

    match wav::write_normalized_wav(output_path, &samples, 12_000) {
        Ok(()) => println!("  wrote {output_path}"),
        Err(e) => {
            eprintln!("Error writing WAV: {e}");
            std::process::exit(1);
        }
    }
}
