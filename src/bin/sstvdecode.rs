//! SSTV decode CLI
//!
//! Reads a WAV file and feeds it through a [`sstv_decode::Decoder`], reporting each
//! framed image to stdout and optionally writing its RGB888 payload to a `.ppm` file.
//!
//! **Usage**:
//! ```bash
//! cargo run --bin sstvdecode -- input.wav [--ppm-prefix out]
//! ```

use std::env;

use sstv_decode::{io::VecByteSink, wav, Decoder, DecoderConfig};

fn main() {
    sstv_decode::tracing_init::init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut input_path: Option<String> = None;
    let mut ppm_prefix: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ppm-prefix" => {
                i += 1;
                ppm_prefix = args.get(i).cloned();
            }
            arg if !arg.starts_with('-') => input_path = Some(arg.to_string()),
            other => {
                eprintln!("Unknown option: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Usage: {} <input.wav> [--ppm-prefix out]", args[0]);
            std::process::exit(1);
        }
    };

    let samples = match wav::read_normalized_wav(&input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading WAV: {e}");
            std::process::exit(1);
        }
    };
    println!("Read {} samples from {input_path}", samples.len());

    let mut source = sstv_decode::io::VecSampleSource::new(samples);
    let mut sink = VecByteSink::new();
    let mut decoder = match Decoder::new(DecoderConfig::default()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Invalid decoder configuration: {e}");
            std::process::exit(1);
        }
    };

    while decoder.can_process(&source) {
        decoder.process(&mut source, &mut sink);
    }

    report_images(sink.committed(), ppm_prefix.as_deref());
}

/// Walk the committed byte stream, splitting on `SYNC` markers, and report each framed
/// image. Optionally dump each payload as a binary PPM.
fn report_images(bytes: &[u8], ppm_prefix: Option<&str>) {
    let mut pos = 0;
    let mut index = 0;
    while pos + 10 <= bytes.len() {
        if &bytes[pos..pos + 4] != b"SYNC" {
            pos += 1;
            continue;
        }
        let vis = u16::from_le_bytes([bytes[pos + 4], bytes[pos + 5]]);
        let pixels = u16::from_le_bytes([bytes[pos + 6], bytes[pos + 7]]);
        let lines = u16::from_le_bytes([bytes[pos + 8], bytes[pos + 9]]);
        let payload_len = pixels as usize * lines as usize * 3;
        let payload_start = pos + 10;
        let payload_end = (payload_start + payload_len).min(bytes.len());
        let payload = &bytes[payload_start..payload_end];

        index += 1;
        println!(
            "Image {index}: vis={vis} {pixels}x{lines} ({} of {payload_len} payload bytes)",
            payload.len()
        );

        if let Some(prefix) = ppm_prefix {
            let path = format!("{prefix}_{index}.ppm");
            if let Err(e) = write_ppm(&path, pixels, lines, payload) {
                eprintln!("  failed to write {path}: {e}");
            } else {
                println!("  wrote {path}");
            }
        }

        pos = payload_end;
    }

    if index == 0 {
        println!("No images decoded.");
    }
}

fn write_ppm(path: &str, pixels: u16, lines: u16, rgb: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = std::fs::File::create(path)?;
    write!(file, "P6\n{pixels} {lines}\n255\n")?;
    file.write_all(rgb)?;
    Ok(())
}
