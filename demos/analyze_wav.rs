//! Analyze a WAV recording and print the result as JSON
//!
//! ```text
//! cargo run --example analyze_wav -- speech.wav [transcript.json] [config.json]
//! ```
//!
//! `transcript.json` holds fillers, transcription and semantic scores
//! (every field optional); `config.json` overrides any analysis parameter.

use prosody_coach::{analyze_speech, AnalysisConfig, TranscriptInput};
use std::error::Error;

fn load_wav(path: &str) -> Result<(Vec<f32>, u32), Box<dyn Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    // Downmix interleaved channels
    let channels = spec.channels.max(1) as usize;
    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(wav_path) = args.get(1) else {
        eprintln!("usage: analyze_wav <speech.wav> [transcript.json] [config.json]");
        std::process::exit(2);
    };

    let input: TranscriptInput = match args.get(2) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => TranscriptInput::default(),
    };

    let config = match args.get(3) {
        Some(path) => AnalysisConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => AnalysisConfig::default(),
    };

    let (samples, sample_rate) = load_wav(wav_path)?;
    log::info!(
        "Loaded {}: {} samples at {} Hz",
        wav_path,
        samples.len(),
        sample_rate
    );

    let result = analyze_speech(&samples, sample_rate, &input, &config)?;
    println!("{}", result.to_json()?);

    Ok(())
}
