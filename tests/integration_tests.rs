//! Integration tests for the speech analysis engine

use prosody_coach::analysis::messages::Advice;
use prosody_coach::{
    analyze_batch, analyze_speech, generate_report, AnalysisConfig, AnalysisError,
    AnalysisRequest, FillerWord, FusionMode, Locale, MarkerType, ProsodyMetrics,
    SemanticAnalysis, TranscriptInput,
};
use std::io::Cursor;

const SR: u32 = 16000;

/// Syllable-like voiced bursts alternating between two pitches
fn speech_like(seconds: f32) -> Vec<f32> {
    let n = (seconds * SR as f32) as usize;
    let interval = (0.25 * SR as f32) as usize;
    let burst = (0.15 * SR as f32) as usize;
    let mut samples = vec![0.0f32; n];

    for (k, pos) in (0..n).step_by(interval).enumerate() {
        let freq = if k % 2 == 0 { 140.0 } else { 190.0 };
        let amp = if k % 3 == 0 { 0.6 } else { 0.35 };
        for i in pos..(pos + burst).min(n) {
            let t = (i - pos) as f32 / SR as f32;
            samples[i] = amp * (2.0 * std::f32::consts::PI * freq * t).sin();
        }
    }
    samples
}

/// Speech, 1.2 s of silence, speech
fn speech_with_pause() -> Vec<f32> {
    let mut samples = speech_like(3.0);
    samples.extend(std::iter::repeat(0.0).take((1.2 * SR as f32) as usize));
    samples.extend(speech_like(3.0));
    samples
}

fn metrics(
    pitch_std: f32,
    pause_locations: Vec<f32>,
    energy_variance: f32,
    speech_rate_wpm: u32,
) -> ProsodyMetrics {
    ProsodyMetrics {
        pitch_mean: 150.0,
        pitch_std,
        tempo_bpm: 100.0,
        pause_count: pause_locations.len() as u32,
        pause_locations,
        energy_variance,
        speech_rate_wpm,
    }
}

fn fillers(count: usize, duration: f32) -> Vec<FillerWord> {
    let step = duration / (count as f32 + 1.0);
    (1..=count)
        .map(|i| {
            let start = i as f32 * step;
            FillerWord::new("um", start, start + 0.3, 0.9)
        })
        .collect()
}

/// Encode samples as 16-bit PCM WAV and decode them back, the way a caller
/// would hand a recorded file to the engine
fn wav_round_trip(samples: &[f32]) -> Result<(Vec<f32>, u32), Box<dyn std::error::Error>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SR,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec)?;
        for &s in samples {
            writer.write_sample((s * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }

    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let max_value = (1 << (spec.bits_per_sample - 1)) as f32;
    let decoded = reader
        .samples::<i32>()
        .map(|s| s.map(|s| s as f32 / max_value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((decoded, spec.sample_rate))
}

#[test]
fn test_balanced_speaker_scenario() {
    let m = metrics(30.0, vec![], 0.35, 135);
    let report = generate_report(&m, &[], 60.0, None, &AnalysisConfig::default());

    assert_eq!(report.scores.pacing, 10.0);
    assert_eq!(report.scores.nervousness, 0.0);
    assert_eq!(report.scores.confidence, 10.0);
    assert_eq!(report.fusion, FusionMode::AcousticOnly);
    assert!(report.timeline_markers.is_empty());
    assert_eq!(
        report.recommendations[0],
        Advice::FillersExcellent.render(Locale::En)
    );
}

#[test]
fn test_filler_heavy_scenario() {
    let m = metrics(30.0, vec![], 0.35, 135);
    let words = fillers(12, 60.0);
    let report = generate_report(&m, &words, 60.0, None, &AnalysisConfig::default());

    assert!(report.scores.clarity <= 3.4, "clarity {}", report.scores.clarity);
    assert!(report.recommendations[0].starts_with("Reduce filler words"));
    assert_eq!(report.timeline_markers.len(), 12);
    assert!(report
        .timeline_markers
        .iter()
        .all(|m| m.marker_type == MarkerType::Filler));
}

#[test]
fn test_semantic_fusion_scenario() {
    let m = metrics(60.0, vec![], 0.1, 135);
    let config = AnalysisConfig::default();

    let acoustic = generate_report(&m, &[], 60.0, None, &config);
    assert_eq!(acoustic.scores.confidence, 6.0);

    let semantic = SemanticAnalysis::new(9.0, 5.0, 5.0);
    let fused = generate_report(&m, &[], 60.0, Some(&semantic), &config);
    assert_eq!(fused.scores.confidence, 7.2);
    assert_eq!(fused.fusion, FusionMode::SemanticFused);
}

#[test]
fn test_pause_marker_scenario() {
    let m = metrics(30.0, vec![5.0, 12.0], 0.35, 135);
    let report = generate_report(&m, &[], 60.0, None, &AnalysisConfig::default());

    let spans: Vec<(f32, f32)> = report
        .timeline_markers
        .iter()
        .map(|m| (m.start, m.end))
        .collect();
    assert_eq!(spans.len(), 2);
    assert!((spans[0].0 - 5.0).abs() < 1e-5 && (spans[0].1 - 5.8).abs() < 1e-5);
    assert!((spans[1].0 - 12.0).abs() < 1e-5 && (spans[1].1 - 12.8).abs() < 1e-5);
}

#[test]
fn test_scores_bounded_for_adversarial_metrics() {
    let config = AnalysisConfig::default();
    let semantics = [
        None,
        Some(SemanticAnalysis::new(0.0, 0.0, 0.0)),
        Some(SemanticAnalysis::new(10.0, 10.0, 10.0)),
    ];

    for &pitch_std in &[0.0, 19.9, 35.0, 50.1, 1e6] {
        for &energy in &[0.0, 0.3, 0.55, 1e9] {
            for &wpm in &[0, 99, 135, 181, u32::MAX] {
                for &pauses in &[0usize, 7, 60] {
                    for &duration in &[0.0f32, 0.5, 60.0, 3600.0] {
                        for &filler_count in &[0usize, 40] {
                            let locations = (0..pauses).map(|i| i as f32 * 0.5).collect();
                            let m = metrics(pitch_std, locations, energy, wpm);
                            let words = fillers(filler_count, duration.max(1.0));

                            for semantic in &semantics {
                                let report =
                                    generate_report(&m, &words, duration, semantic.as_ref(), &config);
                                let s = report.scores;
                                for score in [s.confidence, s.clarity, s.pacing, s.nervousness] {
                                    assert!((0.0..=10.0).contains(&score), "score {}", score);
                                    let tenths = score * 10.0;
                                    assert!((tenths - tenths.round()).abs() < 1e-3);
                                }
                                assert_eq!(
                                    report.timeline_markers.len(),
                                    filler_count + pauses
                                );
                                assert!(report
                                    .timeline_markers
                                    .windows(2)
                                    .all(|w| w[0].start <= w[1].start));
                                assert!(report.recommendations.len() >= 2);
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_report_is_idempotent() {
    let m = metrics(42.0, vec![3.0, 9.5], 0.28, 162);
    let words = fillers(5, 45.0);
    let semantic = SemanticAnalysis::new(7.0, 8.0, 8.5);
    let config = AnalysisConfig::default();

    let first = generate_report(&m, &words, 45.0, Some(&semantic), &config);
    let second = generate_report(&m, &words, 45.0, Some(&semantic), &config);
    assert_eq!(first, second);
}

#[test]
fn test_analyze_speech_end_to_end() {
    let samples = speech_with_pause();
    let input = TranscriptInput {
        fillers: vec![
            FillerWord::new("um", 1.1, 1.3, 0.92),
            FillerWord::new("uh", 5.0, 4.0, 0.8),
        ],
        transcription: Some("so um today I want to talk about".to_string()),
        semantic: None,
    };

    let result = analyze_speech(&samples, SR, &input, &AnalysisConfig::default())
        .expect("Analysis should succeed");

    let m = &result.metrics;
    assert!(m.pitch_mean > 120.0 && m.pitch_mean < 220.0, "pitch {}", m.pitch_mean);
    assert!(m.pitch_std > 0.0);
    assert_eq!(m.pause_count, 1, "pauses at {:?}", m.pause_locations);
    assert_eq!(m.pause_locations.len(), 1);
    assert!(
        m.pause_locations[0] > 2.7 && m.pause_locations[0] < 3.3,
        "pause at {}",
        m.pause_locations[0]
    );
    assert!(m.speech_rate_wpm > 0);
    assert!(m.energy_variance > 0.0);

    assert!((result.duration_seconds - 7.2).abs() < 1e-3);
    assert_eq!(result.filler_words.len(), 1);
    assert_eq!(result.metadata.dropped_filler_count, 1);
    assert_eq!(result.metadata.sample_rate, SR);
    assert_eq!(result.fusion, FusionMode::AcousticOnly);
    assert_eq!(result.timeline_markers.len(), 2);
    assert_eq!(result.transcription.as_deref(), Some("so um today I want to talk about"));
    assert_eq!(result.report().scores, result.scores);
}

#[test]
fn test_silence_yields_zero_metrics() {
    let samples = vec![0.0f32; SR as usize * 4];
    let result = analyze_speech(&samples, SR, &TranscriptInput::default(), &AnalysisConfig::default())
        .expect("Silence is not an error");

    assert_eq!(result.metrics.pitch_mean, 0.0);
    assert_eq!(result.metrics.tempo_bpm, 0.0);
    assert_eq!(result.metrics.pause_count, 0);
    assert_eq!(result.metrics.speech_rate_wpm, 0);
    assert!(!result.metadata.flags.is_empty());
    assert!(result.recommendations.len() >= 2);
}

#[test]
fn test_invalid_audio_is_rejected() {
    let config = AnalysisConfig::default();
    let input = TranscriptInput::default();

    assert!(matches!(
        analyze_speech(&[], SR, &input, &config),
        Err(AnalysisError::InvalidAudio(_))
    ));
    assert!(matches!(
        analyze_speech(&[0.1; 1000], 0, &input, &config),
        Err(AnalysisError::InvalidAudio(_))
    ));

    let mut samples = vec![0.1f32; 1000];
    samples[500] = f32::NAN;
    assert!(matches!(
        analyze_speech(&samples, SR, &input, &config),
        Err(AnalysisError::InvalidAudio(_))
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = AnalysisConfig::default();
    config.prosody.hop_size = 0;
    let result = analyze_speech(&[0.1; 4000], SR, &TranscriptInput::default(), &config);
    assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
}

#[test]
fn test_wav_round_trip_analysis() {
    let original = speech_like(4.0);
    let (decoded, sample_rate) = wav_round_trip(&original).expect("WAV round trip");
    assert_eq!(sample_rate, SR);
    assert_eq!(decoded.len(), original.len());

    let config = AnalysisConfig::default();
    let input = TranscriptInput::default();
    let from_wav = analyze_speech(&decoded, sample_rate, &input, &config).unwrap();
    let direct = analyze_speech(&original, SR, &input, &config).unwrap();

    assert!((from_wav.metrics.pitch_mean - direct.metrics.pitch_mean).abs() < 2.0);
    assert_eq!(from_wav.metrics.pause_count, direct.metrics.pause_count);
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let good = speech_like(3.0);
    let input = TranscriptInput::with_fillers(fillers(2, 3.0));
    let empty_input = TranscriptInput::default();
    let requests = [
        AnalysisRequest {
            samples: &good,
            sample_rate: SR,
            input: &input,
        },
        AnalysisRequest {
            samples: &[],
            sample_rate: SR,
            input: &empty_input,
        },
        AnalysisRequest {
            samples: &good,
            sample_rate: SR,
            input: &empty_input,
        },
    ];

    let results = analyze_batch(&requests, &AnalysisConfig::default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().filler_words.len(), 2);
    assert!(matches!(results[1], Err(AnalysisError::InvalidAudio(_))));
    assert!(results[2].as_ref().unwrap().filler_words.is_empty());
    assert_eq!(
        results[0].as_ref().unwrap().metrics,
        results[2].as_ref().unwrap().metrics
    );
}

#[test]
fn test_spanish_locale_from_json_config() {
    let config = AnalysisConfig::from_json_str(r#"{"locale": "es"}"#).unwrap();
    let m = metrics(30.0, vec![4.0], 0.35, 135);
    let words = fillers(12, 60.0);
    let report = generate_report(&m, &words, 60.0, None, &config);

    assert!(report.recommendations[0].starts_with("Reduce las muletillas"));
    assert!(report
        .timeline_markers
        .iter()
        .any(|m| m.label == "Pausa prolongada"));
}

#[test]
fn test_result_serializes_to_json() {
    let samples = speech_like(2.0);
    let input = TranscriptInput {
        semantic: SemanticAnalysis::from_llm_response(
            "```json\n{\"semantic_confidence\": 8, \"semantic_clarity\": 7, \"content_score\": 6}\n```",
        ),
        ..TranscriptInput::default()
    };
    let result = analyze_speech(&samples, SR, &input, &AnalysisConfig::default()).unwrap();
    let json = result.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["fusion"], "semantic_fused");
    assert!(value["metrics"]["pause_locations"].is_array());
    assert!(value["scores"]["confidence"].is_number());
    assert_eq!(value["metadata"]["locale"], "en");
    assert!(value.get("transcription").is_none());
}

#[test]
fn test_report_ignores_malformed_fillers() {
    let m = metrics(30.0, vec![], 0.35, 135);
    let words = vec![
        FillerWord::new("uh", 5.0, 4.0, 1.7),
        FillerWord::new("", f32::NAN, 1.0, -3.0),
        FillerWord::new("um", 2.0, 2.3, 0.8),
    ];
    let report = generate_report(&m, &words, 60.0, None, &AnalysisConfig::default());

    assert_eq!(report.timeline_markers.len(), 1);
    assert!(report
        .timeline_markers
        .iter()
        .all(|marker| marker.start <= marker.end && marker.start.is_finite()));
    assert_eq!(report.timeline_markers[0].label, "Filler: 'um'");
    // One valid filler per minute is still the excellent band
    assert_eq!(
        report.recommendations[0],
        Advice::FillersExcellent.render(Locale::En)
    );

    let clean = generate_report(&m, &words[2..], 60.0, None, &AnalysisConfig::default());
    assert_eq!(report, clean);
}
