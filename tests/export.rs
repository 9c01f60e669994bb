// WAV bounce and spectrum checks, only built with their features

#[cfg(feature = "bounce")]
#[test]
fn test_bounce_scenario_file() {
    use dacwave::bounce::bounce_file;
    use dacwave::format::FormatConfig;
    use dacwave::gen::Scenario;
    use dacwave::reader::WaveFile;
    use dacwave::suite::{generate_scenario, SuiteConfig};

    let dir = tempfile::tempdir().unwrap();
    let config = SuiteConfig::new(dir.path()).with_partition_bytes(64 + 8 * 1024);
    let entry = generate_scenario(&config, Scenario::CapAging).unwrap();

    let format = FormatConfig::d8cw();
    let wave = WaveFile::open(&entry.path, &format).unwrap();
    let wav_path = dir.path().join("cap_aging.wav");
    bounce_file(&wave, &format, &wav_path).unwrap();

    let mut reader = hound::WavReader::open(&wav_path).unwrap();
    assert_eq!(reader.spec().channels, 4);
    assert_eq!(reader.spec().sample_rate, 102_400);

    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 1024 * 4);
    assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    // Channel B of the aging scenario sits well below zero
    assert!(samples.iter().skip(1).step_by(4).all(|&s| s < 0.0));
}

#[cfg(feature = "analysis")]
#[test]
fn test_ripple_frequency_of_cap_aging() {
    use dacwave::analysis::{channel_voltages, SpectrumAnalyzer};
    use dacwave::format::FormatConfig;
    use dacwave::gen::{Scenario, ScenarioSource, SUITE_SEED};
    use dacwave::reader::{read_frames, verify_stream};
    use dacwave::writer::WaveWriter;
    use std::io::Cursor;

    // One second so 100Hz lands on an exact bin
    let rate = 8192;
    let mut source = ScenarioSource::new(Scenario::CapAging, rate, rate, SUITE_SEED);
    let mut cursor = Cursor::new(Vec::new());
    WaveWriter::new(FormatConfig::d8cw())
        .encode(&mut cursor, rate, rate, &mut source)
        .unwrap();

    let header = verify_stream(&mut cursor, &FormatConfig::d8cw(), None).unwrap();
    let frames = read_frames(&mut cursor, &header).unwrap();
    let a = channel_voltages(&frames, 0, &FormatConfig::d8cw().quantizer());

    let mut analyzer = SpectrumAnalyzer::new(f64::from(rate));
    let peak = analyzer.dominant_frequency(&a).unwrap();
    assert!((peak - 100.0).abs() < 1.5, "peak at {}", peak);
}
