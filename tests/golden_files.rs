// Byte-exact checks of generated files against known fixtures

use std::io::Cursor;

use dacwave::format::{Checksum, FormatConfig};
use dacwave::gen::{LegacyConfig, LegacySource, Scenario, ScenarioSource, SUITE_SEED};
use dacwave::reader::{read_frames, verify_stream};
use dacwave::writer::WaveWriter;

fn encode_scenario(scenario: Scenario, sample_rate: u32, sample_count: u32) -> Vec<u8> {
    let mut source = ScenarioSource::new(scenario, sample_rate, sample_count, SUITE_SEED);
    let mut cursor = Cursor::new(Vec::new());
    WaveWriter::new(FormatConfig::d8cw())
        .encode(&mut cursor, sample_rate, sample_count, &mut source)
        .unwrap();
    cursor.into_inner()
}

#[test]
fn test_scenario_checksums_and_first_frames() {
    let expected = [
        (Scenario::Normal, 0xF205_4F00, [42598, 22937, 37683, 32921]),
        (Scenario::AcCoupling, 0xA6DC_3C93, [42598, 22937, 37683, 32911]),
        (Scenario::BusGround, 0x8930_CA36, [34406, 27197, 42598, 36700]),
        (Scenario::Insulation, 0x5F8F_AFE4, [42557, 22873, 37752, 33606]),
        (Scenario::CapAging, 0x4397_2349, [40632, 24903, 37683, 32921]),
        (Scenario::PwmAbnormal, 0x9061_07BF, [42598, 22937, 37622, 32899]),
        (Scenario::IgbtFault, 0xDF4B_1904, [38666, 26869, 32768, 34560]),
    ];

    for (scenario, checksum, first) in expected {
        let bytes = encode_scenario(scenario, 102_400, 4096);
        assert_eq!(bytes.len(), 64 + 4096 * 8, "{} length", scenario);

        let mut cursor = Cursor::new(bytes);
        let header = verify_stream(&mut cursor, &FormatConfig::d8cw(), None).unwrap();
        assert_eq!(
            header.checksum, checksum,
            "{}: checksum 0x{:08X}",
            scenario, header.checksum
        );

        let frames = read_frames(&mut cursor, &header).unwrap();
        assert_eq!(frames[0], first, "{} first frame", scenario);
    }
}

#[test]
fn test_legacy_default_file() {
    let config = LegacyConfig::default();
    let mut source = LegacySource::new(config);
    let mut cursor = Cursor::new(Vec::new());
    let header = WaveWriter::new(FormatConfig::d8cw())
        .encode(&mut cursor, config.sample_rate, config.sample_count, &mut source)
        .unwrap();
    let bytes = cursor.into_inner();

    assert_eq!(header.sample_rate, 240_000);
    assert_eq!(header.data_bytes, 32768);
    assert_eq!(header.checksum, 0x1F4D_BC8F);
    assert_eq!(Checksum::of(&bytes[64..]), header.checksum);
}

#[test]
fn test_header_bytes_little_endian() {
    let bytes = encode_scenario(Scenario::Normal, 102_400, 4096);

    // "WCB8" on disk spells the magic 0x44384357 little-endian
    assert_eq!(&bytes[0..4], &[0x57, 0x43, 0x38, 0x44]);
    assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &102_400u32.to_le_bytes());
    assert_eq!(&bytes[12..16], &4096u32.to_le_bytes());
    assert_eq!(&bytes[16..20], &4u32.to_le_bytes());
    assert_eq!(&bytes[20..24], &64u32.to_le_bytes());
    assert_eq!(&bytes[24..28], &32768u32.to_le_bytes());
    assert_eq!(&bytes[28..32], &0xF205_4F00u32.to_le_bytes());
    assert!(bytes[32..64].iter().all(|&b| b == 0));
}

#[test]
fn test_other_seed_changes_noisy_channels_only() {
    let seeded = |seed: u32| {
        let mut source = ScenarioSource::new(Scenario::Normal, 102_400, 256, seed);
        let mut cursor = Cursor::new(Vec::new());
        WaveWriter::new(FormatConfig::d8cw())
            .encode(&mut cursor, 102_400, 256, &mut source)
            .unwrap();
        let mut cursor = Cursor::new(cursor.into_inner());
        let header = verify_stream(&mut cursor, &FormatConfig::d8cw(), None).unwrap();
        read_frames(&mut cursor, &header).unwrap()
    };

    let a = seeded(SUITE_SEED);
    let b = seeded(0x1234_5678);

    // Only channel D carries noise in the baseline
    for (fa, fb) in a.iter().zip(b.iter()) {
        assert_eq!(fa[..3], fb[..3]);
    }
    assert!(a.iter().zip(b.iter()).any(|(fa, fb)| fa[3] != fb[3]));
}
