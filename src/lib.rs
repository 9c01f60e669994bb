//! Deterministic waveform files for a four-channel 16-bit DAC
//!
//! Generates the "D8CW" files the firmware copies from the SD card into QSPI
//! flash partitions and replays on the DAC: a 64-byte header followed by
//! channel-interleaved little-endian codes, protected by a 32-bit checksum.

pub mod analysis;
pub mod error;
pub mod format;
pub mod gen;
pub mod quantize;
pub mod reader;
pub mod suite;
pub mod utils;
pub mod writer;

// WAV export (hound)
#[cfg(feature = "bounce")]
pub mod bounce;

pub use error::{Result, WaveError};
pub use format::{Checksum, FormatConfig, WaveHeader};
pub use gen::{LegacyConfig, Scenario, ScenarioSource, WaveSource, XorShift32};
pub use quantize::Quantizer;
pub use reader::WaveFile;
pub use suite::{generate_legacy, generate_scenario, generate_suite, SuiteConfig, SuiteEntry};
pub use writer::{write_wave_file, WaveWriter};
