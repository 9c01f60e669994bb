//! Generation entry points: the seven-partition fault suite and the legacy
//! single-waveform file
//!
//! Files are produced one after another. Each gets a freshly seeded noise
//! source and a fresh checksum, so no state crosses file boundaries.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, WaveError};
use crate::format::{FormatConfig, WaveHeader, PARTITION_BYTES};
use crate::gen::{LegacyConfig, LegacySource, Scenario, ScenarioSource, SUITE_SEED};
use crate::writer::WaveWriter;

pub const DEFAULT_SUITE_SAMPLE_RATE: u32 = 102_400;

#[derive(Clone, Debug, PartialEq)]
pub struct SuiteConfig {
    /// Directory receiving `<scenario>.bin`
    pub out_dir: PathBuf,
    pub sample_rate: u32,
    /// Exact size of every output file
    pub partition_bytes: u64,
    pub seed: u32,
    pub format: FormatConfig,
}

impl SuiteConfig {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            sample_rate: DEFAULT_SUITE_SAMPLE_RATE,
            partition_bytes: u64::from(PARTITION_BYTES),
            seed: SUITE_SEED,
            format: FormatConfig::d8cw(),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_partition_bytes(mut self, partition_bytes: u64) -> Self {
        self.partition_bytes = partition_bytes;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Samples per channel that fill one partition
    pub fn sample_count(&self) -> Result<u32> {
        self.format.sample_count_for_partition(self.partition_bytes)
    }

    pub fn path_for(&self, scenario: Scenario) -> PathBuf {
        self.out_dir.join(scenario.file_name())
    }
}

/// One generated partition file
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteEntry {
    pub scenario: Scenario,
    pub path: PathBuf,
    pub header: WaveHeader,
}

/// Generate a single scenario file into the suite directory
pub fn generate_scenario(config: &SuiteConfig, scenario: Scenario) -> Result<SuiteEntry> {
    if config.sample_rate == 0 {
        return Err(WaveError::InvalidParameter(
            "sample rate must be positive".to_string(),
        ));
    }

    let sample_count = config.sample_count()?;
    let path = config.path_for(scenario);
    info!("[gen] {} -> {}", scenario, path.display());

    let mut source = ScenarioSource::new(scenario, config.sample_rate, sample_count, config.seed);
    let header = WaveWriter::new(config.format).write_file(
        &path,
        config.sample_rate,
        sample_count,
        config.partition_bytes,
        &mut source,
    )?;

    Ok(SuiteEntry {
        scenario,
        path,
        header,
    })
}

/// Generate every scenario in `scenarios`, in order, stopping at the first error
pub fn generate_suite(config: &SuiteConfig, scenarios: &[Scenario]) -> Result<Vec<SuiteEntry>> {
    scenarios
        .iter()
        .map(|&scenario| generate_scenario(config, scenario))
        .collect()
}

/// Write the legacy four-shape file to `path`, sized to exactly fit its data
pub fn generate_legacy(
    path: &Path,
    config: &LegacyConfig,
    format: &FormatConfig,
) -> Result<WaveHeader> {
    let total = format.total_bytes(config.sample_count);
    let mut source = LegacySource::new(*config);

    WaveWriter::new(*format).write_file(
        path,
        config.sample_rate,
        config.sample_count,
        total,
        &mut source,
    )
}
