use crate::error::{Result, WaveError};
use crate::quantize::Quantizer;

/// "D8CW" read as a little-endian u32
pub const D8CW_MAGIC: u32 = 0x4438_4357;
pub const FORMAT_VERSION: u32 = 1;

/// Every frame carries exactly four DAC channels (A, B, C, D)
pub const CHANNELS: usize = 4;
pub const BYTES_PER_CODE: usize = 2;
pub const FRAME_BYTES: usize = CHANNELS * BYTES_PER_CODE;

pub const DEFAULT_DATA_OFFSET: u32 = 64;
pub const DEFAULT_VREF_MV: f64 = 2500.0;
pub const DEFAULT_VOUT_MIN: f64 = -5.0;
pub const DEFAULT_VOUT_MAX: f64 = 5.0;

/// One flash partition on the target holds one waveform file
pub const PARTITION_BYTES: u32 = 4 * 1024 * 1024;

/// Immutable description of a waveform file format
///
/// Passed into the serializer and the reader instead of living in globals,
/// so tests can build files for more than one format side by side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormatConfig {
    pub magic: u32,
    pub version: u32,
    pub channel_count: u32,
    /// Header size; sample data starts here
    pub data_offset: u32,
    /// DAC reference voltage in millivolts
    pub vref_mv: f64,
    /// External (pre-conditioning) voltage range accepted by the quantizer
    pub vout_min: f64,
    pub vout_max: f64,
}

impl FormatConfig {
    pub fn new(
        magic: u32,
        version: u32,
        channel_count: u32,
        data_offset: u32,
        vref_mv: f64,
        vout_min: f64,
        vout_max: f64,
    ) -> Self {
        Self {
            magic,
            version,
            channel_count,
            data_offset,
            vref_mv,
            vout_min,
            vout_max,
        }
    }

    /// The format the DAC8568 firmware parses
    pub fn d8cw() -> Self {
        Self::new(
            D8CW_MAGIC,
            FORMAT_VERSION,
            CHANNELS as u32,
            DEFAULT_DATA_OFFSET,
            DEFAULT_VREF_MV,
            DEFAULT_VOUT_MIN,
            DEFAULT_VOUT_MAX,
        )
    }

    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.vref_mv, self.vout_min, self.vout_max)
    }

    /// Bytes of sample data for `sample_count` frames
    pub fn data_bytes(&self, sample_count: u32) -> u64 {
        u64::from(sample_count) * u64::from(self.channel_count) * BYTES_PER_CODE as u64
    }

    /// Header plus sample data
    pub fn total_bytes(&self, sample_count: u32) -> u64 {
        u64::from(self.data_offset) + self.data_bytes(sample_count)
    }

    /// Largest sample count whose file fits in `partition_bytes`
    pub fn sample_count_for_partition(&self, partition_bytes: u64) -> Result<u32> {
        let frame_bytes = u64::from(self.channel_count) * BYTES_PER_CODE as u64;
        if frame_bytes == 0 {
            return Err(WaveError::Configuration(
                "channel count must be non-zero".to_string(),
            ));
        }
        if partition_bytes <= u64::from(self.data_offset) {
            return Err(WaveError::Configuration(format!(
                "partition of {} bytes leaves no room after a {}-byte header",
                partition_bytes, self.data_offset
            )));
        }

        let count = (partition_bytes - u64::from(self.data_offset)) / frame_bytes;
        u32::try_from(count).map_err(|_| {
            WaveError::Configuration(format!("sample count {} does not fit in u32", count))
        })
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::d8cw()
    }
}
