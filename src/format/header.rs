use crate::error::{Result, WaveError};
use crate::format::config::{FormatConfig, BYTES_PER_CODE};

/// Size of the eight packed u32 header fields
pub const PACKED_HEADER_BYTES: usize = 32;

/// Fixed header at the start of every waveform file
///
/// All fields are little-endian u32. The packed record is zero-padded up to
/// `data_offset`, where sample data begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveHeader {
    pub magic: u32,
    pub version: u32,
    pub sample_rate: u32,
    /// Frames per channel
    pub sample_count: u32,
    pub channel_count: u32,
    pub data_offset: u32,
    pub data_bytes: u32,
    pub checksum: u32,
}

impl WaveHeader {
    /// Build a header for `sample_count` frames of `format`
    pub fn new(
        format: &FormatConfig,
        sample_rate: u32,
        sample_count: u32,
        checksum: u32,
    ) -> Result<Self> {
        let data_bytes = format.data_bytes(sample_count);
        let data_bytes = u32::try_from(data_bytes).map_err(|_| {
            WaveError::Configuration(format!("{} data bytes overflow the header", data_bytes))
        })?;

        Ok(Self {
            magic: format.magic,
            version: format.version,
            sample_rate,
            sample_count,
            channel_count: format.channel_count,
            data_offset: format.data_offset,
            data_bytes,
            checksum,
        })
    }

    /// Length of the whole file this header describes
    pub fn total_bytes(&self) -> u64 {
        u64::from(self.data_offset) + u64::from(self.data_bytes)
    }

    pub fn to_bytes(&self) -> [u8; PACKED_HEADER_BYTES] {
        let fields = [
            self.magic,
            self.version,
            self.sample_rate,
            self.sample_count,
            self.channel_count,
            self.data_offset,
            self.data_bytes,
            self.checksum,
        ];

        let mut bytes = [0u8; PACKED_HEADER_BYTES];
        for (slot, field) in bytes.chunks_exact_mut(4).zip(fields) {
            slot.copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    /// Packed fields followed by zero padding up to `data_offset`
    pub fn to_padded_bytes(&self) -> Vec<u8> {
        let mut bytes = self.to_bytes().to_vec();
        let len = (self.data_offset as usize).max(PACKED_HEADER_BYTES);
        bytes.resize(len, 0);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PACKED_HEADER_BYTES {
            return Err(WaveError::InvalidHeader(format!(
                "need {} bytes, got {}",
                PACKED_HEADER_BYTES,
                bytes.len()
            )));
        }

        let field = |index: usize| {
            let start = index * 4;
            u32::from_le_bytes([
                bytes[start],
                bytes[start + 1],
                bytes[start + 2],
                bytes[start + 3],
            ])
        };

        Ok(Self {
            magic: field(0),
            version: field(1),
            sample_rate: field(2),
            sample_count: field(3),
            channel_count: field(4),
            data_offset: field(5),
            data_bytes: field(6),
            checksum: field(7),
        })
    }

    /// Apply the same acceptance rules the firmware runs before syncing a file
    ///
    /// `max_region_bytes` bounds the whole file, e.g. a flash partition.
    pub fn validate(&self, format: &FormatConfig, max_region_bytes: Option<u64>) -> Result<()> {
        if self.magic != format.magic {
            return Err(WaveError::InvalidHeader(format!(
                "bad magic 0x{:08X}",
                self.magic
            )));
        }
        if self.version != format.version {
            return Err(WaveError::InvalidHeader(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if self.channel_count != format.channel_count {
            return Err(WaveError::InvalidHeader(format!(
                "expected {} channels, got {}",
                format.channel_count, self.channel_count
            )));
        }
        if self.sample_rate == 0 || self.sample_count == 0 {
            return Err(WaveError::InvalidHeader(
                "sample rate and sample count must be non-zero".to_string(),
            ));
        }
        if (self.data_offset as usize) < PACKED_HEADER_BYTES {
            return Err(WaveError::InvalidHeader(format!(
                "data offset {} overlaps the header",
                self.data_offset
            )));
        }

        let expected_data_bytes =
            u64::from(self.sample_count) * u64::from(self.channel_count) * BYTES_PER_CODE as u64;
        if u64::from(self.data_bytes) != expected_data_bytes {
            return Err(WaveError::InvalidHeader(format!(
                "data bytes {} do not match {} samples",
                self.data_bytes, self.sample_count
            )));
        }

        if let Some(max) = max_region_bytes {
            if self.total_bytes() > max {
                return Err(WaveError::InvalidHeader(format!(
                    "file of {} bytes exceeds region of {} bytes",
                    self.total_bytes(),
                    max
                )));
            }
        }

        Ok(())
    }
}
