//! Streaming serializer for DAC waveform files
//!
//! Writes a zeroed placeholder header, streams quantized frames in fixed
//! size chunks while folding them into the checksum, then seeks back and
//! writes the finished header once the checksum is known.

use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info, trace};

use crate::error::{Result, WaveError};
use crate::format::{
    Checksum, FormatConfig, WaveHeader, CHANNELS, FRAME_BYTES, PACKED_HEADER_BYTES,
};
use crate::gen::WaveSource;

/// Frames assembled per write; only affects throughput, never the output
pub const CHUNK_SAMPLES: u32 = 2048;

pub struct WaveWriter {
    format: FormatConfig,
    chunk_samples: u32,
}

impl WaveWriter {
    pub fn new(format: FormatConfig) -> Self {
        Self {
            format,
            chunk_samples: CHUNK_SAMPLES,
        }
    }

    /// Override the chunk size (minimum one frame)
    pub fn with_chunk_samples(mut self, chunk_samples: u32) -> Self {
        self.chunk_samples = chunk_samples.max(1);
        self
    }

    /// Reject parameters that can never produce a valid file, before any I/O
    fn check_parameters(&self, sample_rate: u32, sample_count: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(WaveError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }
        if sample_count == 0 {
            return Err(WaveError::InvalidParameter(
                "sample count must be positive".to_string(),
            ));
        }
        if self.format.channel_count as usize != CHANNELS {
            return Err(WaveError::Configuration(format!(
                "frames carry {} channels, format declares {}",
                CHANNELS, self.format.channel_count
            )));
        }
        if (self.format.data_offset as usize) < PACKED_HEADER_BYTES {
            return Err(WaveError::Configuration(format!(
                "data offset {} is smaller than the {}-byte header",
                self.format.data_offset, PACKED_HEADER_BYTES
            )));
        }
        // Data length must fit the u32 header field
        WaveHeader::new(&self.format, sample_rate, sample_count, 0)?;
        Ok(())
    }

    /// Generate `sample_count` frames from `source` into the file at `path`
    ///
    /// `declared_total` is the size the caller expects on disk, typically a
    /// flash partition. It must equal header plus data exactly; this is checked
    /// before anything is written and again after the file is closed.
    pub fn write_file<S>(
        &self,
        path: &Path,
        sample_rate: u32,
        sample_count: u32,
        declared_total: u64,
        source: &mut S,
    ) -> Result<WaveHeader>
    where
        S: WaveSource + ?Sized,
    {
        self.check_parameters(sample_rate, sample_count)?;

        let expected = self.format.total_bytes(sample_count);
        if expected != declared_total {
            return Err(WaveError::Configuration(format!(
                "header {} + data {} = {} bytes, declared {}",
                self.format.data_offset,
                self.format.data_bytes(sample_count),
                expected,
                declared_total
            )));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut out = BufWriter::new(File::create(path)?);
        let header = self.encode(&mut out, sample_rate, sample_count, source)?;
        out.flush()?;
        drop(out);

        let actual = fs::metadata(path)?.len();
        if actual != declared_total {
            return Err(WaveError::SizeMismatch {
                expected: declared_total,
                actual,
            });
        }

        info!(
            "Wrote {} ({} samples @ {} Hz, checksum 0x{:08X})",
            path.display(),
            sample_count,
            sample_rate,
            header.checksum
        );
        Ok(header)
    }

    /// Encode a complete file into any seekable sink positioned at its start
    pub fn encode<W, S>(
        &self,
        out: &mut W,
        sample_rate: u32,
        sample_count: u32,
        source: &mut S,
    ) -> Result<WaveHeader>
    where
        W: Write + Seek,
        S: WaveSource + ?Sized,
    {
        self.check_parameters(sample_rate, sample_count)?;

        let quantizer = self.format.quantizer();
        let mut checksum = Checksum::new();

        // Placeholder keeps the payload offset fixed until the header is known
        out.write_all(&vec![0u8; self.format.data_offset as usize])?;

        debug!(
            "Encoding {} samples in chunks of {}",
            sample_count, self.chunk_samples
        );

        let mut chunk = Vec::with_capacity(self.chunk_samples as usize * FRAME_BYTES);
        let mut base = 0u32;
        while base < sample_count {
            let n = self.chunk_samples.min(sample_count - base);

            chunk.clear();
            for index in base..base + n {
                let codes = quantizer.quantize_frame(source.tick(index));
                for code in codes {
                    chunk.extend_from_slice(&code.to_le_bytes());
                }
            }

            checksum.update(&chunk);
            out.write_all(&chunk)?;
            trace!("chunk at {} ({} samples)", base, n);

            base += n;
        }

        let header = WaveHeader::new(&self.format, sample_rate, sample_count, checksum.value())?;
        out.seek(SeekFrom::Start(0))?;
        out.write_all(&header.to_padded_bytes())?;
        out.seek(SeekFrom::End(0))?;

        Ok(header)
    }
}

/// Write one file with the given format; see [`WaveWriter::write_file`]
pub fn write_wave_file<S>(
    path: &Path,
    format: &FormatConfig,
    sample_rate: u32,
    sample_count: u32,
    declared_total: u64,
    source: &mut S,
) -> Result<WaveHeader>
where
    S: WaveSource + ?Sized,
{
    WaveWriter::new(*format).write_file(path, sample_rate, sample_count, declared_total, source)
}
