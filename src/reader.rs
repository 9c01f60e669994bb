//! Reading back and verifying waveform files
//!
//! Runs the same checks the firmware applies before copying a file into a
//! flash partition: header fields, overall length and the payload checksum.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, WaveError};
use crate::format::{
    Checksum, FormatConfig, WaveHeader, CHANNELS, FRAME_BYTES, PACKED_HEADER_BYTES,
};

const READ_CHUNK_BYTES: usize = 64 * 1024;

fn read_header<R: Read>(reader: &mut R) -> Result<WaveHeader> {
    let mut packed = [0u8; PACKED_HEADER_BYTES];
    reader.read_exact(&mut packed).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            WaveError::InvalidHeader("file is shorter than the header".to_string())
        }
        _ => WaveError::Io(e),
    })?;
    WaveHeader::from_bytes(&packed)
}

/// Validate the header and recompute the checksum of a complete file
///
/// `max_region_bytes` optionally bounds the file size, e.g. to a partition.
pub fn verify_stream<R>(
    reader: &mut R,
    format: &FormatConfig,
    max_region_bytes: Option<u64>,
) -> Result<WaveHeader>
where
    R: Read + Seek,
{
    reader.seek(SeekFrom::Start(0))?;
    let header = read_header(reader)?;
    header.validate(format, max_region_bytes)?;

    let file_len = reader.seek(SeekFrom::End(0))?;
    if file_len != header.total_bytes() {
        return Err(WaveError::SizeMismatch {
            expected: header.total_bytes(),
            actual: file_len,
        });
    }

    reader.seek(SeekFrom::Start(u64::from(header.data_offset)))?;

    let mut checksum = Checksum::new();
    let mut remaining = header.data_bytes as usize;
    let mut buf = vec![0u8; READ_CHUNK_BYTES];
    while remaining > 0 {
        let want = remaining.min(buf.len());
        reader.read_exact(&mut buf[..want])?;
        checksum.update(&buf[..want]);
        remaining -= want;
    }

    if checksum.value() != header.checksum {
        return Err(WaveError::ChecksumMismatch {
            expected: header.checksum,
            actual: checksum.value(),
        });
    }

    Ok(header)
}

/// Decode the data region into frames of four DAC codes
pub fn read_frames<R>(reader: &mut R, header: &WaveHeader) -> Result<Vec<[u16; CHANNELS]>>
where
    R: Read + Seek,
{
    reader.seek(SeekFrom::Start(u64::from(header.data_offset)))?;

    let mut data = vec![0u8; header.data_bytes as usize];
    reader.read_exact(&mut data)?;

    Ok(data
        .chunks_exact(FRAME_BYTES)
        .map(|frame| {
            let mut codes = [0u16; CHANNELS];
            for (code, pair) in codes.iter_mut().zip(frame.chunks_exact(2)) {
                *code = u16::from_le_bytes([pair[0], pair[1]]);
            }
            codes
        })
        .collect())
}

/// A verified waveform file on disk
#[derive(Debug, Clone)]
pub struct WaveFile {
    path: PathBuf,
    header: WaveHeader,
}

impl WaveFile {
    /// Open and fully verify a file of the given format
    pub fn open(path: impl AsRef<Path>, format: &FormatConfig) -> Result<Self> {
        Self::open_in_region(path, format, None)
    }

    /// Like [`open`](Self::open), also requiring the file to fit the region
    pub fn open_in_region(
        path: impl AsRef<Path>,
        format: &FormatConfig,
        max_region_bytes: Option<u64>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = BufReader::new(File::open(&path)?);
        let header = verify_stream(&mut reader, format, max_region_bytes)?;

        debug!(
            "Verified {} ({} samples, checksum 0x{:08X})",
            path.display(),
            header.sample_count,
            header.checksum
        );
        Ok(Self { path, header })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    /// Playback length in seconds
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.header.sample_count) / f64::from(self.header.sample_rate)
    }

    pub fn frames(&self) -> Result<Vec<[u16; CHANNELS]>> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        read_frames(&mut reader, &self.header)
    }
}
