//! Render channel voltages to a four-channel WAV for listening or a DAW
//!
//! Samples are 32-bit float, scaled so the external full-scale voltage maps
//! to 1.0. Channel order matches the DAC: A, B, C, D.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::error::{Result, WaveError};
use crate::format::{FormatConfig, CHANNELS, DEFAULT_VOUT_MAX};
use crate::gen::WaveSource;
use crate::reader::WaveFile;

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Bounce `sample_count` frames of `source` straight to a WAV file
pub fn bounce_source<S>(
    path: &Path,
    sample_rate: u32,
    sample_count: u32,
    source: &mut S,
) -> Result<()>
where
    S: WaveSource + ?Sized,
{
    if sample_rate == 0 || sample_count == 0 {
        return Err(WaveError::InvalidParameter(
            "sample rate and sample count must be positive".to_string(),
        ));
    }

    let mut writer = WavWriter::create(path, wav_spec(sample_rate))?;
    for index in 0..sample_count {
        for v in source.tick(index) {
            writer.write_sample((v / DEFAULT_VOUT_MAX) as f32)?;
        }
    }
    writer.finalize()?;

    info!(
        "Bounced {} samples @ {} Hz to {}",
        sample_count,
        sample_rate,
        path.display()
    );
    Ok(())
}

/// Bounce a verified waveform file using the voltages its codes stand for
pub fn bounce_file(wave: &WaveFile, format: &FormatConfig, path: &Path) -> Result<()> {
    let quantizer = format.quantizer();
    let frames = wave.frames()?;
    let (lo, hi) = quantizer.range();
    let full_scale = hi.abs().max(lo.abs());

    let mut writer = WavWriter::create(path, wav_spec(wave.header().sample_rate))?;
    for frame in &frames {
        for &code in frame {
            writer.write_sample((quantizer.dequantize(code) / full_scale) as f32)?;
        }
    }
    writer.finalize()?;

    info!(
        "Bounced {} to {}",
        wave.path().display(),
        path.display()
    );
    Ok(())
}
