//! Single-waveform generator for bring-up of the DAC path
//!
//! Four independent full-scale bipolar shapes, one per channel, with no
//! noise. Predates the fault suite; kept for scope checks on the bench.

use crate::gen::waveform::Waveform;
use crate::gen::{ChannelKind, WaveSource};

pub const LEGACY_SAMPLE_RATE: u32 = 240_000;
pub const LEGACY_SAMPLE_COUNT: u32 = 4096;

/// Peak voltage of every legacy channel
pub const LEGACY_AMPLITUDE: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegacyConfig {
    pub sample_rate: u32,
    pub sample_count: u32,
    /// Shape per channel A..D
    pub shapes: [Waveform; 4],
    /// Tone frequency per channel A..D in Hz
    pub frequencies: [f64; 4],
}

impl LegacyConfig {
    pub fn new(sample_rate: u32, sample_count: u32, frequencies: [f64; 4]) -> Self {
        Self {
            sample_rate,
            sample_count,
            shapes: [
                Waveform::Sine,
                Waveform::Triangle,
                Waveform::Saw,
                Waveform::Square,
            ],
            frequencies,
        }
    }
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self::new(
            LEGACY_SAMPLE_RATE,
            LEGACY_SAMPLE_COUNT,
            [12000.0, 6000.0, 3000.0, 1000.0],
        )
    }
}

pub struct LegacySource {
    config: LegacyConfig,
}

impl LegacySource {
    pub fn new(config: LegacyConfig) -> Self {
        Self { config }
    }
}

impl WaveSource for LegacySource {
    fn tick(&mut self, index: u32) -> [f64; 4] {
        let t = f64::from(index) / f64::from(self.config.sample_rate);

        let mut out = [0.0; 4];
        for (channel, value) in out.iter_mut().enumerate() {
            let shape = self.config.shapes[channel];
            let v = LEGACY_AMPLITUDE * shape.value_at(self.config.frequencies[channel], t);
            *value = ChannelKind::Bipolar.saturate(v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::Quantizer;

    #[test]
    fn test_first_frames() {
        let mut source = LegacySource::new(LegacyConfig::default());
        let q = Quantizer::default();

        assert_eq!(q.quantize_frame(source.tick(0)), [32768, 16384, 16384, 49151]);
        assert_eq!(q.quantize_frame(source.tick(1)), [37830, 18022, 16793, 49151]);
    }

    #[test]
    fn test_square_channel_flips_at_half_period() {
        // 1kHz at 240kHz: 240 samples per period
        let mut source = LegacySource::new(LegacyConfig::default());

        assert_eq!(source.tick(119)[3], 5.0);
        assert_eq!(source.tick(120)[3], -5.0);
        assert_eq!(source.tick(240)[3], 5.0);
    }
}
