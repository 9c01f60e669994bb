//! Summaries of decoded waveform files

#[cfg(feature = "analysis")]
pub mod spectrum;

#[cfg(feature = "analysis")]
pub use spectrum::SpectrumAnalyzer;

use crate::format::CHANNELS;
use crate::quantize::Quantizer;

/// Voltage statistics of one channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// RMS of the signal around its mean
    pub ripple_rms: f64,
}

/// Approximate external voltages of one channel
pub fn channel_voltages(
    frames: &[[u16; CHANNELS]],
    channel: usize,
    quantizer: &Quantizer,
) -> Vec<f64> {
    frames
        .iter()
        .map(|frame| quantizer.dequantize(frame[channel]))
        .collect()
}

/// `None` for an empty channel
pub fn channel_stats(voltages: &[f64]) -> Option<ChannelStats> {
    if voltages.is_empty() {
        return None;
    }

    let n = voltages.len() as f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in voltages {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    let mean = sum / n;
    let variance = voltages.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(ChannelStats {
        min,
        max,
        mean,
        ripple_rms: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_of_square() {
        let samples: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let stats = channel_stats(&samples).unwrap();

        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.mean, 0.0);
        assert!((stats.ripple_rms - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_channel() {
        assert!(channel_stats(&[]).is_none());
    }

    #[test]
    fn test_channel_voltages_pick_channel() {
        let q = Quantizer::default();
        let frames = [[16384, 32768, 49151, 32768]; 3];

        let c = channel_voltages(&frames, 2, &q);
        assert_eq!(c.len(), 3);
        assert!((c[0] - 5.0).abs() < 1e-3);

        let a = channel_voltages(&frames, 0, &q);
        assert!((a[0] + 5.0).abs() < 1e-3);
    }
}
