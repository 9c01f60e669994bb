use rustfft::{num_complex::Complex, FftPlanner};

/// Largest transform used for a single spectrum
pub const MAX_FFT_SIZE: usize = 1 << 16;

/// Magnitude spectrum of a channel, for checking tone placement
pub struct SpectrumAnalyzer {
    sample_rate: f64,
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            planner: FftPlanner::new(),
        }
    }

    /// Transform length used for `len` input samples
    pub fn fft_size(len: usize) -> usize {
        len.min(MAX_FFT_SIZE)
    }

    /// Linear magnitudes of the first half of the spectrum
    ///
    /// Uses the leading `fft_size` samples with the mean removed and a Hann
    /// window applied.
    pub fn magnitudes(&mut self, samples: &[f64]) -> Vec<f64> {
        let size = Self::fft_size(samples.len());
        if size < 2 {
            return Vec::new();
        }
        let input = &samples[..size];
        let mean = input.iter().sum::<f64>() / size as f64;

        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .enumerate()
            .map(|(i, &sample)| {
                let window =
                    0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / size as f64).cos());
                Complex::new((sample - mean) * window, 0.0)
            })
            .collect();

        let fft = self.planner.plan_fft_forward(size);
        fft.process(&mut buffer);

        buffer[..size / 2].iter().map(|c| c.norm()).collect()
    }

    /// Frequency of the strongest non-DC bin, `None` for silence
    pub fn dominant_frequency(&mut self, samples: &[f64]) -> Option<f64> {
        let size = Self::fft_size(samples.len());
        let magnitudes = self.magnitudes(samples);

        let (bin, &peak) = magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))?;

        if peak <= 1e-9 {
            return None;
        }
        Some(self.bin_to_frequency(bin, size))
    }

    pub fn bin_to_frequency(&self, bin: usize, fft_size: usize) -> f64 {
        bin as f64 * self.sample_rate / fft_size as f64
    }
}
