use std::f64::consts::PI;

/// Number of whole cycles of `hz` that fit in one file
///
/// Tones are snapped to an integer cycle count so every file loops
/// seamlessly on the DAC. Any positive frequency gets at least one cycle.
pub fn cycles_for_hz(hz: f64, sample_rate: u32, sample_count: u32) -> u32 {
    if hz <= 0.0 {
        return 0;
    }
    let cycles = (hz * f64::from(sample_count) / f64::from(sample_rate)).round_ties_even();
    (cycles as u32).max(1)
}

/// Round half to even, at least one sample
fn samples_at_least_one(value: f64) -> u32 {
    (value.round_ties_even() as u32).max(1)
}

/// Derived timing parameters shared by every fault scenario
///
/// Built once per file from the sample rate and the sample count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveContext {
    pub sample_rate: u32,
    pub sample_count: u32,
    pub two_pi_over_n: f64,

    pub cyc_10: u32,
    pub cyc_50: u32,
    pub cyc_100: u32,
    pub cyc_120: u32,
    pub cyc_8k: u32,
    pub cyc_12k: u32,

    pub drift_cyc_1: u32,
    pub drift_cyc_2: u32,

    // Bus sag: ~100ms period, 5ms sag, 1ms surge, 2ms decay
    pub sag_period_samples: u32,
    pub sag_len_samples: u32,
    pub surge_len_samples: u32,
    pub sag_tau_samples: f64,

    // IGBT: 20ms period, two ~1ms windows, 1.5ms decay
    pub igbt_period_samples: u32,
    pub igbt_w1_samples: u32,
    pub igbt_w2_samples: u32,
    pub igbt_tau_samples: f64,
}

impl WaveContext {
    pub fn new(sample_rate: u32, sample_count: u32) -> Self {
        let rate = f64::from(sample_rate);
        let cycles = |hz: f64| cycles_for_hz(hz, sample_rate, sample_count);

        Self {
            sample_rate,
            sample_count,
            two_pi_over_n: 2.0 * PI / f64::from(sample_count),

            cyc_10: cycles(10.0),
            cyc_50: cycles(50.0),
            cyc_100: cycles(100.0),
            cyc_120: cycles(120.0),
            cyc_8k: cycles(8000.0),
            cyc_12k: cycles(12000.0),

            drift_cyc_1: 1,
            drift_cyc_2: 2,

            sag_period_samples: samples_at_least_one(rate / 10.0),
            sag_len_samples: samples_at_least_one(rate * 0.005),
            surge_len_samples: samples_at_least_one(rate * 0.001),
            sag_tau_samples: (rate * 0.002).max(1.0),

            igbt_period_samples: samples_at_least_one(rate / 50.0),
            igbt_w1_samples: samples_at_least_one(rate * 0.001),
            igbt_w2_samples: samples_at_least_one(rate * 0.001),
            igbt_tau_samples: (rate * 0.0015).max(1.0),
        }
    }

    /// `sin` of a tone with `cycles` whole periods across the file
    #[inline]
    pub fn sin_cycles(&self, index: u32, cycles: u32) -> f64 {
        if cycles == 0 {
            return 0.0;
        }
        (self.two_pi_over_n * f64::from(cycles) * f64::from(index)).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_round_half_even() {
        // 2.5 cycles rounds down to 2, 3.5 rounds up to 4
        assert_eq!(cycles_for_hz(2.5, 1000, 1000), 2);
        assert_eq!(cycles_for_hz(3.5, 1000, 1000), 4);
    }

    #[test]
    fn test_cycles_floor_at_one() {
        assert_eq!(cycles_for_hz(0.01, 1000, 1000), 1);
        assert_eq!(cycles_for_hz(0.0, 1000, 1000), 0);
        assert_eq!(cycles_for_hz(-5.0, 1000, 1000), 0);
    }

    #[test]
    fn test_reference_context() {
        let ctx = WaveContext::new(102_400, 4096);

        assert_eq!(ctx.cyc_10, 1);
        assert_eq!(ctx.cyc_50, 2);
        assert_eq!(ctx.cyc_100, 4);
        assert_eq!(ctx.cyc_120, 5);
        assert_eq!(ctx.cyc_8k, 320);
        assert_eq!(ctx.cyc_12k, 480);

        assert_eq!(ctx.sag_period_samples, 10240);
        assert_eq!(ctx.sag_len_samples, 512);
        assert_eq!(ctx.surge_len_samples, 102);
        assert_eq!(ctx.sag_tau_samples, 204.8);

        assert_eq!(ctx.igbt_period_samples, 2048);
        assert_eq!(ctx.igbt_w1_samples, 102);
        assert_eq!(ctx.igbt_w2_samples, 102);
        assert_eq!(ctx.igbt_tau_samples, 153.6);
    }

    #[test]
    fn test_low_rate_windows() {
        let ctx = WaveContext::new(1000, 1000);

        assert_eq!(ctx.sag_period_samples, 100);
        assert_eq!(ctx.sag_len_samples, 5);
        assert_eq!(ctx.surge_len_samples, 1);
        assert_eq!(ctx.sag_tau_samples, 2.0);
        assert_eq!(ctx.igbt_period_samples, 20);
        assert_eq!(ctx.igbt_tau_samples, 1.5);
    }

    #[test]
    fn test_sin_cycles_zero() {
        let ctx = WaveContext::new(1000, 1000);
        assert_eq!(ctx.sin_cycles(123, 0), 0.0);
        assert_eq!(ctx.sin_cycles(0, 7), 0.0);
    }
}
