//! Voltage to DAC code conversion
//!
//! Mirrors the fixed-point path on the firmware side bit for bit: clamp,
//! affine rescale into the reference-relative fraction, then round and
//! saturate to 16 bits. All intermediate math is `f64` and the order of the
//! three steps must not change.

use crate::format::{DEFAULT_VOUT_MAX, DEFAULT_VOUT_MIN, DEFAULT_VREF_MV};

pub const CODE_MAX: u16 = u16::MAX;

/// `max(lo, min(hi, v))`, so NaN saturates to `hi`
#[inline]
pub fn saturate(value: f64, lo: f64, hi: f64) -> f64 {
    let upper = if value < hi { value } else { hi };
    if upper > lo {
        upper
    } else {
        lo
    }
}

/// Maps an external channel voltage to an unsigned 16-bit DAC code
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantizer {
    vref_mv: f64,
    vout_min: f64,
    vout_max: f64,
}

impl Quantizer {
    pub fn new(vref_mv: f64, vout_min: f64, vout_max: f64) -> Self {
        Self {
            vref_mv,
            vout_min,
            vout_max,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.vout_min, self.vout_max)
    }

    #[inline]
    pub fn quantize(&self, voltage: f64) -> u16 {
        let clamped = saturate(voltage, self.vout_min, self.vout_max);

        // External +/-5V is conditioned down to 1.25..3.75V at the DAC input
        let real_voltage = clamped / 4.0 + 2.5;
        let scaled = (real_voltage / 2.0) * 1000.0 / self.vref_mv;

        // `as` truncates toward zero and saturates out-of-range floats
        let code = (scaled * 65535.0 + 0.5) as i64;
        code.clamp(0, i64::from(CODE_MAX)) as u16
    }

    /// Quantize all four channels of a frame
    #[inline]
    pub fn quantize_frame(&self, voltages: [f64; 4]) -> [u16; 4] {
        voltages.map(|v| self.quantize(v))
    }

    /// Approximate inverse of [`quantize`](Self::quantize), for inspection only
    pub fn dequantize(&self, code: u16) -> f64 {
        let scaled = f64::from(code) / 65535.0;
        let real_voltage = scaled * self.vref_mv / 1000.0 * 2.0;
        (real_voltage - 2.5) * 4.0
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_VREF_MV, DEFAULT_VOUT_MIN, DEFAULT_VOUT_MAX)
    }
}
