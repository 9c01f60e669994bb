pub mod context;
pub mod legacy;
pub mod rng;
pub mod scenario;
pub mod waveform;

pub use self::context::*;
pub use self::legacy::*;
pub use self::rng::*;
pub use self::scenario::*;
pub use self::waveform::*;

use crate::format::{DEFAULT_VOUT_MAX, DEFAULT_VOUT_MIN};
use crate::quantize::saturate;

/// Voltage span a channel is allowed to swing through
///
/// Spans belong to the board's external signal conditioning (the D8CW
/// +/-5V front end), not to a [`FormatConfig`](crate::format::FormatConfig).
/// A format with a different `vout` span still clamps again in its own
/// quantizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// -5V..+5V
    Bipolar,
    /// 0V..+5V
    Unipolar,
}

impl ChannelKind {
    pub fn range(self) -> (f64, f64) {
        match self {
            ChannelKind::Bipolar => (DEFAULT_VOUT_MIN, DEFAULT_VOUT_MAX),
            ChannelKind::Unipolar => (0.0, DEFAULT_VOUT_MAX),
        }
    }

    /// Clamp into this channel's range; out-of-range values are never rejected
    #[inline]
    pub fn saturate(self, value: f64) -> f64 {
        let (lo, hi) = self.range();
        saturate(value, lo, hi)
    }
}

/// Anything that can produce channel voltages for consecutive sample indices
///
/// The serializer calls `tick` exactly once per index, starting at 0 and
/// increasing by one. Periodic scenarios and the noise stream rely on that.
pub trait WaveSource {
    fn tick(&mut self, index: u32) -> [f64; 4];
}

impl<F> WaveSource for F
where
    F: FnMut(u32) -> [f64; 4],
{
    fn tick(&mut self, index: u32) -> [f64; 4] {
        self(index)
    }
}
