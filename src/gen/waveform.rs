use std::f64::consts::PI;

/// Basic periodic shapes used by the single-waveform generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Waveform {
    /// Unit-amplitude value of a `frequency_hz` tone at time `t` seconds
    #[inline]
    pub fn value_at(self, frequency_hz: f64, t: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * PI * frequency_hz * t).sin(),
            Waveform::Square => square(frequency_hz * t),
            Waveform::Saw => saw(frequency_hz * t),
            Waveform::Triangle => triangle(frequency_hz * t),
        }
    }
}

// Phases are in cycles and wrap with floor modulo

fn triangle(phase: f64) -> f64 {
    let x = phase.rem_euclid(1.0);
    if x < 0.5 {
        4.0 * x - 1.0
    } else {
        3.0 - 4.0 * x
    }
}

fn saw(phase: f64) -> f64 {
    2.0 * phase.rem_euclid(1.0) - 1.0
}

fn square(phase: f64) -> f64 {
    if phase.rem_euclid(1.0) < 0.5 {
        1.0
    } else {
        -1.0
    }
}
