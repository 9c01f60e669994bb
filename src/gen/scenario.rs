//! The seven-partition fault suite
//!
//! Channel semantics on the external +/-5V side:
//! - A: DC bus positive voltage (bipolar, normally positive)
//! - B: DC bus negative voltage (bipolar, normally negative)
//! - C: load current (unipolar)
//! - D: leakage current (unipolar)
//!
//! Operand order in every formula is part of the output: reassociating a sum
//! changes the last bit of a voltage and with it the file checksum.

use std::fmt;
use std::str::FromStr;

use crate::error::WaveError;
use crate::format::PARTITION_BYTES;
use crate::gen::context::WaveContext;
use crate::gen::rng::XorShift32;
use crate::gen::{ChannelKind, WaveSource};

/// Seed every suite file starts from
pub const SUITE_SEED: u32 = 0xA5A5_A5A5;

/// Flash offset of partition 0; the first 4MB of flash are reserved
pub const FLASH_BASE_OFFSET: u32 = 0x0040_0000;

pub const FAULT_CHANNELS: [ChannelKind; 4] = [
    ChannelKind::Bipolar,
    ChannelKind::Bipolar,
    ChannelKind::Unipolar,
    ChannelKind::Unipolar,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scenario {
    Normal,
    AcCoupling,
    BusGround,
    Insulation,
    CapAging,
    PwmAbnormal,
    IgbtFault,
}

impl Scenario {
    /// All scenarios in partition order
    pub const ALL: [Scenario; 7] = [
        Scenario::Normal,
        Scenario::AcCoupling,
        Scenario::BusGround,
        Scenario::Insulation,
        Scenario::CapAging,
        Scenario::PwmAbnormal,
        Scenario::IgbtFault,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::AcCoupling => "ac_coupling",
            Scenario::BusGround => "bus_ground",
            Scenario::Insulation => "insulation",
            Scenario::CapAging => "cap_aging",
            Scenario::PwmAbnormal => "pwm_abnormal",
            Scenario::IgbtFault => "igbt_fault",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Normal => "DC bus with small 100Hz ripple",
            Scenario::AcCoupling => "common-mode 50/100Hz interference plus HF ripple",
            Scenario::BusGround => "periodic bus sag with load surge and leakage decay",
            Scenario::Insulation => "slow drift, raised noise and rising leakage",
            Scenario::CapAging => "heavy 100/120Hz ripple on a lower bus",
            Scenario::PwmAbnormal => "8k/12kHz PWM ripple with 10Hz modulation",
            Scenario::IgbtFault => "periodic drop/clamp windows with leakage spikes",
        }
    }

    /// File name on the SD card, e.g. `bus_ground.bin`
    pub fn file_name(self) -> String {
        format!("{}.bin", self.name())
    }

    /// Firmware partition slot
    pub fn partition_id(self) -> u32 {
        self as u32
    }

    /// Byte offset of this scenario's partition in external flash
    pub fn flash_offset(self) -> u32 {
        FLASH_BASE_OFFSET + self.partition_id() * PARTITION_BYTES
    }

    /// Channel voltages for sample `index`, saturated per channel kind
    pub fn voltages(self, index: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
        let raw = match self {
            Scenario::Normal => baseline(index, rng, ctx),
            Scenario::AcCoupling => ac_coupling(index, rng, ctx),
            Scenario::BusGround => bus_ground(index, rng, ctx),
            Scenario::Insulation => insulation(index, rng, ctx),
            Scenario::CapAging => cap_aging(index, rng, ctx),
            Scenario::PwmAbnormal => pwm_abnormal(index, rng, ctx),
            Scenario::IgbtFault => igbt_fault(index, rng, ctx),
        };

        let mut out = raw;
        for (value, kind) in out.iter_mut().zip(FAULT_CHANNELS) {
            *value = kind.saturate(*value);
        }
        out
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == key)
            .ok_or_else(|| WaveError::UnknownScenario(s.to_string()))
    }
}

// Normal DC bus with a small differential 100Hz ripple
fn baseline(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let s100 = ctx.sin_cycles(i, ctx.cyc_100);

    let a = 3.00 + 0.03 * s100;
    let b = -3.00 - 0.03 * s100;
    let c = 1.50 + 0.06 * s100;
    let d = 0.05 + rng.noise(0.005);

    [a, b, c, d]
}

fn ac_coupling(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let s50 = ctx.sin_cycles(i, ctx.cyc_50);
    let s100 = ctx.sin_cycles(i, ctx.cyc_100);
    let s8k = ctx.sin_cycles(i, ctx.cyc_8k);
    let s12k = ctx.sin_cycles(i, ctx.cyc_12k);

    let cm = 0.35 * s50 + 0.18 * s100;
    let hf = 0.05 * s8k + 0.02 * s12k;

    let a = 3.00 + 0.03 * s100 + cm + hf;
    let b = -3.00 - 0.03 * s100 + cm + hf;
    let c = 1.50 + 0.06 * s100 + 0.35 * s50 + 0.18 * s100;
    let d = 0.05 + 0.05 * s50.abs() + rng.noise(0.01);

    [a, b, c, d]
}

fn bus_ground(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let [mut a, mut b, mut c, mut d] = baseline(i, rng, ctx);

    let win = i % ctx.sag_period_samples;
    if win < ctx.sag_len_samples {
        a = 0.5;
        b += 1.3;
        c = if win < ctx.surge_len_samples { 3.0 } else { 0.2 };
        d = 0.20 + 1.00 * (-f64::from(win) / ctx.sag_tau_samples).exp();
    }

    [a, b, c, d]
}

fn insulation(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let s100 = ctx.sin_cycles(i, ctx.cyc_100);

    let drift = 0.20 * ctx.sin_cycles(i, ctx.drift_cyc_2);
    let slow = 0.08 * ctx.sin_cycles(i, ctx.drift_cyc_1);

    let a = 3.00 + 0.03 * s100 + drift + rng.noise(0.02);
    let b = -3.00 - 0.03 * s100 + drift + rng.noise(0.02);
    let c = 1.50 + 0.06 * s100 + slow + rng.noise(0.05);

    // Leakage rises 0.05V -> ~0.5V over the file
    let env = 0.5 * (1.0 + ctx.sin_cycles(i, ctx.drift_cyc_1));
    let d = 0.05 + 0.45 * env + rng.noise(0.02);

    [a, b, c, d]
}

fn cap_aging(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let s100 = ctx.sin_cycles(i, ctx.cyc_100);
    let s120 = ctx.sin_cycles(i, ctx.cyc_120);

    let a = 2.40 + 1.80 * s100 + 0.30 * s120;
    let b = -2.40 - 1.80 * s100 - 0.30 * s120;
    let c = 1.50 + 0.80 * s100 + 0.15 * s120;
    let d = 0.05 + rng.noise(0.005);

    [a, b, c, d]
}

fn pwm_abnormal(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let s100 = ctx.sin_cycles(i, ctx.cyc_100);
    let s8k = ctx.sin_cycles(i, ctx.cyc_8k);
    let s12k = ctx.sin_cycles(i, ctx.cyc_12k);
    let s10 = ctx.sin_cycles(i, ctx.cyc_10);

    let a = 3.00 + 0.03 * s100 + 0.10 * s8k + 0.05 * s12k;
    let b = -3.00 - 0.03 * s100 + 0.10 * s8k + 0.05 * s12k;

    let modulation = 1.0 + 0.2 * s10;
    let c = 1.50 + 0.06 * s100 + modulation * (0.50 * s8k + 0.20 * s12k) + rng.noise(0.03);

    let d = 0.05 + 0.03 * s8k + rng.noise(0.01);

    [a, b, c, d]
}

fn igbt_fault(i: u32, rng: &mut XorShift32, ctx: &WaveContext) -> [f64; 4] {
    let [mut a, mut b, mut c, mut d] = baseline(i, rng, ctx);

    let win = i % ctx.igbt_period_samples;
    if win < ctx.igbt_w1_samples {
        c = 0.0;
        a -= 1.2;
        b += 1.2;
        d += 0.5 * (-f64::from(win) / ctx.igbt_tau_samples).exp();
    } else if win < ctx.igbt_w1_samples + ctx.igbt_w2_samples {
        c = 0.4;
        a -= 0.6;
        b += 0.6;
        d += 0.25 * (-f64::from(win - ctx.igbt_w1_samples) / ctx.igbt_tau_samples).exp();
    }

    [a, b, c, d]
}

/// Drives one scenario across a file with its own noise source
pub struct ScenarioSource {
    scenario: Scenario,
    ctx: WaveContext,
    rng: XorShift32,
}

impl ScenarioSource {
    pub fn new(scenario: Scenario, sample_rate: u32, sample_count: u32, seed: u32) -> Self {
        Self {
            scenario,
            ctx: WaveContext::new(sample_rate, sample_count),
            rng: XorShift32::new(seed),
        }
    }
}

impl WaveSource for ScenarioSource {
    fn tick(&mut self, index: u32) -> [f64; 4] {
        self.scenario.voltages(index, &mut self.rng, &self.ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_registry() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
        assert_eq!("IGBT-Fault".parse::<Scenario>().unwrap(), Scenario::IgbtFault);
        assert!(matches!(
            "brownout".parse::<Scenario>(),
            Err(WaveError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_partitions() {
        assert_eq!(Scenario::Normal.partition_id(), 0);
        assert_eq!(Scenario::IgbtFault.partition_id(), 6);
        assert_eq!(Scenario::Normal.flash_offset(), 0x0040_0000);
        assert_eq!(Scenario::BusGround.flash_offset(), 0x00C0_0000);
        assert_eq!(Scenario::IgbtFault.flash_offset(), 0x01C0_0000);
        assert_eq!(Scenario::CapAging.file_name(), "cap_aging.bin");
    }

    #[test]
    fn test_noise_draws_per_sample() {
        let ctx = WaveContext::new(102_400, 4096);
        let expected = [
            (Scenario::Normal, 1),
            (Scenario::AcCoupling, 1),
            (Scenario::BusGround, 1),
            (Scenario::Insulation, 4),
            (Scenario::CapAging, 1),
            (Scenario::PwmAbnormal, 2),
            (Scenario::IgbtFault, 1),
        ];

        for (scenario, draws) in expected {
            // Index 0 sits inside the sag/drop windows, 3000 outside them
            for index in [0, 3000] {
                let mut rng = XorShift32::new(SUITE_SEED);
                scenario.voltages(index, &mut rng, &ctx);

                let mut reference = XorShift32::new(SUITE_SEED);
                for _ in 0..draws {
                    reference.next_u32();
                }
                assert_eq!(rng, reference, "{} at index {}", scenario, index);
            }
        }
    }

    #[test]
    fn test_channels_stay_in_range() {
        let ctx = WaveContext::new(1000, 1000);
        for scenario in Scenario::ALL {
            let mut rng = XorShift32::new(SUITE_SEED);
            for i in 0..ctx.sample_count {
                let [a, b, c, d] = scenario.voltages(i, &mut rng, &ctx);
                assert!((-5.0..=5.0).contains(&a) && (-5.0..=5.0).contains(&b));
                assert!((0.0..=5.0).contains(&c) && (0.0..=5.0).contains(&d));
            }
        }
    }

    #[test]
    fn test_bus_ground_first_sample() {
        let ctx = WaveContext::new(1000, 1000);
        let mut rng = XorShift32::new(SUITE_SEED);

        let [a, b, c, d] = Scenario::BusGround.voltages(0, &mut rng, &ctx);
        assert_eq!(a, 0.5);
        assert!((b - -1.7).abs() < 1e-12);
        assert_eq!(c, 3.0);
        assert!((d - 1.2).abs() < 1e-12);
    }
}
