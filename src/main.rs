//! `dacwave`: generate, inspect and bounce DAC waveform files

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{warn, LevelFilter};

use dacwave::analysis::{channel_stats, channel_voltages};
use dacwave::format::{FormatConfig, PARTITION_BYTES};
use dacwave::gen::{LegacyConfig, Scenario, LEGACY_SAMPLE_COUNT, LEGACY_SAMPLE_RATE, SUITE_SEED};
use dacwave::suite::{generate_legacy, generate_suite, SuiteConfig, DEFAULT_SUITE_SAMPLE_RATE};
use dacwave::utils::{init_logger, init_logger_with_level};
use dacwave::WaveFile;

/// Waveform files for the four-channel DAC
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the fault scenario partitions, one file each.
    Suite {
        /// Directory receiving `<scenario>.bin`.
        #[arg(short, long, default_value = "wave")]
        out_dir: PathBuf,

        /// Samples per second and channel.
        #[arg(long, default_value_t = DEFAULT_SUITE_SAMPLE_RATE)]
        sample_rate: u32,

        /// Exact size of every file.
        #[arg(long, default_value_t = u64::from(PARTITION_BYTES))]
        partition_bytes: u64,

        /// Noise seed, decimal or 0x-prefixed hex.
        #[arg(long, value_parser = parse_u32, default_value_t = SUITE_SEED)]
        seed: u32,

        /// Generate only these scenarios (repeatable).
        #[arg(long, value_parser = parse_scenario)]
        only: Vec<Scenario>,
    },

    /// Generate the legacy four-shape file.
    Legacy {
        /// Output file.
        #[arg(short, long, default_value = "dac_wave.bin")]
        output: PathBuf,

        #[arg(long, default_value_t = LEGACY_SAMPLE_RATE)]
        sample_rate: u32,

        #[arg(long, default_value_t = LEGACY_SAMPLE_COUNT)]
        samples: u32,

        /// Sine frequency on channel A.
        #[arg(long, default_value_t = 12000.0)]
        fa: f64,

        /// Triangle frequency on channel B.
        #[arg(long, default_value_t = 6000.0)]
        fb: f64,

        /// Sawtooth frequency on channel C.
        #[arg(long, default_value_t = 3000.0)]
        fc: f64,

        /// Square frequency on channel D.
        #[arg(long, default_value_t = 1000.0)]
        fd: f64,
    },

    /// Verify a file and print its header and per-channel voltages.
    Inspect {
        path: PathBuf,

        /// Reject files larger than this many bytes (e.g. one partition).
        #[arg(long)]
        max_region: Option<u64>,

        /// Print the dominant frequency of every channel.
        #[arg(long)]
        spectrum: bool,
    },

    /// Render a scenario to a four-channel float WAV file.
    Bounce {
        #[arg(short, long, value_parser = parse_scenario)]
        scenario: Scenario,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SUITE_SAMPLE_RATE)]
        sample_rate: u32,

        /// Defaults to one second.
        #[arg(long)]
        samples: Option<u32>,

        #[arg(long, value_parser = parse_u32, default_value_t = SUITE_SEED)]
        seed: u32,
    },

    /// List the fault scenarios and their flash partitions.
    List,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("'{}' is not a u32: {}", s, e))
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    s.parse().map_err(|e: dacwave::WaveError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_logger_with_level(LevelFilter::Debug);
    } else {
        init_logger();
    }

    match cli.command {
        Commands::Suite {
            out_dir,
            sample_rate,
            partition_bytes,
            seed,
            only,
        } => run_suite(out_dir, sample_rate, partition_bytes, seed, &only),
        Commands::Legacy {
            output,
            sample_rate,
            samples,
            fa,
            fb,
            fc,
            fd,
        } => {
            let config = LegacyConfig::new(sample_rate, samples, [fa, fb, fc, fd]);
            let header = generate_legacy(&output, &config, &FormatConfig::d8cw())
                .with_context(|| format!("Failed to generate {}", output.display()))?;

            println!("Generated: {}", output.display());
            println!("SampleRate: {}", header.sample_rate);
            println!("SampleCount: {}", header.sample_count);
            println!("DataBytes: {}", header.data_bytes);
            println!("Checksum: 0x{:08X}", header.checksum);
            Ok(())
        }
        Commands::Inspect {
            path,
            max_region,
            spectrum,
        } => run_inspect(&path, max_region, spectrum),
        Commands::Bounce {
            scenario,
            output,
            sample_rate,
            samples,
            seed,
        } => run_bounce(scenario, &output, sample_rate, samples, seed),
        Commands::List => {
            println!("{:<4} {:<14} {:<12} description", "id", "name", "offset");
            for scenario in Scenario::ALL {
                println!(
                    "{:<4} {:<14} 0x{:08X}  {}",
                    scenario.partition_id(),
                    scenario.name(),
                    scenario.flash_offset(),
                    scenario.description()
                );
            }
            Ok(())
        }
    }
}

fn run_suite(
    out_dir: PathBuf,
    sample_rate: u32,
    partition_bytes: u64,
    seed: u32,
    only: &[Scenario],
) -> anyhow::Result<()> {
    let config = SuiteConfig::new(out_dir)
        .with_sample_rate(sample_rate)
        .with_partition_bytes(partition_bytes)
        .with_seed(seed);
    let scenarios: &[Scenario] = if only.is_empty() {
        &Scenario::ALL
    } else {
        only
    };

    let entries = generate_suite(&config, scenarios).with_context(|| {
        format!(
            "Failed to generate suite in {}",
            config.out_dir.display()
        )
    })?;

    println!("OutputDir: {}", config.out_dir.display());
    println!("SampleRate: {}", config.sample_rate);
    println!("SampleCount: {}", config.sample_count()?);
    println!("EachFileBytes: {}", config.partition_bytes);
    for entry in &entries {
        println!(
            "  {:<14} id {}  checksum 0x{:08X}",
            entry.scenario.name(),
            entry.scenario.partition_id(),
            entry.header.checksum
        );
    }
    Ok(())
}

fn run_inspect(path: &Path, max_region: Option<u64>, spectrum: bool) -> anyhow::Result<()> {
    let format = FormatConfig::d8cw();
    let wave = match WaveFile::open_in_region(path, &format, max_region) {
        Ok(wave) => wave,
        Err(e) => {
            warn!("{} failed verification: {}", path.display(), e);
            return Err(e).with_context(|| format!("Failed to verify {}", path.display()));
        }
    };

    let header = wave.header();
    println!("File: {}", path.display());
    println!("Magic: 0x{:08X}", header.magic);
    println!("Version: {}", header.version);
    println!("SampleRate: {}", header.sample_rate);
    println!("SampleCount: {}", header.sample_count);
    println!("Channels: {}", header.channel_count);
    println!("DataOffset: {}", header.data_offset);
    println!("DataBytes: {}", header.data_bytes);
    println!("Checksum: 0x{:08X} (ok)", header.checksum);
    println!("Duration: {:.3} s", wave.duration_secs());

    let frames = wave.frames().context("Failed to read samples")?;
    let quantizer = format.quantizer();
    for (channel, label) in ["A", "B", "C", "D"].iter().enumerate() {
        let voltages = channel_voltages(&frames, channel, &quantizer);
        if let Some(stats) = channel_stats(&voltages) {
            println!(
                "  {}: min {:+.3} V  max {:+.3} V  mean {:+.3} V  ripple {:.3} V",
                label, stats.min, stats.max, stats.mean, stats.ripple_rms
            );
        }
        if spectrum {
            print_dominant(label, &voltages, header.sample_rate)?;
        }
    }
    Ok(())
}

#[cfg(feature = "analysis")]
fn print_dominant(label: &str, voltages: &[f64], sample_rate: u32) -> anyhow::Result<()> {
    let mut analyzer = dacwave::analysis::SpectrumAnalyzer::new(f64::from(sample_rate));
    match analyzer.dominant_frequency(voltages) {
        Some(hz) => println!("     {} dominant {:.1} Hz", label, hz),
        None => println!("     {} flat", label),
    }
    Ok(())
}

#[cfg(not(feature = "analysis"))]
fn print_dominant(_label: &str, _voltages: &[f64], _sample_rate: u32) -> anyhow::Result<()> {
    anyhow::bail!("--spectrum requires the 'analysis' feature")
}

#[cfg(feature = "bounce")]
fn run_bounce(
    scenario: Scenario,
    output: &Path,
    sample_rate: u32,
    samples: Option<u32>,
    seed: u32,
) -> anyhow::Result<()> {
    let sample_count = samples.unwrap_or(sample_rate);
    let mut source = dacwave::ScenarioSource::new(scenario, sample_rate, sample_count, seed);
    dacwave::bounce::bounce_source(output, sample_rate, sample_count, &mut source)
        .with_context(|| format!("Failed to bounce {} to {}", scenario, output.display()))?;

    println!("Bounced: {} -> {}", scenario, output.display());
    Ok(())
}

#[cfg(not(feature = "bounce"))]
fn run_bounce(
    _scenario: Scenario,
    _output: &Path,
    _sample_rate: u32,
    _samples: Option<u32>,
    _seed: u32,
) -> anyhow::Result<()> {
    anyhow::bail!("bounce requires the 'bounce' feature")
}
