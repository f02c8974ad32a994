//! Command-line front-end of the K⁰s → π⁺π⁻ toy event generator
//!
//! By default, runs the π⁺π⁻ mass resolution diagnostic: generate smeared
//! events, histogram the reconstructed π⁺π⁻ mass and write the histogram to
//! disk. In "test" mode, runs the physical consistency checks instead.

#![warn(missing_docs)]

use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use ks2pipi::{
    config::Configuration,
    histogram::Histogram,
    output::{self, MassSummary, DEFAULT_OUTPUT},
    selfcheck, DecaySampler, EventGenerator, MassTable, RandomGenerator, Resolution, Result,
};

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

/// Toy Monte Carlo generator of K⁰s → π⁺π⁻ decays
#[derive(Parser)]
#[command(name = "ks2pipi", version)]
struct Cli {
    /// What to do
    #[arg(value_enum, default_value_t = Mode::Plot)]
    mode: Mode,

    /// Run configuration file (built-in diagnostic settings if absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file of the π⁺π⁻ mass histogram
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

/// Operating mode of the binary
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Check the physical consistency of generated events
    Test,

    /// Histogram the smeared π⁺π⁻ invariant mass
    Plot,
}

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // ### CONFIGURATION READOUT ###

    let cfg = match &cli.config {
        Some(path) => Configuration::load(path).wrap_err("Failed to load the configuration")?,
        None => Configuration::default(),
    };
    let mut rng = RandomGenerator::seeded(cfg.seed);

    match cli.mode {
        Mode::Test => {
            selfcheck::run_all(&mut rng).wrap_err("Self-check failed")?;
            println!("All consistency checks passed");
            Ok(())
        }
        Mode::Plot => resolution_plot(&cfg, rng, &cli.output),
    }
}

/// Generate smeared events and histogram their π⁺π⁻ invariant mass
fn resolution_plot(cfg: &Configuration, rng: RandomGenerator, output: &Path) -> Result<()> {
    cfg.print();

    // ### GENERATION ###

    // NOTE: The clock starts after configuration I/O, to avoid IO-induced
    //       timing fluctuations
    let saved_time = Instant::now();

    let masses = MassTable::pdg();
    let evgen = EventGenerator::new(
        DecaySampler::new(masses)?,
        Resolution::new(cfg.covariance).wrap_err("Invalid measurement covariance")?,
        cfg.lab_momentum,
    );
    let events = evgen.generate_batched(cfg.num_events, rng);
    tracing::info!(num_events = events.len(), "Generated events");

    // ### ANALYSIS ###

    let m_pipi = events
        .invariant_masses(masses.charged_pion)
        .iter()
        .copied()
        .filter(|m| m.is_finite())
        .collect::<Vec<_>>();
    if m_pipi.len() < events.len() {
        tracing::warn!(
            num_unphysical = events.len() - m_pipi.len(),
            "Some smeared events have a negative squared mass"
        );
    }
    let summary = MassSummary::new(&m_pipi);
    let histogram = Histogram::new(&m_pipi, None, cfg.num_bins);

    // ### RESULTS DISPLAY AND STORAGE ###

    let elapsed_time = saved_time.elapsed();
    output::dump_histogram(output, cfg, &summary, &histogram, elapsed_time)
        .wrap_err("Failed to output the results")
}
