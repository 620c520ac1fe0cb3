//! Fixed-point PLL benchmark
//!
//! Runs the loop on the emulated 50 Hz input, times the measurement window
//! and prints the end state the same way the target does.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pll_bench::{
    bench, cycle_counter::HostCycleCounter, metadata::ApplicationMetadata,
    probe::LogProbe, settings::Settings, table_file,
};
use pll_q30::SineTable;

#[derive(Parser)]
#[command(name = "pll-bench")]
#[command(about = "Fixed-point Q2.30 PLL benchmark", long_about = None)]
#[command(version)]
struct Cli {
    /// Override a setting by path, e.g. `/gains/kp=536870912`. Repeatable.
    #[arg(short, long = "set", value_name = "PATH=VALUE")]
    set: Vec<String>,

    /// Sine table file (decimal or hex words, C array body accepted)
    /// replacing the built-in table.
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Print the effective settings as JSON and exit.
    #[arg(long)]
    dump_settings: bool,

    /// Print the reports as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::default();
    for assignment in &cli.set {
        settings
            .apply(assignment)
            .with_context(|| format!("applying `{assignment}`"))?;
    }

    if cli.dump_settings {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let external = cli
        .table
        .as_deref()
        .map(table_file::load)
        .transpose()
        .context("loading sine table")?;
    let table = external.as_ref().unwrap_or(SineTable::reference());

    println!("=== SW PLL benchmark (HDL-compatible I/O) + SETTLE ===");
    println!("{}", ApplicationMetadata::get());

    let mut counter = HostCycleCounter::new(*settings.cpu_frequency);
    let mut probe = LogProbe::new();
    let reports = bench::run_all(&settings, table, &mut counter, &mut probe)?;
    log::debug!(
        "probe edges: {} rising, {} falling",
        probe.rising_edges(),
        probe.falling_edges()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{report}");
    }
    if let [a, b] = &reports[..] {
        println!(
            "theta({} - {}) = {} LSB",
            a.strategy,
            b.strategy,
            bench::theta_difference(&a.state, &b.state)
        );
    }
    Ok(())
}
