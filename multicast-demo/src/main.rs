//! Multicast Delegate Demo CLI
//!
//! Command-line front end for the multicast-delegate library. It runs two
//! scenarios and prints what the handlers did:
//! - `arithmetic`: a chain of bound methods narrowed down to nil
//! - `book`: a property-changed event with a self-unsubscribing handler

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

mod arithmetic;
mod book;
mod config;
mod report;

use config::{DemoConfig, OutputFormat};
use report::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    Arithmetic,
    Book,
    All,
}

/// Multicast Delegate Demo - Combine, invoke and narrow callback chains
#[derive(Parser, Debug)]
#[command(name = "multicast-demo")]
#[command(about = "Run the multicast delegate demonstrations", long_about = None)]
#[command(version)]
struct Args {
    /// Scenario to run
    #[arg(short, long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// First operand of the arithmetic scenario
    #[arg(short = 'x', long, value_name = "NUMBER")]
    x: Option<f64>,

    /// Second operand of the arithmetic scenario
    #[arg(short = 'y', long, value_name = "NUMBER")]
    y: Option<f64>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (demo.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Multicast Delegate Demo v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using delegate library v{}", multicast_delegate::VERSION);

    let config = resolve_config(&args)?;
    let transcripts = run_scenarios(args.scenario, &config);
    let rendered = report::render(&transcripts, config.output.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Load the config file (if any) and apply command-line overrides
fn resolve_config(args: &Args) -> Result<DemoConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => DemoConfig::default(),
    };

    if let Some(x) = args.x {
        config.arithmetic.x = x;
    }
    if let Some(y) = args.y {
        config.arithmetic.y = y;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn run_scenarios(scenario: Scenario, config: &DemoConfig) -> Vec<Transcript> {
    let mut transcripts = Vec::new();
    if matches!(scenario, Scenario::Arithmetic | Scenario::All) {
        log::info!("Running arithmetic scenario");
        transcripts.push(arithmetic::run(&config.arithmetic));
    }
    if matches!(scenario, Scenario::Book | Scenario::All) {
        log::info!("Running book scenario");
        transcripts.push(book::run(&config.book));
    }
    transcripts
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
