//! pennywise CLI - statement analysis
//!
//! Usage:
//!   pennywise analyze --csv statement.csv   Categorized ledger, metrics and advice
//!   pennywise sample --out sample.csv       Write the sample statement template
//!   pennywise config init                   Write default ~/.pennywise/config.toml

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pennywise_finance::{Analysis, Stage, analyze, analyze_staged};
use pennywise_ingest::{read_csv_rows, write_sample_csv};
use std::fs::File;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod report;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "pennywise",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PENNYWISE_BUILD_SHA"), ")"),
    about = "Categorize bank statements and get budget recommendations"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a statement CSV: ledger, budget metrics, recommendations
    Analyze {
        /// Path to the statement CSV (header row required)
        #[arg(long)]
        csv: PathBuf,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,

        /// Run stage by stage, reporting progress
        #[arg(long)]
        staged: bool,

        /// Ledger rows to print in text mode (default: config output.max_rows)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Write the sample statement CSV template
    Sample {
        /// Output file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.pennywise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    // Priority: RUST_LOG env var > --verbose flag > config logging.level
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&cfg.logging.level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Analyze {
            csv,
            json,
            staged,
            limit,
        } => {
            run_analyze(&cfg, csv, json, staged, limit).await?;
        }

        Command::Sample { out } => match out {
            Some(path) => {
                let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
                write_sample_csv(file)?;
                println!("Wrote sample statement to {}", path.display());
            }
            None => write_sample_csv(std::io::stdout().lock())?,
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

async fn run_analyze(
    cfg: &Config,
    csv: PathBuf,
    json: bool,
    staged: bool,
    limit: Option<usize>,
) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }

    let rows = read_csv_rows(&csv)?;
    info!(rows = rows.len(), path = %csv.display(), "read statement");

    let analysis: Analysis = if staged || cfg.pipeline.staged {
        analyze_staged(&rows, cfg.pipeline.delays(), |stage| {
            eprintln!("{}", stage_label(stage));
        })
        .await?
    } else {
        analyze(&rows)?
    };

    if json || cfg.output.format == OutputFormat::Json {
        let out = serde_json::to_string_pretty(&analysis).context("serialize analysis")?;
        println!("{out}");
    } else {
        let max_rows = limit.unwrap_or(cfg.output.max_rows);
        print!("{}", report::render_text(&analysis, max_rows));
    }

    Ok(())
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Normalized => "[1/4] rows normalized",
        Stage::Categorized => "[2/4] transactions categorized",
        Stage::Aggregated => "[3/4] budget metrics computed",
        Stage::Recommended => "[4/4] recommendations ready",
    }
}
