//! `tzfield` CLI — convert wall-clock times and synchronize stored records.
//!
//! ## Usage
//!
//! ```sh
//! # Local wall clock → UTC (DST tie-break applied)
//! tzfield to-utc 2023-11-05T01:30:00 --tz America/Chicago
//!
//! # UTC → local wall clock
//! tzfield to-local 2023-11-05T06:30:00 --tz America/Chicago
//!
//! # Run one commit cycle over a JSON record (stdin → stdout)
//! echo '{"local":"2026-01-15T12:00:00","tz":"America/Chicago"}' | tzfield sync
//!
//! # Same, from file to file, defaulting blank zones to Europe/Paris
//! tzfield sync -i record.json -o record.json --default-tz Europe/Paris
//!
//! # List known zone names
//! tzfield zones
//! ```
//!
//! Warnings are logged to stderr; set `RUST_LOG` to change verbosity.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use tzfield::converter::{format_naive, parse_naive};
use tzfield::{
    ChronoTzDatabase, SyncConfig, Synchronizer, TemporalRecord, TimezoneDatabase,
};

#[derive(Parser)]
#[command(
    name = "tzfield",
    version,
    about = "DST-aware local/UTC conversion and record synchronization"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a naive local time to naive UTC
    ToUtc {
        /// Local datetime, e.g. 2023-11-05T01:30:00
        datetime: String,
        /// IANA timezone of the local datetime
        #[arg(long)]
        tz: String,
    },
    /// Convert a naive UTC time to the local wall clock
    ToLocal {
        /// UTC datetime, e.g. 2023-11-05T06:30:00
        datetime: String,
        /// IANA timezone to show the time in
        #[arg(long)]
        tz: String,
    },
    /// Synchronize a JSON record (local, utc, tz, optional snapshot)
    Sync {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Zone for records stored without one (defaults to TZFIELD_TIME_ZONE, then UTC)
        #[arg(long)]
        default_tz: Option<String>,
    },
    /// List every known timezone name
    Zones,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let db = ChronoTzDatabase;

    match cli.command {
        Commands::ToUtc { datetime, tz } => {
            let local = parse_naive(&datetime).context("Failed to parse local datetime")?;
            let zone = db.resolve(&tz)?;
            println!("{}", format_naive(&tzfield::to_utc(&local, &zone)?));
        }
        Commands::ToLocal { datetime, tz } => {
            let utc = parse_naive(&datetime).context("Failed to parse UTC datetime")?;
            let zone = db.resolve(&tz)?;
            println!("{}", format_naive(&tzfield::to_local(&utc, &zone)?));
        }
        Commands::Sync {
            input,
            output,
            default_tz,
        } => {
            let config = match default_tz {
                Some(name) => SyncConfig::new(name)?,
                None => SyncConfig::from_env()?,
            };
            let raw = read_input(input.as_deref())?;
            let mut record: TemporalRecord =
                serde_json::from_str(&raw).context("Failed to parse record JSON")?;

            let sync = Synchronizer::new(config);
            let report = sync.before_commit(&mut record);
            sync.after_commit(&mut record);
            tracing::info!(
                direction = ?report.direction,
                warnings = report.warnings.len(),
                "record synchronized"
            );

            let pretty = serde_json::to_string_pretty(&record)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Zones => {
            for name in db.all_names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
