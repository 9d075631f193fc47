//! Deadline-aware RSVP submission CLI.
//!
//! Reads settings from `rsvp.toml`, accepts RSVP submissions as JSON
//! documents, and appends accepted responses to the configured CSV table.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use rsvp::core::types::RsvpSubmission;
use rsvp::exit_codes;
use rsvp::io::config::{DEFAULT_CONFIG_PATH, load_config, write_config_template};
use rsvp::io::record_store::CsvRecordStore;
use rsvp::logging;
use rsvp::pipeline::{SubmissionOutcome, SubmissionPipeline};
use rsvp::status::DeadlineBanner;
use tracing::debug;

#[derive(Parser)]
#[command(name = "rsvp", version, about = "Deadline-aware RSVP submission")]
struct Cli {
    /// Settings file.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log pipeline diagnostics to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a commented settings file if missing.
    Init {
        /// Overwrite an existing settings file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the deadline banner for the current time.
    Status,
    /// Submit an RSVP document (JSON) and print the outcome.
    Submit {
        /// Path to the submission document, or `-` for stdin.
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Status => cmd_status(&cli.config),
        Command::Submit { input } => cmd_submit(&cli.config, &input),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if write_config_template(config_path, force)? {
        println!("wrote {}", config_path.display());
    } else {
        println!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    Ok(exit_codes::OK)
}

fn cmd_status(config_path: &Path) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let deadline = cfg.deadline_config();
    match DeadlineBanner::for_deadline(deadline.as_ref(), &Local::now()) {
        Some(banner) => println!("{banner}"),
        None => println!("No RSVP deadline configured"),
    }
    Ok(exit_codes::OK)
}

fn cmd_submit(config_path: &Path, input: &Path) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let submission = read_submission(input)?;
    debug!(csv_file = %cfg.files.csv_file.display(), "submitting");

    let store = CsvRecordStore::new(&cfg.files.csv_file);
    let pipeline = SubmissionPipeline::new(cfg.deadline_config(), store);
    let outcome = pipeline.submit(&submission, &Local::now());
    print_outcome(&outcome)?;
    Ok(outcome.exit_code())
}

fn read_submission(input: &Path) -> Result<RsvpSubmission> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("read submission from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("parse submission {}", input.display()))
}

/// Print the outcome as pretty JSON with a trailing newline.
fn print_outcome(outcome: &SubmissionOutcome) -> Result<()> {
    let payload = serde_json::to_string_pretty(outcome).context("serialize outcome")?;
    println!("{payload}");
    Ok(())
}
