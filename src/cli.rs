use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;
use log::debug;

use crate::ingest::{IdentifierSource, DEFAULT_DELIMITER};

/// Operator console for a single-line call queue
#[derive(Parser, Debug, Default)]
#[command(name = "callq")]
#[command(about = "Call identifiers one at a time from a staged queue; complete, skip and recall them from the terminal")]
#[command(version)]
pub struct Args {
    /// Identifiers to call, in order (alternative to --csv / --list)
    #[arg(value_name = "IDS")]
    pub ids: Vec<String>,

    /// Delimited table to read identifiers from
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Table column holding the identifiers: header name or 1-based position
    #[arg(long, value_name = "COLUMN")]
    pub column: Option<String>,

    /// Table field delimiter (a single character, or "tab")
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Text file with one identifier per line
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Staging window capacity (N)
    #[arg(short = 'N', long, value_name = "N")]
    pub capacity: Option<usize>,

    /// Refill when the staging window holds this many or fewer (Y)
    #[arg(short = 'Y', long, value_name = "Y")]
    pub threshold: Option<usize>,

    /// Identifiers pulled per refill (Z)
    #[arg(short = 'Z', long, value_name = "Z")]
    pub batch: Option<usize>,

    /// Board output: text, compact or json
    #[arg(long, value_name = "FORMAT")]
    pub output: Option<String>,

    /// Force coloured output even when not writing to a terminal
    #[arg(long)]
    pub color: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,
}

impl Args {
    /// Build the identifier source named by the arguments.
    ///
    /// `column` and `delimiter` are the already-resolved table options (CLI
    /// value or configuration fallback).
    pub fn identifier_source(&self, column: Option<String>, delimiter: Option<char>) -> Option<IdentifierSource> {
        if let Some(path) = &self.csv {
            return Some(IdentifierSource::Table {
                path: path.clone(),
                column,
                delimiter: delimiter.unwrap_or(DEFAULT_DELIMITER),
            });
        }
        if let Some(path) = &self.list {
            return Some(IdentifierSource::Lines { path: path.clone() });
        }
        if !self.ids.is_empty() {
            return Some(IdentifierSource::Inline(self.ids.clone()));
        }
        None
    }
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    if let Some(format) = &args.log_format {
        format.parse::<crate::logging::LogFormat>().map_err(|e| anyhow::anyhow!(e))?;
    }

    if let Some(ref level) = args.log_file_level {
        crate::logging::parse_log_level(level)?;
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
    }

    if args.color && args.no_color {
        return Err(anyhow::anyhow!("--color and --no-color cannot be used together"));
    }

    if let Some(output) = &args.output {
        output.parse::<crate::display::BoardFormat>().map_err(|e| anyhow::anyhow!(e))?;
    }

    let source_count = [args.csv.is_some(), args.list.is_some(), !args.ids.is_empty()]
        .iter()
        .filter(|&&given| given)
        .count();

    if source_count == 0 {
        return Err(anyhow::anyhow!(
            "No identifiers given: pass them as arguments, or use --csv FILE or --list FILE"
        ));
    }
    if source_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting identifier sources: use only one of --csv, --list, or identifier arguments"
        ));
    }

    if args.csv.is_none() && (args.column.is_some() || args.delimiter.is_some()) {
        return Err(anyhow::anyhow!("--column and --delimiter require --csv to be specified"));
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}
