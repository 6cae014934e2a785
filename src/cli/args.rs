//! Command-line argument definitions for the log aggregator
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ProcessorConfig;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the log aggregator
///
/// Reads a mixed log file containing APM metrics, application events and HTTP
/// request records, and writes one JSON summary per category.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "log-aggregator",
    version,
    about = "Summarize mixed APM, application and request logs as JSON",
    long_about = "Classifies each line of a mixed log file as an APM metric, an application \
                  event or an HTTP request record, and writes per-category statistics: metric \
                  distributions (apm.json), event counts per level (application.json) and \
                  per-route latency percentiles with status code counts (request.json). \
                  Unrecognized or malformed lines are skipped."
)]
pub struct Args {
    /// Input log file
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        help = "Log file to process"
    )]
    pub file: PathBuf,

    /// Directory for the generated JSON summaries
    ///
    /// Will be created if it doesn't exist. Defaults to the current directory.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory for the generated JSON summaries"
    )]
    pub output_dir: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::file_not_found(self.file.display().to_string()));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }

        Ok(())
    }

    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether the progress spinner should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the processing configuration from the arguments
    pub fn to_config(&self) -> ProcessorConfig {
        let config = ProcessorConfig::default().with_output_dir(&self.output_dir);

        if self.show_progress() {
            config.with_progress()
        } else {
            config
        }
    }
}
