//! Command implementations for the log aggregator CLI
//!
//! This module contains the main command execution logic, logging set-up and
//! the final summary report.

use crate::app::models::RecordKind;
use crate::cli::args::Args;
use crate::config::ProcessorConfig;
use crate::processor::{LogProcessor, ProcessingOutput};
use crate::{Error, Result};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main command runner for the log aggregator
///
/// This function orchestrates the entire workflow:
/// 1. Set up logging and configuration
/// 2. Validate the input file
/// 3. Read and aggregate every line
/// 4. Write the three summary documents and report
pub fn run(args: Args) -> Result<ProcessingOutput> {
    setup_logging(&args)?;

    info!("Starting log aggregator");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = args.to_config();
    config.validate()?;

    let output = process_log_file(&args.file, config.clone())?;
    let written = output.write(&config)?;

    if !args.quiet {
        print_final_report(&output, &written);
    }

    Ok(output)
}

/// Process one log file end to end, without writing anything
///
/// A read failure aborts before any aggregator is finalized.
pub fn process_log_file(path: &Path, config: ProcessorConfig) -> Result<ProcessingOutput> {
    let mut processor = LogProcessor::new(config);
    processor.process_file(path)?;
    Ok(processor.finish())
}

/// Set up structured logging based on CLI arguments
///
/// Quiet mode logs compactly without timestamps; otherwise each line carries
/// the time since start. Fails if a global subscriber is already installed.
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("log_aggregator={}", log_level)));

    let compact_layer = args.quiet.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
    });
    let timed_layer = (!args.quiet).then(|| {
        fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact_layer)
        .with(timed_layer)
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print a human-readable summary of the run
fn print_final_report(output: &ProcessingOutput, written: &[PathBuf]) {
    let stats = &output.stats;

    println!();
    println!("{}", "Log Processing Complete".bold().green());
    println!("{}", "=======================".green());
    println!("Lines read:          {}", stats.total_lines);
    println!(
        "Records parsed:      {} ({:.1}%)",
        stats.records_parsed().to_string().bold(),
        stats.success_rate()
    );
    for kind in [RecordKind::Metric, RecordKind::Event, RecordKind::Request] {
        let label = format!("{}:", kind);
        println!("  {:<18} {}", label, stats.records_for(kind));
    }

    if stats.lines_skipped() > 0 {
        println!(
            "Lines skipped:       {} ({} unrecognized, {} malformed)",
            stats.lines_skipped().to_string().yellow(),
            stats.unrecognized_lines,
            stats.malformed_lines
        );
    }

    println!(
        "Processing time:     {:.2}s",
        stats.processing_time.as_secs_f64()
    );
    println!();
    println!("{}", "Output files:".bold());
    for path in written {
        println!("  {}", path.display().to_string().cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_setup_logging_reports_second_initialization() {
        let args = Args::try_parse_from(["log-aggregator", "-f", "app.log", "-q"]).unwrap();

        // Only one global subscriber can exist per process
        let _ = setup_logging(&args);
        let error = setup_logging(&args).unwrap_err();

        assert!(matches!(error, Error::Configuration { .. }));
        assert!(error.to_string().contains("Failed to initialize logging"));
    }
}
