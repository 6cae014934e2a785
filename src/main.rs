use anyhow::Context;
use clap::Parser;
use log_aggregator::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    let input = args.file.display().to_string();

    let result = commands::run(args).with_context(|| format!("Failed to process {}", input));

    match result {
        Ok(_output) => {
            // Success - the report has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
