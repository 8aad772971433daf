//! Audio Ingester - WAV metadata to XML processor

use std::process;

use audio_ingester::{Args, Config, Ingester, Result, init_logging};
use clap::Parser;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns the number of failed files (nonzero only in keep-going mode).
fn run(args: Args) -> Result<usize> {
    if args.verbose {
        println!("{}", audio_ingester::get_library_info());
        println!();
    }

    let config = Config::from_args_and_config(args)?;

    println!("=== Audio Ingester ===");
    println!("Input: {}", config.input_dir.display());

    let ingester = Ingester::new(config);
    let summary = ingester.run()?;

    println!("=== Ingest Complete ===");
    println!("Output: {}", summary.output_dir.display());
    println!("Processed: {}", summary.processed);

    if !summary.failures.is_empty() {
        eprintln!("Failed: {}", summary.failures.len());
        for failure in &summary.failures {
            eprintln!("  {}: {}", failure.file.display(), failure.error);
        }
    }

    Ok(summary.failures.len())
}
