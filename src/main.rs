//! Jocosa CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use jocosa::analysis::tokenizer::PatternTokenizer;
use jocosa::cli::args::JocosaArgs;
use jocosa::error::Result;
use jocosa::pipeline;
use jocosa::storage::JsonlStorage;

fn main() {
    // Parse command line arguments using clap
    let args = JocosaArgs::parse();

    // Set up logging/verbosity based on args
    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Execute the pipeline
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: JocosaArgs) -> Result<()> {
    let storage = JsonlStorage::new(args.corpus.clone());
    let tokenizer = Box::new(PatternTokenizer::new()?);
    let config = args.to_config();
    pipeline::run(&config, &storage, tokenizer)
}
