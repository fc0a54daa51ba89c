//! CLI entry point for the tile grid fills

use clap::Parser;
use tilefill::io::cli::{Cli, FileProcessor};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> tilefill::Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet { Level::WARN } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
