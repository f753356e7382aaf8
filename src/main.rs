//! CLI entry point for grid size detection and overlay export

use clap::Parser;
use gridsnap::io::cli::{Cli, FileProcessor};
use gridsnap::io::logging;

fn main() -> gridsnap::Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.quiet, cli.verbose));

    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
