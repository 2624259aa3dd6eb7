//! Tagbayes CLI binary.

use std::io::Write;

use clap::Parser;
use env_logger::Builder;

use tagbayes::cli::args::*;
use tagbayes::cli::commands::*;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments using clap
    let args = TagbayesArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    execute_command(args)
}
