// this_file: crates/pixfont-cli/src/main.rs

//! Pixfont CLI: day-to-day chores on a pixel-font glyph tree

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match &cli.command {
        Commands::Canonicalize(args) => commands::canonicalize::run(args),
        Commands::Sequence(args) => commands::sequence::run(args),
        Commands::Cmap(args) => commands::cmap::run(args),
        Commands::MappingFormat(args) => commands::mapping_format::run(args),
        Commands::Kerning(args) => commands::kerning::run(args),
        Commands::Draw(args) => commands::draw::run(args),
        Commands::Bold(args) => commands::bold::run(args),
    }
}

fn init_logger(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
    }
}
