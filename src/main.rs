//! CLI entry point for all-RGB image generation

use clap::Parser;
use rgbtree::io::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

fn main() -> rgbtree::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Runner::new(cli).run()
}
