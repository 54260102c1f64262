use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();
    log::debug!("glyphgrid {} : {:?}", env!("CARGO_PKG_VERSION"), cli.format);

    pipeline::run(&cli)
}
