//! Minify CSS files from the command line.

use anyhow::Result;
use cssmin::cli::{Cli, Command, Parser};
use log::LevelFilter;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Minify { inputs, output } => {
            cssmin::cli::minify(&cli.opts, &inputs, output.as_deref())?
        }
        Command::Check { dir } => cssmin::cli::check(&cli.opts, dir.as_deref())?,
    }

    Ok(())
}
