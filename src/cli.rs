//! Command line utilities.

use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
pub use clap::Parser;
use clap::{Args, Subcommand};
use log::{error, info};

use crate::{
    config::Config,
    error::Error,
    fixtures::{self, Report},
    minify_css_with,
};

/// Command line usage description.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Command line options.
    #[command(flatten)]
    pub opts: Opts,
}

/// List of commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Minify stylesheets
    Minify {
        /// Input files [default: standard input]
        inputs: Vec<PathBuf>,

        /// Output directory [default: standard output]
        ///
        /// Requires input files.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Compare minified fixtures with their expected output
    Check {
        /// Fixture directory [default: "tests/fixtures"]
        dir: Option<PathBuf>,
    },
}

/// Command line options.
#[derive(Debug, Args, Clone, Default)]
pub struct Opts {
    /// Configuration file [default: "cssmin.toml"]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Insert a line break after `}` once a line exceeds this many characters
    #[arg(long, global = true)]
    pub line_break: Option<usize>,
}

/// Run the `minify` command.
pub fn minify(opts: &Opts, inputs: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;
    let options = config.minify_options();

    if inputs.is_empty() {
        if let Some(output_dir) = output {
            return Err(Error::OutputWithoutInputs {
                output_dir: output_dir.to_owned(),
            }
            .into());
        }

        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|error| Error::ReadInput {
                input_path: None,
                source: error.into(),
            })?;

        let content = minify_css_with(content, &options);

        return write_output(None, &content);
    }

    if let Some(output_dir) = output {
        std::fs::create_dir_all(output_dir).map_err(|error| Error::WriteOutput {
            output_path: Some(output_dir.to_owned()),
            source: error.into(),
        })?;
    }

    for input_path in inputs {
        let content = std::fs::read_to_string(input_path).map_err(|error| Error::ReadInput {
            input_path: Some(input_path.to_owned()),
            source: error.into(),
        })?;

        let content = minify_css_with(content, &options);

        let output_path = output
            .map(|output_dir| {
                input_path
                    .file_name()
                    .map(|file_name| output_dir.join(file_name))
                    .with_context(|| format!("invalid input path: {input_path:?}"))
            })
            .transpose()?;

        if let Some(output_path) = output_path.as_ref() {
            info!("Writing {:?}", output_path);
        }

        write_output(output_path.as_deref(), &content)?;
    }

    Ok(())
}

/// Write minified content to a file, or to standard output.
fn write_output(output_path: Option<&Path>, content: &str) -> Result<()> {
    let result = match output_path {
        Some(output_path) => std::fs::write(output_path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").and_then(|()| stdout.flush())
        }
    };

    result.map_err(|error| Error::WriteOutput {
        output_path: output_path.map(Path::to_owned),
        source: error.into(),
    })?;

    Ok(())
}

/// Run the `check` command.
pub fn check(opts: &Opts, dir: Option<&Path>) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;
    let fixtures_dir = dir.map_or_else(|| config.fixtures_dir.clone(), Path::to_owned);

    info!("Checking fixtures in {:?}", fixtures_dir);

    let report = fixtures::discover(&fixtures_dir)
        .and_then(|found| fixtures::run(&found, &config.minify_options()))
        .map_err(|error| Error::CheckFixtures {
            fixtures_dir: fixtures_dir.clone(),
            source: error.into(),
        })?;

    log_report(&report);

    if !report.is_success() {
        return Err(Error::FixturesFailed {
            failed: report.failed.len(),
            total: report.total(),
        }
        .into());
    }

    Ok(())
}

fn log_report(report: &Report) {
    for failure in &report.failed {
        error!("failure: {}", failure.name);
        info!("expected: {:?}", failure.expected);
        info!("actual:   {:?}", failure.actual);
    }

    if report.is_success() {
        info!("All tests passed ({} fixtures)", report.total());
    }
}
