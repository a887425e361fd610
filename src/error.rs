//! Application errors.

use std::path::PathBuf;

/// Enumerates application errors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("While loading configuration from {config_path:?}")]
    LoadConfig {
        config_path: PathBuf,
        source: anyhow::Error,
    },
    #[error("While reading {}", display_input(.input_path))]
    ReadInput {
        input_path: Option<PathBuf>,
        source: anyhow::Error,
    },
    #[error("While writing {}", display_output(.output_path))]
    WriteOutput {
        output_path: Option<PathBuf>,
        source: anyhow::Error,
    },
    #[error("Cannot write standard input to {output_dir:?}, pass input files to use --output")]
    OutputWithoutInputs { output_dir: PathBuf },
    #[error("While checking fixtures in {fixtures_dir:?}")]
    CheckFixtures {
        fixtures_dir: PathBuf,
        source: anyhow::Error,
    },
    #[error("{failed} of {total} fixtures failed")]
    FixturesFailed { failed: usize, total: usize },
}

fn display_input(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "standard input".to_owned(), |path| format!("{path:?}"))
}

fn display_output(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "standard output".to_owned(), |path| format!("{path:?}"))
}
