//! Check the minifier against fixture files.
//!
//! A fixture is a pair of files in the same directory: `<name>.css` holds the
//! input and `<name>.css.min` holds the exact expected output.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{minify_css_with, util::walk::DirWalker, MinifyOptions};

/// Suffix of fixture input files.
pub const INPUT_SUFFIX: &str = ".css";

/// Suffix appended to an input path to get the expected output path.
pub const EXPECTED_SUFFIX: &str = ".min";

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture directory does not exist.
    #[error("fixture directory not found: {0:?}")]
    DirNotFound(PathBuf),
    /// A fixture file could not be read.
    #[error("failed to read {path:?}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Source error.
        source: std::io::Error,
    },
}

/// An input file and its expected output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Fixture name, i.e. the input file name.
    pub name: String,

    /// Path of the input file.
    pub input_path: PathBuf,

    /// Path of the expected output file.
    pub expected_path: PathBuf,
}

/// A fixture whose output differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Fixture name.
    pub name: String,

    /// Expected output.
    pub expected: String,

    /// Actual output.
    pub actual: String,
}

/// Outcome of a fixture run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Names of the fixtures that passed.
    pub passed: Vec<String>,

    /// Fixtures that failed.
    pub failed: Vec<Failure>,
}

impl Report {
    /// Return `true` if no fixture failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of fixtures that ran.
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}

/// Find all fixtures under `dir`.
///
/// Input files without an expected output file are skipped.
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<Fixture>, FixtureError> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(FixtureError::DirNotFound(dir.to_owned()));
    }

    let fixtures = DirWalker::new(dir)
        .files_with_suffix(INPUT_SUFFIX)
        .into_iter()
        .filter_map(|input_path| {
            let mut expected_path = input_path.clone().into_os_string();
            expected_path.push(EXPECTED_SUFFIX);
            let expected_path = PathBuf::from(expected_path);

            if !expected_path.is_file() {
                tracing::warn!("No expected output for {:?}", input_path);
                return None;
            }

            let name = input_path
                .strip_prefix(dir)
                .unwrap_or(&input_path)
                .to_string_lossy()
                .into_owned();

            Some(Fixture {
                name,
                input_path,
                expected_path,
            })
        })
        .collect();

    Ok(fixtures)
}

/// Minify the input of every fixture and compare with the expected output.
pub fn run(fixtures: &[Fixture], options: &MinifyOptions) -> Result<Report, FixtureError> {
    let mut report = Report::default();

    for fixture in fixtures {
        let input = read(&fixture.input_path)?;
        let expected = read(&fixture.expected_path)?;

        let actual = minify_css_with(input, options);

        tracing::debug!("Checking {}", fixture.name);

        if actual == expected {
            report.passed.push(fixture.name.clone());
        } else {
            report.failed.push(Failure {
                name: fixture.name.clone(),
                expected,
                actual,
            });
        }
    }

    Ok(report)
}

fn read(path: &Path) -> Result<String, FixtureError> {
    std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_owned(),
        source,
    })
}
