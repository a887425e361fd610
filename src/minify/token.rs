//! Placeholders and the preservation table.
//!
//! Content that must survive the rewrite rules untouched is moved out of the
//! working buffer and replaced by a placeholder: a reserved marker, a decimal
//! index into a side table, and a terminator. Input text must not contain any
//! of the reserved markers.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Marker of a comment awaiting classification.
pub(crate) const COMMENT_MARKER: &str = "___CSSMIN_PRESERVE_CANDIDATE_COMMENT_";

/// Marker of a preserved fragment awaiting restoration.
pub(crate) const PRESERVED_MARKER: &str = "___CSSMIN_PRESERVED_TOKEN_";

/// Marker of a pseudo-class colon hidden from the whitespace rules.
///
/// Unlike the other two markers, it carries no index.
pub(crate) const PSEUDO_COLON_MARKER: &str = "___CSSMIN_PSEUDOCLASSCOLON___";

/// Terminator written after the index of indexed placeholders.
const TERMINATOR: &str = "___";

static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{COMMENT_MARKER}([0-9]+){TERMINATOR}")).unwrap());

static PRESERVED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{PRESERVED_MARKER}([0-9]+){TERMINATOR}")).unwrap());

/// An indexed placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placeholder {
    /// Reference to an entry of the comment table.
    Comment(usize),
    /// Reference to an entry of the preservation table.
    Preserved(usize),
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(index) => write!(f, "{COMMENT_MARKER}{index}{TERMINATOR}"),
            Self::Preserved(index) => write!(f, "{PRESERVED_MARKER}{index}{TERMINATOR}"),
        }
    }
}

/// Append-only table of preserved fragments.
///
/// A fragment is addressed by the index returned from [`Preserved::push`]
/// and is written back verbatim by [`Preserved::restore`].
#[derive(Debug, Default)]
pub(crate) struct Preserved(Vec<String>);

impl Preserved {
    /// Create an empty table.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return the placeholder that refers to it.
    pub(crate) fn push(&mut self, fragment: impl Into<String>) -> Placeholder {
        self.0.push(fragment.into());
        Placeholder::Preserved(self.0.len() - 1)
    }

    /// Number of preserved fragments.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Substitute every preserved placeholder of `css` by its fragment.
    ///
    /// Substitution happens in a single pass, so restored fragments are never
    /// scanned again.
    pub(crate) fn restore(&self, css: &str) -> String {
        resolve(&PRESERVED_RE, css, &self.0)
    }
}

/// Substitute every comment placeholder of `text` by its comment body.
pub(crate) fn resolve_comments(text: &str, comments: &[String]) -> String {
    resolve(&COMMENT_RE, text, comments)
}

/// Replace every match of `re` by the table entry its index refers to.
///
/// Placeholders whose index is out of range are left untouched.
fn resolve(re: &Regex, text: &str, table: &[String]) -> String {
    re.replace_all(text, |captures: &Captures| {
        captures[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| table.get(index))
            .map_or_else(|| captures[0].to_owned(), Clone::clone)
    })
    .into_owned()
}
