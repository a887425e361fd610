//! Minify CSS code.
//!
//! The minifier works on text, not on a syntax tree. Comments and string
//! literals are first moved out of the way behind placeholders, then a fixed
//! list of regex rules rewrites what remains, and finally the preserved
//! fragments are put back.
//!
//! Input must not contain the reserved `___CSSMIN_` placeholder markers.

mod comments;
mod restore;
mod rules;
mod strings;
mod token;

use self::token::Preserved;

/// Options for [`minify_css_with`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Break lines after a `}` once a line is longer than this many
    /// characters.
    ///
    /// `None` or `Some(0)` keeps the output on a single line.
    pub line_break: Option<usize>,
}

/// Minify a CSS string.
///
/// ```
/// use cssmin::minify_css;
///
/// assert_eq!(
///     minify_css("a { color : #ffffff; border: none; }"),
///     "a{color:#fff;border:0}"
/// );
/// ```
pub fn minify_css(input: impl AsRef<str>) -> String {
    minify_css_with(input, &MinifyOptions::default())
}

/// Minify a CSS string with custom options.
///
/// This function never fails: malformed input such as an unterminated
/// comment or string produces some output rather than an error. A comment
/// left open at the end of the input is closed, so a kept one comes out as
/// `/*! ...*/`.
pub fn minify_css_with(input: impl AsRef<str>, options: &MinifyOptions) -> String {
    let input = input.as_ref();

    let (css, comments) = comments::extract(input);

    let mut preserved = Preserved::new();

    let css = strings::preserve(&css, &comments, &mut preserved);

    let css = comments::classify_all(css, &comments, &mut preserved);

    tracing::debug!(
        "{} comments, {} preserved fragments",
        comments.len(),
        preserved.len()
    );

    let css = rules::rewrite(css);

    let css = match options.line_break {
        Some(column) => restore::wrap_lines(&css, column),
        None => css,
    };

    let output = restore::restore(&css, &preserved);

    tracing::debug!("minified {} bytes to {} bytes", input.len(), output.len());

    output
}
