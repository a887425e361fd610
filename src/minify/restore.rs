//! Final cleanup and restoration of preserved fragments.

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::Preserved;

static SEMICOLONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r";;+").unwrap());

/// Insert a line break after every `}` written more than `column` characters
/// after the previous line break.
///
/// Columns count characters since the start of the text or the last inserted
/// line break. A `column` of zero disables wrapping.
pub(crate) fn wrap_lines(css: &str, column: usize) -> String {
    if column == 0 {
        return css.to_owned();
    }

    let mut output = String::with_capacity(css.len() + css.len() / column);
    let mut written = 0;

    for c in css.chars() {
        output.push(c);
        written += 1;

        if c == '}' && written > column {
            output.push('\n');
            written = 0;
        }
    }

    output
}

/// Collapse semicolon runs, put preserved fragments back, and trim.
pub(crate) fn restore(css: &str, preserved: &Preserved) -> String {
    let css = SEMICOLONS_RE.replace_all(css, ";");
    let css = preserved.restore(&css);

    css.trim().to_owned()
}
