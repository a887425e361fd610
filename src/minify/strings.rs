//! Protect string literals.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::token::{resolve_comments, Preserved, COMMENT_MARKER};

/// Single or double quoted string, with backslash escapes.
static STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"("([^\\"]|\\.|\\)*")|('([^\\']|\\.|\\)*')"#).unwrap());

/// Verbose IE opacity filter.
pub(crate) static ALPHA_OPACITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)progid:DXImageTransform\.Microsoft\.Alpha\(Opacity=").unwrap()
});

/// Shorthand of [`ALPHA_OPACITY_RE`].
pub(crate) const ALPHA_OPACITY: &str = "alpha(opacity=";

/// Move the body of every string literal to the preservation table.
///
/// Quotes stay in the text around the placeholder. Comments extracted from
/// inside a literal are put back into its body first.
pub(crate) fn preserve(css: &str, comments: &[String], preserved: &mut Preserved) -> String {
    STRING_RE
        .replace_all(css, |captures: &Captures| {
            let literal = &captures[0];
            let quote = &literal[..1];
            let mut body = literal[1..literal.len() - 1].to_owned();

            if body.contains(COMMENT_MARKER) {
                body = resolve_comments(&body, comments);
            }

            let body = ALPHA_OPACITY_RE.replace_all(&body, ALPHA_OPACITY);

            let token = preserved.push(body);

            format!("{quote}{token}{quote}")
        })
        .into_owned()
}
