//! Extract and classify comments.

use super::token::{Placeholder, Preserved};

/// Replace the body of every `/* ... */` comment by a placeholder.
///
/// Returns the rewritten text and the comment bodies in order of appearance.
/// The `/*` and `*/` delimiters stay in the text around each placeholder. A
/// comment left open runs to the end of the input and is closed here.
///
/// Scanning resumes after the closing `*/`, so in `/* a */* b */` the `/` of
/// the first delimiter never opens a second comment.
pub(crate) fn extract(css: &str) -> (String, Vec<String>) {
    let mut output = String::with_capacity(css.len());
    let mut comments = Vec::new();
    let mut rest = css;

    while let Some(start) = rest.find("/*") {
        output.push_str(&rest[..start + 2]);

        let body = &rest[start + 2..];
        let (comment, tail) = match body.find("*/") {
            Some(end) => (&body[..end], &body[end + 2..]),
            None => (body, ""),
        };

        output.push_str(&Placeholder::Comment(comments.len()).to_string());
        output.push_str("*/");
        comments.push(comment.to_owned());
        rest = tail;
    }

    output.push_str(rest);

    (output, comments)
}

/// What happens to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    /// Keep the whole body, `!` included.
    Keep,
    /// Mac/IE5 hack: keep `\` and empty the comment that follows.
    BackslashPair,
    /// IE7 hack: keep an empty comment after `>`.
    Empty,
    /// Remove the comment with its delimiters.
    Drop,
}

/// Decide what happens to `comment`, given the current text.
fn classify(css: &str, comment: &str, placeholder: &str) -> Disposition {
    if comment.starts_with('!') {
        return Disposition::Keep;
    }

    if comment.ends_with('\\') {
        return Disposition::BackslashPair;
    }

    // `>/*` precedes the placeholder in `html >/**/ body`
    if comment.is_empty()
        && css
            .find(placeholder)
            .is_some_and(|start| start > 2 && css.as_bytes()[start - 3] == b'>')
    {
        return Disposition::Empty;
    }

    Disposition::Drop
}

/// Resolve every comment placeholder of `css`.
///
/// Kept comments move to the preservation table; dropped comments disappear
/// along with their delimiters. Each comment is classified once, except the
/// successor of a backslash comment which is emptied without classification.
pub(crate) fn classify_all(
    mut css: String,
    comments: &[String],
    preserved: &mut Preserved,
) -> String {
    let mut index = 0;

    while index < comments.len() {
        let comment = &comments[index];
        let placeholder = Placeholder::Comment(index).to_string();

        let disposition = classify(&css, comment, &placeholder);
        tracing::trace!("comment {index}: {disposition:?}");

        match disposition {
            Disposition::Keep => {
                let token = preserved.push(comment.as_str());
                css = css.replace(&placeholder, &token.to_string());
            }
            Disposition::BackslashPair => {
                let token = preserved.push("\\");
                css = css.replace(&placeholder, &token.to_string());

                if index + 1 < comments.len() {
                    index += 1;
                    let token = preserved.push("");
                    css = css.replace(
                        &Placeholder::Comment(index).to_string(),
                        &token.to_string(),
                    );
                }
            }
            Disposition::Empty => {
                let token = preserved.push("");
                css = css.replace(&placeholder, &token.to_string());
            }
            Disposition::Drop => {
                css = css.replace(&format!("/*{placeholder}*/"), "");
            }
        }

        index += 1;
    }

    css
}

#[cfg(test)]
mod tests {
    use super::{classify_all, extract};
    use crate::minify::token::Preserved;

    fn run(css: &str) -> (String, Preserved) {
        let (css, comments) = extract(css);
        let mut preserved = Preserved::new();
        let css = classify_all(css, &comments, &mut preserved);
        (css, preserved)
    }

    #[test]
    fn extract_in_order() {
        let (css, comments) = extract("a/* one */b/*two*/c");

        assert_eq!(comments, vec![" one ", "two"]);
        assert_eq!(
            css,
            "a/*___CSSMIN_PRESERVE_CANDIDATE_COMMENT_0___*/b/*___CSSMIN_PRESERVE_CANDIDATE_COMMENT_1___*/c"
        );
    }

    #[test]
    fn extract_unterminated() {
        let (css, comments) = extract("a{}/* open");

        assert_eq!(comments, vec![" open"]);
        assert_eq!(css, "a{}/*___CSSMIN_PRESERVE_CANDIDATE_COMMENT_0___*/");
    }

    #[test]
    fn extract_does_not_nest() {
        let (_, comments) = extract("/* a /* b */ c */");

        assert_eq!(comments, vec![" a /* b "]);
    }

    #[test]
    fn extract_end_marker_does_not_open_comment() {
        let (css, comments) = extract("/* a */* b */");

        assert_eq!(comments, vec![" a "]);
        assert_eq!(css, "/*___CSSMIN_PRESERVE_CANDIDATE_COMMENT_0___*/* b */");
    }

    #[test]
    fn drop_plain_comment() {
        let (css, preserved) = run("a{}/* gone */b{}");

        assert_eq!(css, "a{}b{}");
        assert_eq!(preserved.len(), 0);
    }

    #[test]
    fn keep_bang_comment() {
        let (css, preserved) = run("/*! license */a{}");

        assert_eq!(preserved.restore(&css), "/*! license */a{}");
    }

    #[test]
    fn backslash_pairs_with_next_comment() {
        let (css, preserved) = run("/* hide \\*/a{}/* show */b{}");

        assert_eq!(preserved.len(), 2);
        assert_eq!(preserved.restore(&css), "/*\\*/a{}/**/b{}");
    }

    #[test]
    fn backslash_as_last_comment() {
        let (css, preserved) = run("a{}/*\\*/");

        assert_eq!(preserved.restore(&css), "a{}/*\\*/");
    }

    #[test]
    fn empty_comment_after_child_combinator() {
        let (css, preserved) = run("html >/**/ body{}");

        assert_eq!(preserved.restore(&css), "html >/**/ body{}");
    }

    #[test]
    fn empty_comment_elsewhere_is_dropped() {
        let (css, preserved) = run("html /**/ body{}");

        assert_eq!(css, "html  body{}");
        assert_eq!(preserved.len(), 0);
    }
}
