//! Ordered rewrite rules.
//!
//! Every rule runs exactly once, in the order of [`RULES`]. Later rules rely
//! on the text normalized by earlier ones: the `transform-origin` fix undoes
//! what the zero collapsing did, the hex shortening sees the output of the
//! `rgb()` conversion, and so on.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{
    strings::{ALPHA_OPACITY, ALPHA_OPACITY_RE},
    token::PSEUDO_COLON_MARKER,
};

/// How a rule rewrites the text.
enum Action {
    /// Replace every match with an expansion template (`${1}` syntax).
    Expand(Regex, &'static str),
    /// Replace every match with the result of a function.
    Map(Regex, fn(&Captures<'_>) -> String),
    /// Replace every occurrence of a literal substring.
    Literal(&'static str, &'static str),
    /// Hide the colons inside matches of a pattern while running an action.
    ExemptColons(Regex, Box<Action>),
}

impl Action {
    fn apply<'a>(&self, css: &'a str) -> Cow<'a, str> {
        match self {
            Self::Expand(re, replacement) => re.replace_all(css, *replacement),
            Self::Map(re, replacement) => re.replace_all(css, *replacement),
            Self::Literal(from, to) => {
                if css.contains(from) {
                    Cow::Owned(css.replace(from, to))
                } else {
                    Cow::Borrowed(css)
                }
            }
            Self::ExemptColons(mask, action) => {
                let masked = mask.replace_all(css, |captures: &Captures| {
                    captures[0].replace(':', PSEUDO_COLON_MARKER)
                });
                let rewritten = action.apply(&masked);
                Cow::Owned(rewritten.replace(PSEUDO_COLON_MARKER, ":"))
            }
        }
    }
}

/// A named rewrite rule.
pub(crate) struct Rule {
    /// Rule name, used in logs and tests.
    pub(crate) name: &'static str,
    action: Action,
}

impl Rule {
    /// Apply the rule once over the whole text.
    pub(crate) fn apply<'a>(&self, css: &'a str) -> Cow<'a, str> {
        self.action.apply(css)
    }
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

fn expand(name: &'static str, pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        name,
        action: Action::Expand(regex(pattern), replacement),
    }
}

fn map(name: &'static str, pattern: &str, replacement: fn(&Captures<'_>) -> String) -> Rule {
    Rule {
        name,
        action: Action::Map(regex(pattern), replacement),
    }
}

/// Rewrite rules, in order of application.
pub(crate) static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        expand("collapse_whitespace", r"\s+", " "),
        // Keep `p :link` from becoming `p:link` by hiding selector colons
        Rule {
            name: "space_before",
            action: Action::ExemptColons(
                regex(r"(^|\})(([^\{:])+:)+([^\{]*\{)"),
                Box::new(Action::Expand(regex(r"\s+([!{};:>+\(\)\],])"), "${1}")),
            ),
        },
        // IE6 needs the space in `:first-letter {`
        expand(
            "first_letter",
            r":first-(line|letter)(\{|,)",
            ":first-${1} ${2}",
        ),
        Rule {
            name: "comment_space",
            action: Action::Literal("*/ ", "*/"),
        },
        expand(
            "charset_hoist",
            r#"(?i)^(.*)(@charset "[^"]*";)"#,
            "${2}${1}",
        ),
        expand("charset_dedupe", r"(?i)(\s*@charset [^;]+;\s*)+", "${1}"),
        // `@media screen and (-webkit-min-device-pixel-ratio:0)`
        expand("and_space", r"(?i)\band\(", "and ("),
        expand("space_after", r"([!{}:;>+\(\[,])\s+", "${1}"),
        expand("trailing_semicolons", r";+\}", "}"),
        expand(
            "zero_units",
            r"(?i)([\s:])(0)(px|em|%|in|cm|mm|pc|pt|ex)",
            "${1}${2}",
        ),
        expand("zero_quad", r":0 0 0 0(;|\})", ":0${1}"),
        expand("zero_triple", r":0 0 0(;|\})", ":0${1}"),
        expand("zero_pair", r":0 0(;|\})", ":0${1}"),
        map(
            "zero_position",
            r"(?i)(background-position|transform-origin|webkit-transform-origin|moz-transform-origin|o-transform-origin|ms-transform-origin):0(;|\})",
            |captures| format!("{}:0 0{}", captures[1].to_lowercase(), &captures[2]),
        ),
        expand("leading_zero", r"(:|\s)0+\.(\d+)", "${1}.${2}"),
        map("rgb_to_hex", r"(?i)rgb\s*\(\s*([0-9,\s]+)\s*\)", rgb_to_hex),
        // Leave `filter: chroma(color="#FFFFFF")` alone, IE breaks on `#FFF`
        map(
            "short_hex",
            r#"(?i)([^"'=\s])(\s*)#([0-9a-f])([0-9a-f])([0-9a-f])([0-9a-f])([0-9a-f])([0-9a-f])"#,
            short_hex,
        ),
        map(
            "none_to_zero",
            r"(?i)(border|border-top|border-right|border-bottom|outline|background):none(;|\})",
            |captures| format!("{}:0{}", captures[1].to_lowercase(), &captures[2]),
        ),
        Rule {
            name: "alpha_opacity",
            action: Action::Expand(ALPHA_OPACITY_RE.clone(), ALPHA_OPACITY),
        },
        expand("empty_rules", r"[^};{/]+\{\}", ""),
    ]
});

/// Convert `rgb(51,102,153)` to `#336699`.
///
/// Matches with a channel that is not an integer are left unchanged.
fn rgb_to_hex(captures: &Captures<'_>) -> String {
    let channels: Option<Vec<String>> = captures[1]
        .split(',')
        .map(|channel| {
            channel
                .trim()
                .parse::<u64>()
                .ok()
                .map(|value| format!("{value:02x}"))
        })
        .collect();

    match channels {
        Some(channels) => format!("#{}", channels.concat()),
        None => captures[0].to_owned(),
    }
}

/// Convert `#AABBCC` to `#abc`.
fn short_hex(captures: &Captures<'_>) -> String {
    let pairs = [(3, 4), (5, 6), (7, 8)];

    if pairs
        .iter()
        .all(|&(high, low)| captures[high].eq_ignore_ascii_case(&captures[low]))
    {
        format!(
            "{}{}#{}{}{}",
            &captures[1], &captures[2], &captures[3], &captures[5], &captures[7]
        )
        .to_lowercase()
    } else {
        captures[0].to_owned()
    }
}

/// Apply every rule to the text.
pub(crate) fn rewrite(css: String) -> String {
    RULES.iter().fold(css, |css, rule| {
        let rewritten = rule.apply(&css).into_owned();
        tracing::trace!("rule {}: {} -> {} bytes", rule.name, css.len(), rewritten.len());
        rewritten
    })
}

#[cfg(test)]
mod tests {
    use super::{rewrite, RULES};

    fn apply(name: &str, css: &str) -> String {
        RULES
            .iter()
            .find(|rule| rule.name == name)
            .unwrap()
            .apply(css)
            .into_owned()
    }

    #[test]
    fn rule_names_are_unique() {
        for (index, rule) in RULES.iter().enumerate() {
            assert!(RULES[index + 1..].iter().all(|other| other.name != rule.name));
        }
    }

    #[test]
    fn collapse_whitespace() {
        assert_eq!(apply("collapse_whitespace", "a  {\n\tcolor: red }"), "a { color: red }");
    }

    #[test]
    fn space_before_keeps_descendant_pseudo_class() {
        assert_eq!(apply("space_before", "a :hover {color : red ;}"), "a :hover{color: red;}");
    }

    #[test]
    fn space_before_does_not_leak_marker() {
        let css = apply("space_before", "a:hover , b ::after {x :y}");

        assert!(!css.contains("___"));
        assert_eq!(css, "a:hover, b ::after{x:y}");
    }

    #[test]
    fn first_letter() {
        assert_eq!(
            apply("first_letter", "p:first-letter{x:y}p:first-line,a{x:y}"),
            "p:first-letter {x:y}p:first-line ,a{x:y}"
        );
    }

    #[test]
    fn charset_hoist() {
        assert_eq!(
            apply("charset_hoist", r#"a{x:y}@charset "utf-8";"#),
            r#"@charset "utf-8";a{x:y}"#
        );
    }

    #[test]
    fn charset_dedupe() {
        assert_eq!(
            apply("charset_dedupe", r#"@CHARSET "a"; @charset "a";b{}"#),
            r#"@charset "a";b{}"#
        );
    }

    #[test]
    fn and_space() {
        assert_eq!(
            apply("and_space", "@media screen AND(color){}"),
            "@media screen and (color){}"
        );
        assert_eq!(apply("and_space", "band(x)"), "band(x)");
    }

    #[test]
    fn zero_units() {
        assert_eq!(
            apply("zero_units", "a{margin:0PX 0em 0% 0in;width:10px}"),
            "a{margin:0 0 0 0;width:10px}"
        );
    }

    #[test]
    fn zero_lists_longest_first() {
        let css = "a{margin:0 0 0 0;padding:0 0 0}b{margin:0 0}";
        let css = apply("zero_quad", css);
        let css = apply("zero_triple", &css);
        let css = apply("zero_pair", &css);

        assert_eq!(css, "a{margin:0;padding:0}b{margin:0}");
    }

    #[test]
    fn zero_position() {
        assert_eq!(
            apply("zero_position", "a{Background-Position:0;-webkit-transform-origin:0}"),
            "a{background-position:0 0;-webkit-transform-origin:0 0}"
        );
    }

    #[test]
    fn leading_zero() {
        assert_eq!(
            apply("leading_zero", "a{opacity:0.6;margin:1px 0.5em 10.5px}"),
            "a{opacity:.6;margin:1px .5em 10.5px}"
        );
    }

    #[test]
    fn rgb_to_hex() {
        assert_eq!(
            apply("rgb_to_hex", "a{color:rgb(51, 102, 153);b:RGB (0,0,0)}"),
            "a{color:#336699;b:#000000}"
        );
    }

    #[test]
    fn rgb_with_missing_channel_is_kept() {
        assert_eq!(apply("rgb_to_hex", "a{color:rgb(1,,2)}"), "a{color:rgb(1,,2)}");
    }

    #[test]
    fn short_hex() {
        assert_eq!(
            apply("short_hex", "a{color:#AABBCC;background:#abcdef}"),
            "a{color:#abc;background:#abcdef}"
        );
    }

    #[test]
    fn short_hex_skips_filter_attributes() {
        assert_eq!(
            apply("short_hex", r##"a{filter:chroma(color="#FFFFFF");b:x=#FFFFFF}"##),
            r##"a{filter:chroma(color="#FFFFFF");b:x=#FFFFFF}"##
        );
    }

    #[test]
    fn none_to_zero() {
        assert_eq!(
            apply("none_to_zero", "a{border-top:none;OUTLINE:none}"),
            "a{border-top:0;outline:0}"
        );
    }

    #[test]
    fn empty_rules() {
        assert_eq!(
            apply("empty_rules", "a{}b{color:red}c,d{}"),
            "b{color:red}"
        );
    }

    #[test]
    fn empty_rules_keep_semicolon_and_slash() {
        assert_eq!(
            apply("empty_rules", "a{;}b/{}c{d:e}"),
            "a{;}b/{}c{d:e}"
        );
    }

    #[test]
    fn rewrite_declaration_block() {
        assert_eq!(
            rewrite("a{ color : #ffffff; border:none; }".to_owned()),
            "a{color:#fff;border:0}"
        );
    }
}
