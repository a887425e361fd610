//! A CSS minifier in the tradition of the YUI Compressor.
//!
//! The minifier removes comments and whitespace and applies a fixed sequence
//! of textual rewrites (color shortening, zero-unit stripping, redundant
//! semicolon removal...) while leaving string literals, `/*! ... */`
//! comments and a few browser hacks untouched.
//!
//! cssmin can be used as both a CLI and a library.
//!
//! ```
//! assert_eq!(cssmin::minify_css("a { margin: 0px; }"), "a{margin:0}");
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
mod error;
pub mod fixtures;
pub mod minify;
pub mod util;

pub use config::Config;
pub use minify::{minify_css, minify_css_with, MinifyOptions};
