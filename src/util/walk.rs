//! Walk directories recursively.
//!
//! This module uses [`ignore`] under the hood.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// A directory walker.
///
/// This walker creates a recursive directory iterator that filters hidden files
/// and paths specified in `.gitignore` files.
pub struct DirWalker {
    /// Builds a recursive directory iterator.
    builder: WalkBuilder,
}

impl DirWalker {
    /// Create a directory walker.
    pub fn new<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        let mut builder = WalkBuilder::new(dir);

        builder
            .hidden(true)
            .git_ignore(true)
            .ignore(false)
            .parents(false)
            .git_global(false)
            .git_exclude(false)
            .require_git(false);

        Self { builder }
    }

    /// Return the paths of files whose name ends with `suffix`, sorted.
    ///
    /// Entries that cannot be read are skipped.
    pub fn files_with_suffix(&self, suffix: &str) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self
            .builder
            .build()
            .filter_map(|result| result.ok())
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|file_type| file_type.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(suffix))
            })
            .collect();

        paths.sort();
        paths
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::{prelude::*, TempDir};

    use super::DirWalker;

    #[test]
    fn suffix() {
        let dir = TempDir::new().unwrap();

        dir.child("b.css").touch().unwrap();
        dir.child("a.css").touch().unwrap();
        dir.child("a.css.min").touch().unwrap();
        dir.child("nested/c.css").touch().unwrap();

        let result = DirWalker::new(dir.path()).files_with_suffix(".css");

        assert_eq!(
            result,
            vec![
                dir.path().join("a.css"),
                dir.path().join("b.css"),
                dir.path().join("nested/c.css"),
            ]
        );
    }

    #[test]
    fn hidden() {
        let dir = TempDir::new().unwrap();

        dir.child(".foo.css").touch().unwrap();
        dir.child("bar.css").touch().unwrap();

        let result = DirWalker::new(dir.path()).files_with_suffix(".css");

        assert_eq!(result, vec![dir.path().join("bar.css")]);
    }

    #[test]
    fn git_ignore() {
        let dir = TempDir::new().unwrap();

        dir.child(".gitignore").write_str("foo.css").unwrap();
        dir.child("foo.css").touch().unwrap();
        dir.child("bar.css").touch().unwrap();

        let result = DirWalker::new(dir.path()).files_with_suffix(".css");

        assert_eq!(result, vec![dir.path().join("bar.css")]);
    }
}
