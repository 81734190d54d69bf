use crate::errors::Error;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory names that are never descended into unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 4] = [".git", ".svn", "node_modules", "__pycache__"];

/// Paths and directory names a walk must never hand to the rewriter.
///
/// File paths are stored resolved (canonical where possible), so `./links.txt`
/// and `/abs/links.txt` compare equal.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    dir_names: HashSet<OsString>,
    file_paths: HashSet<PathBuf>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An exclusion set preloaded with [`DEFAULT_EXCLUDED_DIRS`].
    pub fn with_default_dirs() -> Self {
        let mut set = Self::new();
        for name in DEFAULT_EXCLUDED_DIRS {
            set.exclude_dir_name(name);
        }
        set
    }

    pub fn exclude_dir_name(&mut self, name: impl Into<OsString>) {
        self.dir_names.insert(name.into());
    }

    pub fn exclude_file(&mut self, path: impl AsRef<Path>) {
        self.file_paths.insert(resolve_path(path.as_ref()));
    }

    pub fn is_excluded_dir_name(&self, name: &OsStr) -> bool {
        self.dir_names.contains(name)
    }

    pub fn is_excluded_file(&self, path: &Path) -> bool {
        !self.file_paths.is_empty() && self.file_paths.contains(&resolve_path(path))
    }
}

/// Resolves `path` to an absolute path, following symlinks when the file exists.
pub fn resolve_path(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// One step of a tree walk.
#[derive(Debug)]
pub enum WalkEvent {
    /// A file (or a link that no longer resolves) to hand to the rewriter.
    Candidate(PathBuf),
    /// A file that matched the exclusion set and was left alone.
    SkippedSource(PathBuf),
    /// An entry could not be read; the walk carries on past it.
    Error(Error),
}

/// A lazy, single-pass, top-down walk over candidate files under a root.
///
/// Excluded directories are pruned before descent, so nothing beneath them is
/// ever visited. Entries within a directory are yielded in file-name order, and
/// a directory's listing is complete before its first file is yielded.
pub struct TreeWalker {
    inner: ignore::Walk,
    exclusions: Arc<ExclusionSet>,
}

impl TreeWalker {
    pub fn new(root: &Path, exclusions: ExclusionSet) -> Self {
        let exclusions = Arc::new(exclusions);
        let prune = Arc::clone(&exclusions);

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false) // Every file counts, hidden or ignored
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                entry.depth() == 0 || !is_dir || !prune.is_excluded_dir_name(entry.file_name())
            });

        Self {
            inner: builder.build(),
            exclusions,
        }
    }
}

impl Iterator for TreeWalker {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(WalkEvent::Error(e.into())),
            };

            let path = entry.path();
            // Links are followed here. A dangling link is still a candidate so
            // the rewriter reports it as unreadable instead of dropping it.
            match fs::metadata(path) {
                Ok(meta) if !meta.is_file() => continue,
                Ok(_) => {}
                Err(_) if entry.file_type().is_some_and(|ft| ft.is_dir()) => continue,
                Err(_) => {}
            }

            if self.exclusions.is_excluded_file(path) {
                tracing::debug!(path = %path.display(), "excluded by path");
                return Some(WalkEvent::SkippedSource(entry.into_path()));
            }
            return Some(WalkEvent::Candidate(entry.into_path()));
        }
    }
}
