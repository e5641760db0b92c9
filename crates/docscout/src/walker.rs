//! Project folder traversal
//!
//! Depth-first walk in file-name order. Directories named in the skip list
//! are pruned together with everything below them.

use crate::error::{Result, ScoutError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Version-control directories are skipped unless configured otherwise.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git"];

/// An entry that could not be read during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkIssue {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Walker over the files of one project folder.
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    skip_dir_names: HashSet<String>,
}

impl FileWalker {
    /// Prepare a walk of `root`. Fails when the root cannot be listed.
    pub fn new<I, S>(root: &Path, skip_dir_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = validate_root(root)?;
        Ok(Self {
            root,
            skip_dir_names: skip_dir_names.into_iter().map(Into::into).collect(),
        })
    }

    /// Canonical absolute root. Every walked path lives under it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every non-directory entry below the root.
    pub fn walk(&self) -> impl Iterator<Item = std::result::Result<PathBuf, WalkIssue>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                // the root itself is never pruned
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !self.skip_dir_names.contains(name.as_ref())
            })
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => None,
                Ok(entry) => Some(Ok(entry.into_path())),
                Err(err) => Some(Err(WalkIssue {
                    path: err.path().map(Path::to_path_buf),
                    message: err.to_string(),
                })),
            })
    }
}

/// Check that `root` is a readable directory and return its canonical form.
fn validate_root(root: &Path) -> Result<PathBuf> {
    let fail = |reason: String| ScoutError::RootTraversal {
        path: root.to_path_buf(),
        reason,
    };

    let canonical = root
        .canonicalize()
        .map_err(|e| fail(format!("path not found: {}", e)))?;
    if !canonical.is_dir() {
        return Err(fail("not a directory".to_string()));
    }
    std::fs::read_dir(&canonical).map_err(|e| fail(format!("cannot read directory: {}", e)))?;
    Ok(canonical)
}
