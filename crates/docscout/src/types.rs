//! Catalog data model

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Comment attached to files matched only case-insensitively.
pub const CASE_MISMATCH_COMMENT: &str = "filename case does not match document number case";

/// One logical document from the number log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doc {
    /// Canonical document number (catalog key)
    pub nr: String,
    /// Raw number-log entry, possibly including a revision suffix
    pub doc_nr: String,
    pub title: String,
    /// Revision extracted from `doc_nr`, empty if none
    pub rev: String,
    /// Files in discovery order
    pub files: Vec<DocFile>,
}

impl Doc {
    pub fn new(
        nr: impl Into<String>,
        doc_nr: impl Into<String>,
        title: impl Into<String>,
        rev: impl Into<String>,
    ) -> Self {
        Self {
            nr: nr.into(),
            doc_nr: doc_nr.into(),
            title: title.into(),
            rev: rev.into(),
            files: Vec::new(),
        }
    }
}

/// A file on disk attached to a document or to the orphan list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocFile {
    pub file_path: PathBuf,
    pub rel_path: PathBuf,
    /// Set only for exact matches
    pub nr: String,
    /// Set only for exact matches
    pub rev: String,
    pub comment: String,
}

impl DocFile {
    /// A file with no document information, as stored for orphans.
    pub fn bare(file_path: PathBuf, rel_path: PathBuf) -> Self {
        Self {
            file_path,
            rel_path,
            nr: String::new(),
            rev: String::new(),
            comment: String::new(),
        }
    }
}

/// Project number and title, from config or the number log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub number: String,
    pub title: String,
}

/// Snapshot of one scan: every document keyed by canonical number, plus the
/// project files that matched none of them.
///
/// Only the registry builder and the scanner mutate a catalog. Once a scan
/// returns it, it is treated as read-only and replaced wholesale on rescan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    project: ProjectInfo,
    docs: BTreeMap<String, Doc>,
    orphan_files: Vec<DocFile>,
}

impl Catalog {
    pub fn new(project: ProjectInfo) -> Self {
        Self {
            project,
            docs: BTreeMap::new(),
            orphan_files: Vec::new(),
        }
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    /// Documents ordered by canonical number.
    pub fn docs(&self) -> impl Iterator<Item = &Doc> {
        self.docs.values()
    }

    pub fn get(&self, nr: &str) -> Option<&Doc> {
        self.docs.get(nr)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn orphan_files(&self) -> &[DocFile] {
        &self.orphan_files
    }

    /// Total number of files attached to documents.
    pub fn attached_file_count(&self) -> usize {
        self.docs.values().map(|d| d.files.len()).sum()
    }

    /// Insert a document, returning the one it replaced.
    pub(crate) fn insert(&mut self, doc: Doc) -> Option<Doc> {
        self.docs.insert(doc.nr.clone(), doc)
    }

    /// Append a file to an existing document. Returns false for unknown keys.
    pub(crate) fn attach(&mut self, nr: &str, file: DocFile) -> bool {
        match self.docs.get_mut(nr) {
            Some(doc) => {
                doc.files.push(file);
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_orphan(&mut self, file: DocFile) {
        self.orphan_files.push(file);
    }
}
