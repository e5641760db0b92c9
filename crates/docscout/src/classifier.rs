//! File classification against the document registry
//!
//! Rules, first match wins:
//! 1. file name starts with a document number (case-sensitive)
//! 2. file name starts with a document number ignoring case
//! 3. file name starts with the project number: orphan
//! 4. anything else is not a project file
//!
//! Within rules 1 and 2 the longest matching number wins, so `P1-12_A.pdf`
//! belongs to `P1-12` rather than `P1-1`.

use crate::parser::DocNumberParser;
use crate::types::{Catalog, DocFile, CASE_MISMATCH_COMMENT};
use std::path::Path;

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Exact { nr: String, file: DocFile },
    CaseMismatch { nr: String, file: DocFile },
    Orphan(DocFile),
    Ignored,
}

impl Classification {
    /// Record the outcome in the catalog under construction.
    pub(crate) fn apply(self, catalog: &mut Catalog) {
        match self {
            Classification::Exact { nr, file } | Classification::CaseMismatch { nr, file } => {
                catalog.attach(&nr, file);
            }
            Classification::Orphan(file) => catalog.push_orphan(file),
            Classification::Ignored => {}
        }
    }
}

struct Key {
    nr: String,
    lower: String,
}

/// Matches file names against a fixed set of document numbers.
pub struct FileClassifier<'a> {
    keys: Vec<Key>,
    parser: &'a DocNumberParser,
    project_number: String,
}

impl<'a> FileClassifier<'a> {
    /// Snapshot the catalog's keys. Files attached later do not change them.
    pub fn new(catalog: &Catalog, parser: &'a DocNumberParser) -> Self {
        let keys = catalog
            .keys()
            .map(|nr| Key {
                nr: nr.to_string(),
                lower: nr.to_lowercase(),
            })
            .collect();
        Self {
            keys,
            parser,
            project_number: catalog.project().number.clone(),
        }
    }

    /// Classify the file at `path`, which must live under `root`.
    pub fn classify(&self, path: &Path, root: &Path) -> Classification {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return Classification::Ignored,
        };
        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        if let Some(key) = self.exact_match(&name) {
            let file = DocFile {
                file_path: path.to_path_buf(),
                rel_path,
                nr: key.nr.clone(),
                rev: self.parser.revision(&name),
                comment: String::new(),
            };
            return Classification::Exact {
                nr: key.nr.clone(),
                file,
            };
        }

        if let Some(key) = self.case_insensitive_match(&name) {
            let mut file = DocFile::bare(path.to_path_buf(), rel_path);
            file.comment = CASE_MISMATCH_COMMENT.to_string();
            return Classification::CaseMismatch {
                nr: key.nr.clone(),
                file,
            };
        }

        // an empty project number would make every file an orphan
        if !self.project_number.is_empty() && name.starts_with(self.project_number.as_str()) {
            return Classification::Orphan(DocFile::bare(path.to_path_buf(), rel_path));
        }

        Classification::Ignored
    }

    fn exact_match(&self, name: &str) -> Option<&Key> {
        self.keys
            .iter()
            .filter(|k| name.starts_with(k.nr.as_str()))
            .max_by_key(|k| k.nr.len())
    }

    fn case_insensitive_match(&self, name: &str) -> Option<&Key> {
        let lower_name = name.to_lowercase();
        self.keys
            .iter()
            .filter(|k| lower_name.starts_with(k.lower.as_str()))
            // longest first, then the smallest number among equals
            .max_by(|a, b| a.lower.len().cmp(&b.lower.len()).then_with(|| b.nr.cmp(&a.nr)))
    }
}
