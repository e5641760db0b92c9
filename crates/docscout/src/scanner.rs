//! One scan of a project folder
//!
//! Reads the number log, builds the registry, then walks the folder and
//! classifies each file. The whole pass is synchronous; the returned
//! catalog is complete before anyone else can see it.

use crate::classifier::{Classification, FileClassifier};
use crate::error::Result;
use crate::number_log::{LogLayout, NumberLog};
use crate::parser::{DocNumberParser, DEFAULT_NR_PATTERN, DEFAULT_REV_PATTERN};
use crate::registry::{build_registry, resolve_project};
use crate::types::Catalog;
use crate::walker::{FileWalker, WalkIssue, DEFAULT_SKIP_DIRS};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything a scan needs, with paths already resolved.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root_dir: PathBuf,
    pub number_log: PathBuf,
    pub layout: LogLayout,
    /// Overrides the project number cell when set
    pub project_number: Option<String>,
    /// Overrides the project title cell when set
    pub project_title: Option<String>,
    pub nr_pattern: String,
    pub rev_pattern: String,
    pub skip_dir_names: Vec<String>,
}

impl ScanOptions {
    pub fn new(root_dir: impl Into<PathBuf>, number_log: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            number_log: number_log.into(),
            layout: LogLayout::default(),
            project_number: None,
            project_title: None,
            nr_pattern: DEFAULT_NR_PATTERN.to_string(),
            rev_pattern: DEFAULT_REV_PATTERN.to_string(),
            skip_dir_names: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A recoverable problem met during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// Number log row whose document number did not parse
    InvalidRow { row: u32, raw: String },
    /// Two rows share a canonical number; `row` replaced `first_row`
    DuplicateNumber { nr: String, first_row: u32, row: u32 },
    /// A file or directory that could not be read during the walk
    WalkAccess { path: Option<PathBuf>, message: String },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::InvalidRow { row, raw } => {
                write!(f, "Row {}: document number not formatted correctly: '{}'", row, raw)
            }
            ScanWarning::DuplicateNumber { nr, first_row, row } => {
                write!(
                    f,
                    "Row {}: document number {} already used on row {}, replacing it",
                    row, nr, first_row
                )
            }
            ScanWarning::WalkAccess { path: Some(path), message } => {
                write!(f, "Cannot read {}: {}", path.display(), message)
            }
            ScanWarning::WalkAccess { path: None, message } => write!(f, "Walk error: {}", message),
        }
    }
}

impl From<WalkIssue> for ScanWarning {
    fn from(issue: WalkIssue) -> Self {
        ScanWarning::WalkAccess {
            path: issue.path,
            message: issue.message,
        }
    }
}

/// Counters for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub docs: u64,
    pub files_seen: u64,
    pub files_matched: u64,
    pub files_case_mismatch: u64,
    pub files_orphaned: u64,
    pub files_ignored: u64,
    pub walk_errors: u64,
    pub duration_ms: u64,
}

/// Output of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root_dir: PathBuf,
    pub catalog: Catalog,
    pub warnings: Vec<ScanWarning>,
    pub stats: ScanStats,
}

/// Project folder scanner with compiled patterns.
#[derive(Debug, Clone)]
pub struct Scanner {
    options: ScanOptions,
    parser: DocNumberParser,
}

impl Scanner {
    /// Compile the configured patterns. Malformed patterns are fatal.
    pub fn new(options: ScanOptions) -> Result<Self> {
        let parser = DocNumberParser::new(&options.nr_pattern, &options.rev_pattern)?;
        Ok(Self { options, parser })
    }

    /// Read the number log and scan the project folder.
    pub fn scan(&self) -> Result<ScanReport> {
        let log = NumberLog::open(&self.options.number_log, &self.options.layout)?;
        self.scan_with_log(log)
    }

    /// Scan the project folder against an already read number log.
    pub fn scan_with_log(&self, log: NumberLog) -> Result<ScanReport> {
        let start = Instant::now();
        let skip = self.options.skip_dir_names.iter().cloned();
        let walker = FileWalker::new(&self.options.root_dir, skip)?;
        let root = walker.root().to_path_buf();

        let project = resolve_project(
            self.options.project_number.as_deref(),
            self.options.project_title.as_deref(),
            &log.project_number,
            &log.project_title,
        );
        info!(
            root = %root.display(),
            project_number = %project.number,
            project_title = %project.title,
            "Starting scan"
        );
        if project.number.is_empty() {
            warn!("Project number is empty, orphan files will not be detected");
        }

        let registry = build_registry(log.rows, &self.parser, project);
        let mut catalog = registry.catalog;
        let mut warnings = registry.warnings;
        let mut stats = ScanStats {
            docs: catalog.len() as u64,
            ..ScanStats::default()
        };

        let classifier = FileClassifier::new(&catalog, &self.parser);
        for item in walker.walk() {
            let path = match item {
                Ok(path) => path,
                Err(issue) => {
                    warn!(path = ?issue.path, error = %issue.message, "Skipping unreadable entry");
                    stats.walk_errors += 1;
                    warnings.push(ScanWarning::from(issue));
                    continue;
                }
            };

            stats.files_seen += 1;
            let classification = classifier.classify(&path, &root);
            match &classification {
                Classification::Exact { nr, .. } => {
                    stats.files_matched += 1;
                    debug!(path = %path.display(), nr = %nr, "Matched document");
                }
                Classification::CaseMismatch { nr, .. } => {
                    stats.files_case_mismatch += 1;
                    debug!(path = %path.display(), nr = %nr, "Matched document ignoring case");
                }
                Classification::Orphan(_) => {
                    stats.files_orphaned += 1;
                    debug!(path = %path.display(), "Orphan project file");
                }
                Classification::Ignored => stats.files_ignored += 1,
            }
            classification.apply(&mut catalog);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            docs = stats.docs,
            files = stats.files_seen,
            matched = stats.files_matched,
            case_mismatch = stats.files_case_mismatch,
            orphans = stats.files_orphaned,
            warnings = warnings.len(),
            duration_ms = stats.duration_ms,
            "Scan complete"
        );

        Ok(ScanReport {
            root_dir: root,
            catalog,
            warnings,
            stats,
        })
    }
}
