//! docscout - Number Log Document Catalog
//!
//! Builds a catalog of project documents from the number log spreadsheet,
//! then walks the project folder and sorts every file into a document, a
//! case-mismatched near miss, or the orphan list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Number log  │────▶│  Registry   │────▶│   Catalog   │
//! │ (xlsx rows) │     │ (parser)    │     │ (empty)     │
//! └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐     ┌──────▼──────┐
//! │   Folder    │────▶│ Classifier  │────▶│   Catalog   │
//! │  (walker)   │     │             │     │ + orphans   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod number_log;
pub mod parser;
pub mod registry;
pub mod scanner;
pub mod store;
pub mod types;
pub mod walker;

// Re-exports for convenience
pub use classifier::{Classification, FileClassifier};
pub use config::DocscoutConfig;
pub use error::{ParseError, Result, ScoutError};
pub use number_log::{LogLayout, LogRow, NumberLog};
pub use parser::{DocNumber, DocNumberParser};
pub use registry::{build_registry, RegistryBuild};
pub use scanner::{ScanOptions, ScanReport, ScanStats, ScanWarning, Scanner};
pub use store::CatalogStore;
pub use types::{Catalog, Doc, DocFile, ProjectInfo, CASE_MISMATCH_COMMENT};
pub use walker::{FileWalker, WalkIssue};
