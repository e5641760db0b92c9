//! Registry construction from number log rows

use crate::number_log::LogRow;
use crate::parser::DocNumberParser;
use crate::scanner::ScanWarning;
use crate::types::{Catalog, Doc, ProjectInfo};
use std::collections::HashMap;
use tracing::warn;

/// Result of building a registry: a catalog with empty file lists and the
/// recoverable problems met on the way.
#[derive(Debug)]
pub struct RegistryBuild {
    pub catalog: Catalog,
    pub warnings: Vec<ScanWarning>,
}

/// Resolve project number and title, preferring configured values over cells.
pub fn resolve_project(
    configured_number: Option<&str>,
    configured_title: Option<&str>,
    cell_number: &str,
    cell_title: &str,
) -> ProjectInfo {
    let pick = |configured: Option<&str>, cell: &str| match configured {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => cell.to_string(),
    };
    ProjectInfo {
        number: pick(configured_number, cell_number),
        title: pick(configured_title, cell_title),
    }
}

/// Build the document registry from rows in spreadsheet order.
///
/// Blank rows are skipped silently. Rows that don't parse, and rows whose
/// canonical number was already seen, produce warnings; for duplicates the
/// later row wins.
pub fn build_registry<I>(rows: I, parser: &DocNumberParser, project: ProjectInfo) -> RegistryBuild
where
    I: IntoIterator<Item = LogRow>,
{
    let mut catalog = Catalog::new(project);
    let mut warnings = Vec::new();
    let mut seen_at: HashMap<String, u32> = HashMap::new();

    for LogRow { row, doc_nr, title } in rows {
        let trimmed = doc_nr.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parsed = match parser.parse(trimmed) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(row, raw = %doc_nr, error = %err, "Skipping number log row");
                warnings.push(ScanWarning::InvalidRow { row, raw: doc_nr });
                continue;
            }
        };

        if let Some(first_row) = seen_at.insert(parsed.nr.clone(), row) {
            warn!(
                nr = %parsed.nr,
                first_row,
                row,
                "Duplicate document number, later row replaces earlier"
            );
            warnings.push(ScanWarning::DuplicateNumber {
                nr: parsed.nr.clone(),
                first_row,
                row,
            });
        }

        catalog.insert(Doc::new(parsed.nr, doc_nr, title.trim(), parsed.rev));
    }

    RegistryBuild { catalog, warnings }
}
