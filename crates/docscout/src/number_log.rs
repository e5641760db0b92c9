//! Number log spreadsheet reader
//!
//! Reads the first worksheet of the number log into plain rows so the
//! registry never sees spreadsheet types.

use crate::error::{Result, ScoutError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Where things live in the number log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLayout {
    /// A1-style reference of the project number cell
    pub project_number_cell: String,
    /// A1-style reference of the project title cell
    pub project_title_cell: String,
    /// First data row, 1-based
    pub start_row: u32,
    pub docnr_col: String,
    pub title_col: String,
}

impl Default for LogLayout {
    fn default() -> Self {
        Self {
            project_number_cell: "C1".to_string(),
            project_title_cell: "C2".to_string(),
            start_row: 5,
            docnr_col: "C".to_string(),
            title_col: "B".to_string(),
        }
    }
}

/// One data row of the number log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    /// 1-based spreadsheet row number
    pub row: u32,
    pub doc_nr: String,
    pub title: String,
}

impl LogRow {
    pub fn new(row: u32, doc_nr: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            row,
            doc_nr: doc_nr.into(),
            title: title.into(),
        }
    }
}

/// Contents of a number log, read and closed.
#[derive(Debug, Clone, Default)]
pub struct NumberLog {
    pub project_number: String,
    pub project_title: String,
    pub rows: Vec<LogRow>,
}

impl NumberLog {
    /// Read the first worksheet of the workbook at `path`.
    pub fn open(path: &Path, layout: &LogLayout) -> Result<Self> {
        let spreadsheet_err = |source| ScoutError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ScoutError::NoWorksheet(path.to_path_buf()))?
            .map_err(spreadsheet_err)?;

        let log = Self::from_range(&range, layout)?;
        debug!(path = %path.display(), rows = log.rows.len(), "Read number log");
        Ok(log)
    }

    fn from_range(range: &Range<Data>, layout: &LogLayout) -> Result<Self> {
        let project_number = cell_text(range, parse_cell_ref(&layout.project_number_cell)?);
        let project_title = cell_text(range, parse_cell_ref(&layout.project_title_cell)?);

        let docnr_col = parse_column(&layout.docnr_col)?;
        let title_col = parse_column(&layout.title_col)?;
        if layout.start_row == 0 {
            return Err(ScoutError::Config(
                "start_row is 1-based and must be at least 1".to_string(),
            ));
        }

        let mut rows = Vec::new();
        if let Some((last_row, _)) = range.end() {
            for row in (layout.start_row - 1)..=last_row {
                rows.push(LogRow {
                    row: row + 1,
                    doc_nr: cell_text(range, (row, docnr_col)),
                    title: cell_text(range, (row, title_col)),
                });
            }
        }

        Ok(Self {
            project_number,
            project_title,
            rows,
        })
    }
}

/// Formatted value of an absolute cell, empty when missing.
fn cell_text(range: &Range<Data>, pos: (u32, u32)) -> String {
    match range.get_value(pos) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Convert a column name (`A`, `C`, `AA`) to a zero-based index.
pub fn parse_column(col: &str) -> Result<u32> {
    let col = col.trim();
    if col.is_empty() || !col.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ScoutError::CellRef(col.to_string()));
    }
    let mut index: u32 = 0;
    for c in col.chars() {
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ScoutError::CellRef(col.to_string()))?;
    }
    Ok(index - 1)
}

/// Convert an A1-style reference to zero-based `(row, column)`.
pub fn parse_cell_ref(cell: &str) -> Result<(u32, u32)> {
    let cell = cell.trim();
    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ScoutError::CellRef(cell.to_string()))?;
    let (col, row) = cell.split_at(split);
    let col = parse_column(col).map_err(|_| ScoutError::CellRef(cell.to_string()))?;
    let row: u32 = row
        .parse()
        .map_err(|_| ScoutError::CellRef(cell.to_string()))?;
    if row == 0 {
        return Err(ScoutError::CellRef(cell.to_string()));
    }
    Ok((row - 1, col))
}
