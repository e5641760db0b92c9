//! Fatal errors with suggestions for the command line

use docscout::ScoutError;
use std::fmt;
use std::path::Path;

/// An error with context and suggestions for how to fix it
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// An error with only a message; add detail with the builders below.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// One line explaining what the program was trying to do.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Append `TRY:` lines, printed in order after the context.
    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    /// The config file passed on the command line does not exist.
    pub fn config_not_found(path: &Path) -> Self {
        Self::new(format!("Config file not found: {}", path.display()))
            .with_context("docscout reads its settings from a TOML file in the project folder")
            .with_suggestions([
                "TRY: Pass the config path explicitly: docscout path/to/config.toml".to_string(),
                "TRY: Create config.toml with: number_log = \"number_log.xlsx\"".to_string(),
            ])
    }

    /// Attach context and suggestions to a fatal scan error.
    ///
    /// Errors without specific advice keep only their message.
    pub fn from_scan_error(err: &ScoutError) -> Self {
        let base = Self::new(err.to_string());
        match err {
            ScoutError::Spreadsheet { path, .. } | ScoutError::NoWorksheet(path) => base
                .with_context("The number log could not be read")
                .with_suggestions([
                    format!("TRY: Check that the file exists: ls -la {}", path.display()),
                    "TRY: Close the workbook if another program holds it locked".to_string(),
                    "TRY: Set number_log in config.toml".to_string(),
                ]),
            ScoutError::Pattern { .. } => base
                .with_context("nr_pattern and rev_pattern must be valid regular expressions")
                .with_suggestions([
                    "TRY: rev_pattern needs exactly one capturing group",
                    "TRY: The default is (?:[\\-_])([[:alnum:]]{2})(?:$|[\\-_\\.])",
                ]),
            ScoutError::CellRef(_) => base
                .with_context("Cells use A1 notation and columns use letters")
                .with_suggestions(["TRY: project_number_cell = \"C1\", docnr_col = \"C\""]),
            ScoutError::RootTraversal { path, .. } => base
                .with_context("The project folder could not be opened")
                .with_suggestions([
                    format!("TRY: Check permissions: ls -la {}", path.display()),
                    "TRY: Set root_dir in config.toml".to_string(),
                ]),
            _ => base,
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
