//! Document number parsing
//!
//! Splits a raw number-log entry or file name into its canonical document
//! number and optional revision code using two configurable regexes.

use crate::error::{ParseError, Result, ScoutError};
use regex::Regex;

/// Alphanumerics, a hyphen, alphanumerics, anchored at the start.
pub const DEFAULT_NR_PATTERN: &str = r"(^[[:alnum:]]+-[[:alnum:]]+)";

/// A `-` or `_`, two alphanumerics, then end of string or `-`, `_`, `.`.
pub const DEFAULT_REV_PATTERN: &str = r"(?:[\-_])([[:alnum:]]{2})(?:$|[\-_\.])";

/// A parsed document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocNumber {
    pub nr: String,
    /// Empty when the revision pattern does not match.
    pub rev: String,
}

/// Compiled number and revision patterns.
#[derive(Debug, Clone)]
pub struct DocNumberParser {
    nr: Regex,
    rev: Regex,
}

impl Default for DocNumberParser {
    fn default() -> Self {
        Self::new(DEFAULT_NR_PATTERN, DEFAULT_REV_PATTERN)
            .expect("default document number patterns compile")
    }
}

impl DocNumberParser {
    /// Compile both patterns. The revision pattern must have exactly one
    /// capturing group.
    pub fn new(nr_pattern: &str, rev_pattern: &str) -> Result<Self> {
        let nr = Regex::new(nr_pattern).map_err(|e| ScoutError::Pattern {
            kind: "number",
            pattern: nr_pattern.to_string(),
            reason: e.to_string(),
        })?;
        let rev = Regex::new(rev_pattern).map_err(|e| ScoutError::Pattern {
            kind: "revision",
            pattern: rev_pattern.to_string(),
            reason: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        let groups = rev.captures_len() - 1;
        if groups != 1 {
            return Err(ScoutError::Pattern {
                kind: "revision",
                pattern: rev_pattern.to_string(),
                reason: format!("expected exactly one capturing group, found {}", groups),
            });
        }

        Ok(Self { nr, rev })
    }

    /// Parse `raw` into a canonical number and revision.
    pub fn parse(&self, raw: &str) -> std::result::Result<DocNumber, ParseError> {
        let nr = match self.nr.find(raw) {
            Some(m) if !m.as_str().is_empty() => m.as_str().to_string(),
            _ => return Err(ParseError::InvalidFormat(raw.to_string())),
        };
        Ok(DocNumber {
            nr,
            rev: self.revision(raw),
        })
    }

    /// Revision code of `raw`, or an empty string.
    pub fn revision(&self, raw: &str) -> String {
        self.rev
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}
