use std::path::PathBuf;

use serde::Serialize;

/// A single spreadsheet cell as seen by the name extractor.
///
/// Only the display value and the bold flag of the cell font are retained;
/// every other style attribute is irrelevant for certificate generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Display value, `None` for empty cells.
    pub value: Option<String>,
    /// Whether the cell font is bold.
    pub bold: bool,
}

impl Cell {
    /// Builds a cell holding `value`.
    pub fn new(value: impl Into<String>, bold: bool) -> Self {
        Self {
            value: Some(value.into()),
            bold,
        }
    }

    /// Builds an empty cell that still carries a style.
    pub fn empty(bold: bool) -> Self {
        Self { value: None, bold }
    }

    /// Returns the value when it is present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }
}

/// One tab of the attendance workbook. Row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    pub title: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    pub fn new(title: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    /// Returns the cell at the zero-based `(row, col)` position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }
}

/// Worksheets in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub worksheets: Vec<Worksheet>,
}

/// A certificate that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateFailure {
    pub worksheet: String,
    pub name: String,
    pub reason: String,
}

/// A worksheet whose names were not processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedWorksheet {
    pub worksheet: String,
    pub reason: String,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub spreadsheet: PathBuf,
    pub created: Vec<PathBuf>,
    pub failed: Vec<CertificateFailure>,
    pub skipped: Vec<SkippedWorksheet>,
}
