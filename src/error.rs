use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads the attendance workbook or renders certificates.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the run summary cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when an Office package cannot be opened or written as a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Raised when a package part is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Raised when the attendance directory holds no spreadsheet.
    #[error("no {extension} file found in {}", dir.display())]
    NoSpreadsheet { dir: PathBuf, extension: String },

    /// Raised when the attendance directory holds more than one spreadsheet.
    #[error(
        "multiple {extension} files found in {} ({count}), expected exactly one",
        dir.display()
    )]
    MultipleSpreadsheets {
        dir: PathBuf,
        extension: String,
        count: usize,
    },

    /// Raised when a workbook part does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the template for a worksheet does not exist.
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),

    /// Raised when a template package lacks the parts a certificate needs.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// Raised when the configured placeholder shape is absent from the slide.
    #[error("placeholder {locator} not found on slide ({shape_count} shapes)")]
    MissingPlaceholder { locator: String, shape_count: usize },

    /// Raised when the located shape cannot hold text.
    #[error("shape {position} is a <{kind}> element and has no text frame")]
    UnsupportedShape { position: usize, kind: String },

    /// Raised when the certificate styling is unusable.
    #[error("invalid certificate style: {0}")]
    InvalidStyle(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
