//! Report pipeline error types

use thiserror::Error;

/// Result type for report generation
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while generating reports.
///
/// Everything raised inside one artist's generation sequence is caught at
/// the artist boundary by the driver; only failures before the per-artist
/// loop (opening the workbook, creating the output directory) abort a run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be read
    #[error("Workbook error: {0}")]
    Xlsx(#[from] encore_xlsx::XlsxError),

    /// Core model error
    #[error("Core error: {0}")]
    Core(#[from] encore_core::Error),

    /// PDF document error
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// A derived sheet name has no matching sheet in the workbook
    #[error("Sheet not found: {0}")]
    MissingSheet(String),

    /// A sheet lacks one of its required header columns
    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn {
        /// Sheet name
        sheet: String,
        /// Header text that was not found in the first row
        column: String,
    },
}
