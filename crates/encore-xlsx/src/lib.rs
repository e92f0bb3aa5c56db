//! # encore-xlsx
//!
//! Read-only XLSX loader for the encore report generator.
//!
//! Produces an [`encore_core::Workbook`] of plain cell values. Styling,
//! comments and formula text are intentionally not modeled.

mod error;
mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
