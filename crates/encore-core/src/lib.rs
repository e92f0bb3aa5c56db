//! # encore-core
//!
//! Core data structures for the encore report generator.
//!
//! This crate provides the in-memory workbook model the rest of the
//! workspace consumes:
//! - [`CellValue`] - cell values (numbers, strings, booleans)
//! - [`CellAddress`] and [`CellRange`] - cell addressing
//! - [`Workbook`], [`Worksheet`] - the document structures
//! - [`safe_sheet_name`] - the bounded sheet-name derivation shared by
//!   writers and re-readers of `<base>_<suffix>` sheets
//!
//! ## Example
//!
//! ```rust
//! use encore_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_worksheet_with_name("Drake_visitas").unwrap();
//!
//! let sheet = workbook.worksheet_mut(idx).unwrap();
//! sheet.set_value_at(0, 0, "Fecha").unwrap();
//! sheet.set_value_at(1, 0, "15 ago. 2024").unwrap();
//!
//! assert_eq!(sheet.get_value_at(0, 0), CellValue::String("Fecha".into()));
//! ```

pub mod cell;
pub mod error;
pub mod sheet_name;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellValue};
pub use error::{Error, Result};
pub use sheet_name::{safe_sheet_name, INVALID_SHEET_NAME_CHARS, MAX_SHEET_NAME_LEN, SAFE_BASE_LEN};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (format limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (format limit)
pub const MAX_COLS: u16 = 16_384;
