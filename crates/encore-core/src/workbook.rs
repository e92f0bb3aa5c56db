//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::sheet_name::{INVALID_SHEET_NAME_CHARS, MAX_SHEET_NAME_LEN};
use crate::worksheet::Worksheet;

/// A workbook (spreadsheet document)
///
/// A workbook is an ordered collection of named worksheets.
#[derive(Debug, Default)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Iterate over sheet names in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.worksheets.iter().map(|ws| ws.name())
    }

    /// Add a new worksheet with the specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));

        Ok(index)
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        for c in INVALID_SHEET_NAME_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Duplicate check is case-insensitive
        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}
