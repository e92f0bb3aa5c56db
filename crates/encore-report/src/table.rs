//! Table extraction
//!
//! Each sheet is a header row followed by data rows. Extraction locates the
//! required columns by header text, coerces cell values through the
//! normalizers, and yields the cleaned tables the chart builders consume.

use chrono::NaiveDate;
use encore_core::Worksheet;

use crate::error::{ReportError, ReportResult};
use crate::normalize::{normalize_count, normalize_date, normalize_magnitude};

/// Header of the date column in a visits sheet
pub const COL_DATE: &str = "Fecha";
/// Header of the count column in every sheet
pub const COL_VISITS: &str = "Visitas";
/// Header of the name column in a cities sheet
pub const COL_CITY: &str = "Ciudad";
/// Header of the name column in a songs sheet
pub const COL_SONG: &str = "Canción";

/// One cleaned visits row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitRow {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Visit count for that day
    pub count: f64,
}

/// Daily visit counts, cleaned and sorted by date.
///
/// Rows whose date or count fails normalization are dropped; the table may
/// therefore be empty even when the sheet was not.
#[derive(Debug, Default)]
pub struct VisitsTable {
    /// Surviving rows in chronological order
    pub rows: Vec<VisitRow>,
}

impl VisitsTable {
    /// Extract and clean the visits table from its sheet
    pub fn from_sheet(sheet: &Worksheet) -> ReportResult<Self> {
        let date_col = find_column(sheet, COL_DATE)?;
        let count_col = find_column(sheet, COL_VISITS)?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for row in data_rows(sheet) {
            let date_raw = cell_text(sheet, row, date_col);
            let count_raw = cell_text(sheet, row, count_col);
            if date_raw.is_empty() && count_raw.is_empty() {
                continue;
            }
            match (normalize_date(&date_raw), normalize_count(&count_raw)) {
                (Some(date), Some(count)) => rows.push(VisitRow { date, count }),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            log::debug!(
                "sheet '{}': dropped {} rows with unusable date or count",
                sheet.name(),
                dropped
            );
        }

        rows.sort_by_key(|r| r.date);
        Ok(Self { rows })
    }

    /// Number of surviving rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no row survived cleaning
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Counts rescaled to millions, in row order
    pub fn counts_in_millions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.count / 1_000_000.0).collect()
    }

    /// `day-month` labels, in row order
    pub fn day_month_labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.date.format("%d-%m").to_string())
            .collect()
    }
}

/// A named ranking (cities or songs) with magnitude-normalized counts.
///
/// Input row order is preserved; a failed count coerces to `0.0` and keeps
/// its row.
#[derive(Debug, Default)]
pub struct RankingTable {
    /// `(name, count)` rows in sheet order
    pub rows: Vec<(String, f64)>,
}

impl RankingTable {
    /// Extract the cities ranking (`Ciudad` / `Visitas` columns)
    pub fn cities_from_sheet(sheet: &Worksheet) -> ReportResult<Self> {
        Self::from_sheet(sheet, COL_CITY)
    }

    /// Extract the songs ranking (`Canción` / `Visitas` columns)
    pub fn songs_from_sheet(sheet: &Worksheet) -> ReportResult<Self> {
        Self::from_sheet(sheet, COL_SONG)
    }

    fn from_sheet(sheet: &Worksheet, name_header: &str) -> ReportResult<Self> {
        let name_col = find_column(sheet, name_header)?;
        let value_col = find_column(sheet, COL_VISITS)?;

        let mut rows = Vec::new();
        for row in data_rows(sheet) {
            let name = cell_text(sheet, row, name_col);
            if name.is_empty() {
                continue;
            }
            let value = normalize_magnitude(&cell_text(sheet, row, value_col));
            rows.push((name, value));
        }
        Ok(Self { rows })
    }

    /// Names in row order
    pub fn names(&self) -> Vec<String> {
        self.rows.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Counts in row order
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|(_, value)| *value).collect()
    }

    /// True when the sheet had no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Locate a column by its header text in row 0
fn find_column(sheet: &Worksheet, header: &str) -> ReportResult<u16> {
    let max_col = sheet.used_range().map(|r| r.end.col).unwrap_or(0);
    for col in 0..=max_col {
        if cell_text(sheet, 0, col) == header {
            return Ok(col);
        }
    }
    Err(ReportError::MissingColumn {
        sheet: sheet.name().to_string(),
        column: header.to_string(),
    })
}

/// Data row indices below the header, bounded by the used range
fn data_rows(sheet: &Worksheet) -> std::ops::RangeInclusive<u32> {
    let max_row = sheet.used_range().map(|r| r.end.row).unwrap_or(0);
    1..=max_row
}

fn cell_text(sheet: &Worksheet, row: u32, col: u16) -> String {
    sheet.get_value_at(row, col).to_display_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn visits_sheet(rows: &[(&str, &str)]) -> Worksheet {
        let mut sheet = Worksheet::new("Drake_visitas");
        sheet.set_value_at(0, 0, COL_DATE).unwrap();
        sheet.set_value_at(0, 1, COL_VISITS).unwrap();
        for (i, (date, count)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.set_value_at(row, 0, *date).unwrap();
            sheet.set_value_at(row, 1, *count).unwrap();
        }
        sheet
    }

    #[test]
    fn test_visits_cleaning_and_sorting() {
        let sheet = visits_sheet(&[
            ("16 ago. 2024", "2,000,000"),
            ("15 ago. 2024", "1,234,567"),
            ("not a date", "500"),
            ("17 ago. 2024", "n/a"),
        ]);

        let table = VisitsTable::from_sheet(&sheet).unwrap();
        assert_eq!(table.len(), 2);
        // Unusable rows dropped, survivors re-sorted chronologically
        assert_eq!(
            table.rows[0],
            VisitRow {
                date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
                count: 1_234_567.0,
            }
        );
        assert_eq!(
            table.rows[1].date,
            NaiveDate::from_ymd_opt(2024, 8, 16).unwrap()
        );
        assert_eq!(table.day_month_labels(), vec!["15-08", "16-08"]);
    }

    #[test]
    fn test_visits_numeric_count_cell() {
        let mut sheet = Worksheet::new("Drake_visitas");
        sheet.set_value_at(0, 0, COL_DATE).unwrap();
        sheet.set_value_at(0, 1, COL_VISITS).unwrap();
        sheet.set_value_at(1, 0, "15 ago. 2024").unwrap();
        sheet.set_value_at(1, 1, 1_234_567.0).unwrap();

        let table = VisitsTable::from_sheet(&sheet).unwrap();
        assert_eq!(table.rows[0].count, 1_234_567.0);
    }

    #[test]
    fn test_visits_all_rows_invalid() {
        let sheet = visits_sheet(&[("??", "??"), ("", "123")]);
        let table = VisitsTable::from_sheet(&sheet).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_visits_missing_column() {
        let mut sheet = Worksheet::new("Drake_visitas");
        sheet.set_value_at(0, 0, "Fecha").unwrap();
        sheet.set_value_at(0, 1, "Oyentes").unwrap();

        match VisitsTable::from_sheet(&sheet) {
            Err(ReportError::MissingColumn { sheet, column }) => {
                assert_eq!(sheet, "Drake_visitas");
                assert_eq!(column, COL_VISITS);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_ranking_preserves_order_and_zero_fallback() {
        let mut sheet = Worksheet::new("Drake_ciudades");
        sheet.set_value_at(0, 0, COL_CITY).unwrap();
        sheet.set_value_at(0, 1, COL_VISITS).unwrap();
        for (i, (city, count)) in [
            ("Bogotá", "2.5M"),
            ("Santiago", "800K"),
            ("Lima", "garbage"),
        ]
        .iter()
        .enumerate()
        {
            let row = i as u32 + 1;
            sheet.set_value_at(row, 0, *city).unwrap();
            sheet.set_value_at(row, 1, *count).unwrap();
        }

        let table = RankingTable::cities_from_sheet(&sheet).unwrap();
        assert_eq!(table.names(), vec!["Bogotá", "Santiago", "Lima"]);
        assert_eq!(table.values(), vec![2_500_000.0, 800_000.0, 0.0]);
    }

    #[test]
    fn test_ranking_songs_header() {
        let mut sheet = Worksheet::new("Drake_canciones");
        sheet.set_value_at(0, 0, COL_SONG).unwrap();
        sheet.set_value_at(0, 1, COL_VISITS).unwrap();
        sheet.set_value_at(1, 0, "God's Plan").unwrap();
        sheet.set_value_at(1, 1, "1.9M").unwrap();

        let table = RankingTable::songs_from_sheet(&sheet).unwrap();
        assert_eq!(table.rows, vec![("God's Plan".to_string(), 1_900_000.0)]);
    }
}
