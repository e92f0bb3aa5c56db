//! Field normalizers
//!
//! The workbook's numeric fields arrive as text in several regional shapes.
//! These functions coerce them without ever raising: dates and counts
//! degrade to `None` (the row is later filtered out), magnitudes degrade to
//! `0.0`. The zero fallback is deliberate and load-bearing: a garbled city
//! or song count still produces a bar, it is just an empty one. Do not
//! unify the two behaviors.

use chrono::NaiveDate;

/// Spanish month abbreviations mapped to their English forms, as they
/// appear in the `Fecha` column (`"15 ago. 2024"`).
const MONTH_ABBREVIATIONS: [(&str, &str); 12] = [
    ("ene", "Jan"),
    ("feb", "Feb"),
    ("mar", "Mar"),
    ("abr", "Apr"),
    ("may", "May"),
    ("jun", "Jun"),
    ("jul", "Jul"),
    ("ago", "Aug"),
    ("sep", "Sep"),
    ("oct", "Oct"),
    ("nov", "Nov"),
    ("dic", "Dec"),
];

/// Parse a free-form `"day month-abbreviation year"` date.
///
/// Trailing punctuation after the month abbreviation and mixed case are
/// tolerated. Returns `None` for empty or unparsable input.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim().to_lowercase().replace('.', "");
    if cleaned.is_empty() {
        return None;
    }

    let translated = match MONTH_ABBREVIATIONS
        .iter()
        .find(|(spanish, _)| cleaned.contains(spanish))
    {
        Some((spanish, english)) => cleaned.replace(spanish, english),
        None => cleaned,
    };

    NaiveDate::parse_from_str(&translated, "%d %b %Y").ok()
}

/// Parse a count that may use commas as thousands separators.
///
/// Commas are never decimal points in this data, so they are simply
/// removed. Returns `None` for empty or unparsable input.
pub fn normalize_count(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse a magnitude with an optional `K` (thousand) or `M` (million)
/// suffix, case-insensitive.
///
/// Any failure, including empty input, yields `0.0` rather than a missing
/// marker; see the module docs.
pub fn normalize_magnitude(raw: &str) -> f64 {
    let cleaned = raw.trim().to_uppercase();

    let parsed = if let Some(prefix) = cleaned.strip_suffix('K') {
        prefix.trim().parse::<f64>().ok().map(|v| v * 1_000.0)
    } else if let Some(prefix) = cleaned.strip_suffix('M') {
        prefix.trim().parse::<f64>().ok().map(|v| v * 1_000_000.0)
    } else {
        cleaned.parse().ok()
    };

    parsed.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_date_spanish_abbreviation() {
        assert_eq!(
            normalize_date("15 ago. 2024"),
            NaiveDate::from_ymd_opt(2024, 8, 15)
        );
        assert_eq!(
            normalize_date("1 ene. 2025"),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(
            normalize_date("31 dic. 2024"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_date_mixed_case_and_no_period() {
        assert_eq!(
            normalize_date("15 AGO 2024"),
            NaiveDate::from_ymd_opt(2024, 8, 15)
        );
        assert_eq!(
            normalize_date("  3 Abr. 2023 "),
            NaiveDate::from_ymd_opt(2023, 4, 3)
        );
    }

    #[test]
    fn test_date_already_english() {
        assert_eq!(
            normalize_date("15 aug 2024"),
            NaiveDate::from_ymd_opt(2024, 8, 15)
        );
    }

    #[test]
    fn test_date_unparsable() {
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("2024-08-15"), None);
    }

    #[test]
    fn test_count_thousands_separators() {
        assert_eq!(normalize_count("1,234,567"), Some(1_234_567.0));
        assert_eq!(normalize_count("1234567"), Some(1_234_567.0));
        assert_eq!(normalize_count(" 42 "), Some(42.0));
    }

    #[test]
    fn test_count_missing_or_bad() {
        assert_eq!(normalize_count(""), None);
        assert_eq!(normalize_count("   "), None);
        assert_eq!(normalize_count("n/a"), None);
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert_eq!(normalize_magnitude("2.5M"), 2_500_000.0);
        assert_eq!(normalize_magnitude("800K"), 800_000.0);
        assert_eq!(normalize_magnitude("1.2m"), 1_200_000.0);
        assert_eq!(normalize_magnitude("3k"), 3_000.0);
        assert_eq!(normalize_magnitude(" 950 "), 950.0);
    }

    #[test]
    fn test_magnitude_falls_back_to_zero() {
        // Zero, not a missing marker: the asymmetry is intentional
        assert_eq!(normalize_magnitude("garbage"), 0.0);
        assert_eq!(normalize_magnitude(""), 0.0);
        assert_eq!(normalize_magnitude("K"), 0.0);
        assert_eq!(normalize_magnitude("1.2.3M"), 0.0);
    }
}
