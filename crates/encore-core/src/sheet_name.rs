//! Sheet naming rules
//!
//! Spreadsheet formats restrict sheet names: a bounded length and a set of
//! forbidden characters. Tools that write one sheet per `<base>_<suffix>`
//! pair therefore derive a bounded name; re-readers must apply the same
//! derivation or they will miss the sheet.

/// Maximum length of a sheet name (format limit)
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters a sheet name may not contain
pub const INVALID_SHEET_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Number of leading characters of the base kept in a derived name
pub const SAFE_BASE_LEN: usize = 15;

/// Derive the bounded sheet name for a `<base>_<suffix>` pair.
///
/// Forbidden characters are stripped from the base, surrounding whitespace
/// removed, and the base truncated to its first [`SAFE_BASE_LEN`] characters
/// before the suffix is appended. The derivation is idempotent: feeding an
/// already-derived base back in yields the same name.
pub fn safe_sheet_name(base: &str, suffix: &str) -> String {
    let stripped: String = base
        .chars()
        .filter(|c| !INVALID_SHEET_NAME_CHARS.contains(c))
        .collect();
    let bounded: String = stripped.trim().chars().take(SAFE_BASE_LEN).collect();
    format!("{}_{}", bounded, suffix)
}
