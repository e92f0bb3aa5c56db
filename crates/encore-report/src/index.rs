//! Sheet indexer
//!
//! Sheet names encode their content as `<artist>_<kind>`: everything before
//! the last underscore is the artist key (which may itself contain
//! underscores), the suffix is the data kind. Names without an underscore or
//! with an unrecognized suffix carry no report data and are ignored.

use std::fmt;

/// The data kinds a complete artist group carries.
///
/// The suffix tokens are part of the workbook contract and are never
/// translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// Daily visit counts (`visitas`)
    Visits,
    /// Top cities (`ciudades`)
    Cities,
    /// Top songs (`canciones`)
    Songs,
}

impl SheetKind {
    /// All kinds, in report page order
    pub const ALL: [SheetKind; 3] = [SheetKind::Visits, SheetKind::Cities, SheetKind::Songs];

    /// The sheet-name suffix token for this kind
    pub fn token(self) -> &'static str {
        match self {
            SheetKind::Visits => "visitas",
            SheetKind::Cities => "ciudades",
            SheetKind::Songs => "canciones",
        }
    }

    /// Decode a suffix token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.token() == token)
    }

    fn slot(self) -> usize {
        match self {
            SheetKind::Visits => 0,
            SheetKind::Cities => 1,
            SheetKind::Songs => 2,
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The sheets discovered for one artist key
#[derive(Debug, Clone)]
pub struct ArtistGroup {
    /// Artist key (sheet-name prefix)
    pub artist: String,
    sheets: [Option<String>; 3],
}

impl ArtistGroup {
    fn new(artist: &str) -> Self {
        Self {
            artist: artist.to_string(),
            sheets: Default::default(),
        }
    }

    /// The originating sheet name recorded for a kind
    pub fn sheet(&self, kind: SheetKind) -> Option<&str> {
        self.sheets[kind.slot()].as_deref()
    }

    /// A group is eligible for rendering only when all kinds are present
    pub fn is_complete(&self) -> bool {
        self.sheets.iter().all(Option::is_some)
    }

    /// Kinds the group lacks, in page order
    pub fn missing_kinds(&self) -> Vec<SheetKind> {
        SheetKind::ALL
            .into_iter()
            .filter(|k| self.sheets[k.slot()].is_none())
            .collect()
    }
}

/// Artist groups discovered from a workbook's sheet names
#[derive(Debug, Default)]
pub struct SheetIndex {
    groups: Vec<ArtistGroup>,
}

impl SheetIndex {
    /// Group sheet names by artist, preserving first-seen order
    pub fn build<'a, I>(sheet_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for name in sheet_names {
            let Some((artist, suffix)) = name.rsplit_once('_') else {
                continue;
            };
            let Some(kind) = SheetKind::from_token(suffix) else {
                log::debug!("sheet '{}' has no recognized kind suffix", name);
                continue;
            };

            let pos = match index.groups.iter().position(|g| g.artist == artist) {
                Some(pos) => pos,
                None => {
                    index.groups.push(ArtistGroup::new(artist));
                    index.groups.len() - 1
                }
            };
            index.groups[pos].sheets[kind.slot()] = Some(name.to_string());
        }
        index
    }

    /// Discovered groups in first-seen order
    pub fn groups(&self) -> &[ArtistGroup] {
        &self.groups
    }

    /// Number of discovered groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no sheet name matched the convention
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_all_three_kinds() {
        let index = SheetIndex::build(
            ["Drake_visitas", "Drake_ciudades", "Drake_canciones"].into_iter(),
        );
        assert_eq!(index.len(), 1);

        let group = &index.groups()[0];
        assert_eq!(group.artist, "Drake");
        assert!(group.is_complete());
        assert_eq!(group.sheet(SheetKind::Visits), Some("Drake_visitas"));
        assert_eq!(group.sheet(SheetKind::Cities), Some("Drake_ciudades"));
        assert_eq!(group.sheet(SheetKind::Songs), Some("Drake_canciones"));
    }

    #[test]
    fn test_name_without_underscore_ignored() {
        let index = SheetIndex::build(["Summary", "Drake_visitas"].into_iter());
        assert_eq!(index.len(), 1);
        assert_eq!(index.groups()[0].artist, "Drake");
    }

    #[test]
    fn test_unknown_suffix_ignored() {
        let index = SheetIndex::build(["Drake_notas", "Drake_visitas"].into_iter());
        assert_eq!(index.len(), 1);
        let group = &index.groups()[0];
        assert!(!group.is_complete());
        assert_eq!(
            group.missing_kinds(),
            vec![SheetKind::Cities, SheetKind::Songs]
        );
    }

    #[test]
    fn test_artist_key_may_contain_underscores() {
        let index = SheetIndex::build(["A_Tribe_Called_Quest_visitas"].into_iter());
        assert_eq!(index.groups()[0].artist, "A_Tribe_Called_Quest");
    }

    #[test]
    fn test_incomplete_group_reports_missing() {
        let index = SheetIndex::build(["Unknown_visitas"].into_iter());
        let group = &index.groups()[0];
        assert!(!group.is_complete());
        assert_eq!(
            group.missing_kinds(),
            vec![SheetKind::Cities, SheetKind::Songs]
        );
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let index = SheetIndex::build(
            [
                "Bad Bunny_visitas",
                "Drake_visitas",
                "Bad Bunny_ciudades",
                "Drake_ciudades",
            ]
            .into_iter(),
        );
        let artists: Vec<&str> = index.groups().iter().map(|g| g.artist.as_str()).collect();
        assert_eq!(artists, vec!["Bad Bunny", "Drake"]);
    }
}
