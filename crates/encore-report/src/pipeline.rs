//! Pipeline driver
//!
//! Iterates the discovered artist groups and generates one report per
//! eligible group. Failures are contained at the artist boundary: one
//! artist's broken sheet never aborts the batch. Only faults before the
//! loop (unreadable workbook, uncreatable output directory) end the run.

use std::fs;
use std::path::{Path, PathBuf};

use encore_core::{safe_sheet_name, Workbook, Worksheet};
use encore_xlsx::XlsxReader;

use crate::builders;
use crate::document::ReportDocument;
use crate::error::{ReportError, ReportResult};
use crate::index::{ArtistGroup, SheetIndex, SheetKind};
use crate::table::{RankingTable, VisitsTable};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Workbook to read
    pub input: PathBuf,
    /// Directory receiving one PDF per artist
    pub output_dir: PathBuf,
}

impl ReportConfig {
    /// The workbook filename the batch reads
    pub const DEFAULT_INPUT: &'static str = "top10_artistas_detalle.xlsx";

    /// Output directory used when none is given
    pub const DEFAULT_OUTPUT_DIR: &'static str = "pdf_artistas";

    /// Create a configuration
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output_dir: O) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INPUT, Self::DEFAULT_OUTPUT_DIR)
    }
}

/// What happened to one artist group
#[derive(Debug)]
pub enum ArtistOutcome {
    /// Report written
    Written {
        /// Artist key
        artist: String,
        /// Path of the PDF
        path: PathBuf,
        /// Pages in the document (2 when the visits chart was omitted)
        pages: usize,
    },
    /// Group was missing one or more kinds and was not processed
    Skipped {
        /// Artist key
        artist: String,
        /// The kinds the group lacks
        missing: Vec<SheetKind>,
    },
    /// Generation failed; the batch continued with the next artist
    Failed {
        /// Artist key
        artist: String,
        /// Message of the error that was contained
        message: String,
    },
}

/// Per-artist outcomes of one run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Outcomes in processing order
    pub outcomes: Vec<ArtistOutcome>,
}

impl RunSummary {
    /// Number of reports written
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ArtistOutcome::Written { .. }))
            .count()
    }

    /// Number of groups skipped for missing kinds
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ArtistOutcome::Skipped { .. }))
            .count()
    }

    /// Number of groups that failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ArtistOutcome::Failed { .. }))
            .count()
    }
}

/// Run the whole batch: read the workbook, then render every eligible
/// artist group into its own PDF.
pub fn run(config: &ReportConfig) -> ReportResult<RunSummary> {
    let workbook = XlsxReader::read_file(&config.input)?;
    fs::create_dir_all(&config.output_dir)?;

    let index = SheetIndex::build(workbook.sheet_names());
    log::info!(
        "{}: {} sheets, {} artist groups",
        config.input.display(),
        workbook.sheet_count(),
        index.len()
    );

    let mut summary = RunSummary::default();
    for group in index.groups() {
        let missing = group.missing_kinds();
        if !missing.is_empty() {
            log::warn!(
                "skipping {}: missing {} sheet(s)",
                group.artist,
                missing
                    .iter()
                    .map(|k| k.token())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            summary.outcomes.push(ArtistOutcome::Skipped {
                artist: group.artist.clone(),
                missing,
            });
            continue;
        }

        match generate_report(&workbook, group, &config.output_dir) {
            Ok((path, pages)) => {
                log::info!("wrote {} ({} pages)", path.display(), pages);
                summary.outcomes.push(ArtistOutcome::Written {
                    artist: group.artist.clone(),
                    path,
                    pages,
                });
            }
            Err(err) => {
                log::warn!("report for {} failed: {}", group.artist, err);
                summary.outcomes.push(ArtistOutcome::Failed {
                    artist: group.artist.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

/// Generate one artist's document: three builders in fixed page order,
/// then a single finalize.
fn generate_report(
    workbook: &Workbook,
    group: &ArtistGroup,
    output_dir: &Path,
) -> ReportResult<(PathBuf, usize)> {
    let visits = VisitsTable::from_sheet(sheet_for(workbook, &group.artist, SheetKind::Visits)?)?;
    let cities =
        RankingTable::cities_from_sheet(sheet_for(workbook, &group.artist, SheetKind::Cities)?)?;
    let songs =
        RankingTable::songs_from_sheet(sheet_for(workbook, &group.artist, SheetKind::Songs)?)?;

    let file_name = format!("{}.pdf", group.artist.replace('/', "_"));
    let path = output_dir.join(file_name);

    let mut document = ReportDocument::create(&group.artist, &path)?;
    match builders::visits_chart(&group.artist, &visits) {
        Some(chart) => document.append(&chart),
        None => log::warn!(
            "no valid visit rows for {}; daily visits chart omitted",
            group.artist
        ),
    }
    document.append(&builders::cities_chart(&group.artist, &cities));
    document.append(&builders::songs_chart(&group.artist, &songs));

    let pages = document.finish()?;
    Ok((path, pages))
}

/// Resolve a group's sheet through the bounded-name derivation.
///
/// The writer of the workbook derives sheet names the same way, so lookup
/// must go through [`safe_sheet_name`] rather than the raw artist key.
fn sheet_for<'a>(
    workbook: &'a Workbook,
    artist: &str,
    kind: SheetKind,
) -> ReportResult<&'a Worksheet> {
    let name = safe_sheet_name(artist, kind.token());
    workbook
        .worksheet_by_name(&name)
        .ok_or(ReportError::MissingSheet(name))
}
