//! # encore-report
//!
//! Per-artist streaming report pipeline: a multi-sheet workbook of
//! streaming statistics in, one multi-page PDF of charts per artist out.
//!
//! The pipeline is a single pass: sheet discovery → per-artist extraction
//! and cleaning → chart rendering → document assembly. Failures are
//! contained per artist; see [`pipeline::run`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use encore_report::{run, ReportConfig};
//!
//! let config = ReportConfig::new("top10_artistas_detalle.xlsx", "pdf_artistas");
//! let summary = run(&config).unwrap();
//! println!("{} reports written", summary.written());
//! ```

pub mod builders;
pub mod document;
pub mod error;
pub mod index;
pub mod normalize;
pub mod pipeline;
pub mod table;

// Re-exports for convenience
pub use document::ReportDocument;
pub use error::{ReportError, ReportResult};
pub use index::{ArtistGroup, SheetIndex, SheetKind};
pub use normalize::{normalize_count, normalize_date, normalize_magnitude};
pub use pipeline::{run, ArtistOutcome, ReportConfig, RunSummary};
pub use table::{RankingTable, VisitRow, VisitsTable};
