//! Report document assembly
//!
//! One [`ReportDocument`] holds one artist's pages. The document is
//! buffered in memory and written by [`ReportDocument::finish`] alone: a
//! failure anywhere earlier in the artist's sequence leaves no partial
//! file on disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use encore_chart::{Chart, ChartRenderer, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

use crate::error::ReportResult;

/// A multi-page PDF report for one artist
pub struct ReportDocument {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    path: PathBuf,
    pages: usize,
}

impl ReportDocument {
    /// Open an empty document destined for `path`
    pub fn create<P: Into<PathBuf>>(title: &str, path: P) -> ReportResult<Self> {
        let doc = PdfDocument::empty(title);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        Ok(Self {
            doc,
            regular,
            bold,
            path: path.into(),
            pages: 0,
        })
    }

    /// Render one chart onto a fresh page.
    ///
    /// Each chart gets its own page and layer handle; nothing is shared
    /// between charts.
    pub fn append(&mut self, chart: &Chart) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "chart");
        let layer = self.doc.get_page(page).get_layer(layer);
        ChartRenderer::new(layer, &self.regular, &self.bold).render(chart);
        self.pages += 1;
    }

    /// Pages appended so far
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Write the document to disk and close it.
    ///
    /// Returns the number of pages written. A document that never received
    /// a page is not written at all (a pageless PDF helps nobody).
    pub fn finish(self) -> ReportResult<usize> {
        if self.pages == 0 {
            log::warn!("no pages were rendered; not writing {}", self.path.display());
            return Ok(0);
        }
        let file = File::create(&self.path)?;
        self.doc.save(&mut BufWriter::new(file))?;
        Ok(self.pages)
    }
}
