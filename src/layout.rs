//! Layout facade wiring the breaker, paginator, and placer together.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::PageGeometry;
use crate::jitter::{Jitter, RandomSource};
use crate::measure::{AverageGlyphMeasurer, GlyphMeasurer};
use crate::paginate::{Page, Paginator};
use crate::place::{CharacterPlacement, GlyphPlacer};
use crate::style::HandwritingStyle;
use crate::wrap::{Line, LineBreaker};

/// Layout configuration for page construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    /// Page size and margins.
    pub geometry: PageGeometry,
    /// Per-glyph jitter amplitude.
    pub jitter: Jitter,
}

impl LayoutConfig {
    /// Convenience for a page size with A4 margins and default jitter.
    pub fn for_page(width: f32, height: f32) -> Self {
        Self {
            geometry: PageGeometry::for_page(width, height),
            ..Self::default()
        }
    }
}

/// Pages produced for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page by 1-based number.
    pub fn page(&self, page_number: usize) -> Option<&Page> {
        page_number
            .checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Page::line_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Placements for one line of a page.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedLine {
    /// 0-based index of the line within its page.
    pub line_index: usize,
    /// Baseline y shared by every glyph of the line.
    pub baseline_y: f32,
    pub glyphs: Vec<CharacterPlacement>,
}

/// Deterministic wrap/paginate engine plus jittered glyph placement.
#[derive(Clone)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
    measurer: Arc<dyn GlyphMeasurer>,
}

impl core::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    /// Create an engine measuring with the average glyph width.
    pub fn new(cfg: LayoutConfig) -> Self {
        Self {
            cfg,
            measurer: Arc::new(AverageGlyphMeasurer),
        }
    }

    /// Install a shared glyph measurer.
    pub fn with_measurer(mut self, measurer: Arc<dyn GlyphMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn measurer(&self) -> &dyn GlyphMeasurer {
        self.measurer.as_ref()
    }

    pub fn line_breaker(&self) -> LineBreaker {
        LineBreaker::for_geometry(&self.cfg.geometry)
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::for_geometry(&self.cfg.geometry)
    }

    pub fn placer(&self) -> GlyphPlacer {
        GlyphPlacer::new(self.cfg.jitter)
    }

    pub fn wrap(&self, text: &str, style: &HandwritingStyle) -> Vec<Line> {
        self.line_breaker().wrap(text, style, self.measurer())
    }

    pub fn paginate<I>(&self, lines: I, style: &HandwritingStyle) -> Vec<Page>
    where
        I: IntoIterator<Item = Line>,
    {
        self.paginator().paginate(lines, style)
    }

    /// Wrap and paginate `text`.
    pub fn layout_text(&self, text: &str, style: &HandwritingStyle) -> DocumentLayout {
        let lines = self.wrap(text, style);
        let pages = self.paginate(lines, style);
        log::debug!("laid out {} bytes into {} pages", text.len(), pages.len());
        DocumentLayout { pages }
    }

    /// Cursor start for line `line_index` of a page.
    pub fn line_origin(&self, line_index: usize, style: &HandwritingStyle) -> (f32, f32) {
        let (left, top) = self.cfg.geometry.content_origin();
        (left, top + line_index as f32 * style.line_height())
    }

    pub fn place_line<R>(
        &self,
        line: &Line,
        line_index: usize,
        style: &HandwritingStyle,
        rng: &mut R,
    ) -> PlacedLine
    where
        R: RandomSource + ?Sized,
    {
        let (x, y) = self.line_origin(line_index, style);
        PlacedLine {
            line_index,
            baseline_y: y,
            glyphs: self
                .placer()
                .place(line.as_str(), x, y, style, self.measurer(), rng),
        }
    }

    /// Place every line of `page`; jitter is drawn fresh from `rng`.
    pub fn place_page<R>(
        &self,
        page: &Page,
        style: &HandwritingStyle,
        rng: &mut R,
    ) -> Vec<PlacedLine>
    where
        R: RandomSource + ?Sized,
    {
        let mut placed = Vec::with_capacity(page.lines.len());
        for (idx, line) in page.lines.iter().enumerate() {
            placed.push(self.place_line(line, idx, style, &mut *rng));
        }
        placed
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
