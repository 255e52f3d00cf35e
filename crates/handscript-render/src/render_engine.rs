use core::fmt;
use std::sync::Arc;

use handscript::{
    DocumentLayout, GlyphMeasurer, HandwritingStyle, LayoutConfig, LayoutEngine, Page,
    PlacedLine, RandomSource,
};

use crate::render_ir::{
    DrawCommand, GlyphCommand, PageChromeCommand, PageChromeConfig, PaperStyle, RenderPage,
    RuleCommand, RulingConfig,
};

/// Render-engine options.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderEngineOptions {
    /// Layout options used to produce pages.
    pub layout: LayoutConfig,
    /// Paper drawn under every page.
    pub paper: PaperStyle,
    /// Rule appearance for ruled papers.
    pub ruling: RulingConfig,
    /// Page chrome policy.
    pub chrome: PageChromeConfig,
}

impl RenderEngineOptions {
    /// Build options for a page size with default margins.
    pub fn for_page(width: f32, height: f32) -> Self {
        Self {
            layout: LayoutConfig::for_page(width, height),
            ..Self::default()
        }
    }

    pub fn with_paper(mut self, paper: PaperStyle) -> Self {
        self.paper = paper;
        self
    }
}

/// Text wrapped and paginated for one style, ready to render.
///
/// Holds no jitter; every render call draws fresh offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderDocument {
    style: HandwritingStyle,
    layout: DocumentLayout,
}

impl RenderDocument {
    pub fn style(&self) -> &HandwritingStyle {
        &self.style
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Page by 1-based number.
    pub fn page(&self, page_number: usize) -> Option<&Page> {
        self.layout.page(page_number)
    }
}

/// Errors from page rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEngineError {
    /// Requested page does not exist.
    PageOutOfRange {
        requested: usize,
        page_count: usize,
    },
}

impl fmt::Display for RenderEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageOutOfRange {
                requested,
                page_count,
            } => write!(
                f,
                "page {} out of range (document has {} pages)",
                requested, page_count
            ),
        }
    }
}

impl std::error::Error for RenderEngineError {}

/// Render engine for text -> page command conversion.
#[derive(Clone)]
pub struct RenderEngine {
    opts: RenderEngineOptions,
    layout: LayoutEngine,
}

impl fmt::Debug for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEngine")
            .field("opts", &self.opts)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl RenderEngine {
    /// Create a render engine.
    pub fn new(opts: RenderEngineOptions) -> Self {
        Self {
            layout: LayoutEngine::new(opts.layout),
            opts,
        }
    }

    /// Install a shared glyph measurer for wrapping and cursor advance.
    pub fn with_measurer(mut self, measurer: Arc<dyn GlyphMeasurer>) -> Self {
        self.layout = self.layout.with_measurer(measurer);
        self
    }

    pub fn options(&self) -> &RenderEngineOptions {
        &self.opts
    }

    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Wrap and paginate `text`.
    pub fn prepare(&self, text: &str, style: &HandwritingStyle) -> RenderDocument {
        RenderDocument {
            style: style.clone(),
            layout: self.layout.layout_text(text, style),
        }
    }

    /// Render one page by 1-based number.
    pub fn render_page<R>(
        &self,
        doc: &RenderDocument,
        page_number: usize,
        rng: &mut R,
    ) -> Result<RenderPage, RenderEngineError>
    where
        R: RandomSource + ?Sized,
    {
        let page = doc
            .page(page_number)
            .ok_or(RenderEngineError::PageOutOfRange {
                requested: page_number,
                page_count: doc.page_count(),
            })?;
        Ok(self.render_layout_page(doc, page, rng))
    }

    /// Render every page in order.
    pub fn render_all<R>(&self, doc: &RenderDocument, rng: &mut R) -> Vec<RenderPage>
    where
        R: RandomSource + ?Sized,
    {
        let mut pages = Vec::with_capacity(doc.page_count());
        self.render_with(doc, rng, |page| pages.push(page));
        pages
    }

    /// Render every page, streaming each to `on_page`.
    pub fn render_with<R, F>(&self, doc: &RenderDocument, rng: &mut R, mut on_page: F)
    where
        R: RandomSource + ?Sized,
        F: FnMut(RenderPage),
    {
        for page in &doc.layout.pages {
            on_page(self.render_layout_page(doc, page, &mut *rng));
        }
    }

    fn render_layout_page<R>(&self, doc: &RenderDocument, page: &Page, rng: &mut R) -> RenderPage
    where
        R: RandomSource + ?Sized,
    {
        let style = doc.style();
        let mut out = RenderPage::new(page.page_number, self.opts.layout.geometry, style.clone());
        out.metrics.line_count = page.line_count();
        out.metrics.page_count = doc.page_count();

        self.push_paper(&mut out, style);
        self.push_footer(&mut out);

        let placed = self.layout.place_page(page, style, rng);
        out.content_commands
            .reserve(placed.iter().map(|line| line.glyphs.len()).sum());
        for PlacedLine { glyphs, .. } in &placed {
            for glyph in glyphs {
                out.push_content_command(DrawCommand::Glyph(GlyphCommand::from_placement(
                    glyph,
                    style.slant,
                )));
            }
        }
        log::trace!(
            "rendered page {} ({} glyphs, {} chrome commands)",
            out.page_number,
            out.metrics.glyph_count,
            out.chrome_commands.len()
        );
        out
    }

    fn push_paper(&self, out: &mut RenderPage, style: &HandwritingStyle) {
        let geometry = self.opts.layout.geometry;
        let ruling = self.opts.ruling;
        if self.opts.paper.has_line_rules() {
            let line_slots = self.layout.paginator().max_lines_per_page(style);
            let slots = line_slots.min(ruling.max_line_rules(geometry.usable_height()));
            if slots < line_slots {
                log::debug!(
                    "capped line rules at {} (line height {} gives {} slots)",
                    slots,
                    style.line_height(),
                    line_slots
                );
            }
            let gap = style.size * ruling.baseline_gap_em;
            for slot in 0..slots {
                let (_, baseline) = self.layout.line_origin(slot, style);
                out.push_chrome_command(DrawCommand::Rule(RuleCommand {
                    x: 0.0,
                    y: baseline + gap,
                    length: geometry.width,
                    thickness: ruling.thickness,
                    horizontal: true,
                    color: ruling.line_color,
                }));
            }
        }
        if self.opts.paper.has_margin_rule() {
            out.push_chrome_command(DrawCommand::Rule(RuleCommand {
                x: (geometry.margin_left - ruling.margin_inset).max(0.0),
                y: 0.0,
                length: geometry.height,
                thickness: ruling.thickness,
                horizontal: false,
                color: ruling.margin_color,
            }));
        }
    }

    fn push_footer(&self, out: &mut RenderPage) {
        if !self.opts.chrome.footer_enabled {
            return;
        }
        let geometry = self.opts.layout.geometry;
        out.push_chrome_command(DrawCommand::PageChrome(PageChromeCommand {
            center_x: geometry.width / 2.0,
            baseline_y: geometry.height - self.opts.chrome.footer_baseline_from_bottom,
            text: format!("{} / {}", out.page_number, out.metrics.page_count),
        }));
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new(RenderEngineOptions::default())
    }
}
