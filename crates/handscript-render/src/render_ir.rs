use core::fmt;

use handscript::{CharacterPlacement, HandwritingStyle, InkColor, PageGeometry};
use serde::{Deserialize, Serialize};

/// Notebook paper drawn underneath the handwriting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperStyle {
    /// Horizontal rules under every line slot.
    #[default]
    Ruled,
    /// Plain sheet.
    Blank,
    /// Ruled sheet with a vertical margin line.
    MarginNotebook,
}

impl PaperStyle {
    pub const ALL: [Self; 3] = [Self::Ruled, Self::Blank, Self::MarginNotebook];

    /// Stable identifier used in configs.
    pub fn id(self) -> &'static str {
        match self {
            Self::Ruled => "ruled",
            Self::Blank => "blank",
            Self::MarginNotebook => "margin",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ruled => "Ruled",
            Self::Blank => "Blank",
            Self::MarginNotebook => "Margin Notebook",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|paper| paper.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn has_line_rules(self) -> bool {
        matches!(self, Self::Ruled | Self::MarginNotebook)
    }

    pub fn has_margin_rule(self) -> bool {
        matches!(self, Self::MarginNotebook)
    }
}

impl fmt::Display for PaperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Paper rule appearance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulingConfig {
    /// Color of the horizontal line rules.
    pub line_color: InkColor,
    /// Color of the vertical margin rule.
    pub margin_color: InkColor,
    /// Rule thickness.
    pub thickness: f32,
    /// Gap between the left text margin and the margin rule.
    pub margin_inset: f32,
    /// Distance below each baseline, in ems of the style size.
    pub baseline_gap_em: f32,
    /// Smallest vertical distance between line rules; bounds the rule count.
    pub min_gap: f32,
}

impl RulingConfig {
    /// Hard cap on horizontal rules per page.
    pub const MAX_LINE_RULES: usize = 4096;
    const MIN_GAP_FLOOR: f32 = 1.0;

    /// Most line rules that fit in `usable_height` at the minimum gap.
    pub fn max_line_rules(&self, usable_height: f32) -> usize {
        let gap = if self.min_gap.is_finite() {
            self.min_gap.max(Self::MIN_GAP_FLOOR)
        } else {
            Self::MIN_GAP_FLOOR
        };
        let fit = usable_height / gap;
        if fit.is_nan() || fit < 1.0 {
            return 1;
        }
        fit.min(Self::MAX_LINE_RULES as f32) as usize
    }
}

impl Default for RulingConfig {
    fn default() -> Self {
        Self {
            line_color: InkColor::rgb(0xdd, 0xdd, 0xdd),
            margin_color: InkColor::rgb(0xe5, 0x8f, 0x8f),
            thickness: 1.0,
            margin_inset: 10.0,
            baseline_gap_em: 0.2,
            min_gap: 1.0,
        }
    }
}

/// Page chrome emission policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageChromeConfig {
    /// Emit a page number footer.
    pub footer_enabled: bool,
    /// Footer baseline offset from the bottom edge.
    pub footer_baseline_from_bottom: f32,
}

impl Default for PageChromeConfig {
    fn default() -> Self {
        Self {
            footer_enabled: false,
            footer_baseline_from_bottom: 40.0,
        }
    }
}

/// One jittered character.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphCommand {
    pub ch: char,
    /// Cursor x (before jitter).
    pub x: f32,
    /// Line baseline y (before jitter).
    pub baseline_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Rotation in degrees.
    pub rotation_deg: f32,
    /// Horizontal skew in degrees, taken from the style slant.
    pub skew_x_deg: f32,
}

impl GlyphCommand {
    pub fn from_placement(placement: &CharacterPlacement, slant: f32) -> Self {
        Self {
            ch: placement.ch,
            x: placement.x,
            baseline_y: placement.y,
            offset_x: placement.offset_x,
            offset_y: placement.offset_y,
            rotation_deg: placement.rotation,
            skew_x_deg: slant,
        }
    }

    /// Jittered draw position.
    pub fn origin(&self) -> (f32, f32) {
        (self.x + self.offset_x, self.baseline_y + self.offset_y)
    }
}

/// Paper rule command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleCommand {
    /// Start x.
    pub x: f32,
    /// Start y.
    pub y: f32,
    pub length: f32,
    pub thickness: f32,
    /// Horizontal if true; vertical if false.
    pub horizontal: bool,
    pub color: InkColor,
}

/// Page chrome text (page number footer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageChromeCommand {
    /// Horizontal center.
    pub center_x: f32,
    pub baseline_y: f32,
    pub text: String,
}

/// Backend-agnostic draw command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw one handwritten character.
    Glyph(GlyphCommand),
    /// Draw a paper rule.
    Rule(RuleCommand),
    /// Draw page chrome text.
    PageChrome(PageChromeCommand),
}

/// Per-page counts for progress consumers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Lines on this page.
    pub line_count: usize,
    /// Glyph commands on this page.
    pub glyph_count: usize,
    /// Total pages in the document.
    pub page_count: usize,
}

/// Page represented as backend-agnostic draw commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderPage {
    /// 1-based page number.
    pub page_number: usize,
    /// Page size and margins.
    pub geometry: PageGeometry,
    /// Style every glyph on the page is drawn with.
    pub style: HandwritingStyle,
    /// Paper and page chrome, drawn first.
    pub chrome_commands: Vec<DrawCommand>,
    /// Handwriting, drawn over the chrome.
    pub content_commands: Vec<DrawCommand>,
    pub metrics: PageMetrics,
}

impl RenderPage {
    const INITIAL_CHROME_COMMAND_CAPACITY: usize = 32;

    /// Create an empty page.
    pub fn new(page_number: usize, geometry: PageGeometry, style: HandwritingStyle) -> Self {
        Self {
            page_number,
            geometry,
            style,
            chrome_commands: Vec::with_capacity(0),
            content_commands: Vec::with_capacity(0),
            metrics: PageMetrics::default(),
        }
    }

    /// Push a content-layer command.
    pub fn push_content_command(&mut self, cmd: DrawCommand) {
        if matches!(cmd, DrawCommand::Glyph(_)) {
            self.metrics.glyph_count += 1;
        }
        self.content_commands.push(cmd);
    }

    /// Push a chrome-layer command.
    pub fn push_chrome_command(&mut self, cmd: DrawCommand) {
        if self.chrome_commands.capacity() == 0 {
            self.chrome_commands
                .reserve(Self::INITIAL_CHROME_COMMAND_CAPACITY);
        }
        self.chrome_commands.push(cmd);
    }

    /// Number of commands across both layers.
    pub fn merged_commands_len(&self) -> usize {
        self.chrome_commands.len() + self.content_commands.len()
    }

    /// Iterate chrome then content commands without allocating.
    pub fn merged_commands_iter(&self) -> MergedCommandIter<'_> {
        self.chrome_commands.iter().chain(self.content_commands.iter())
    }

    /// Glyph commands in drawing order.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphCommand> {
        self.content_commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Glyph(glyph) => Some(glyph),
            _ => None,
        })
    }

    /// Characters drawn on the page, lines separated by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.metrics.glyph_count + self.metrics.line_count);
        let mut last_baseline = None;
        for glyph in self.glyphs() {
            if let Some(prev) = last_baseline {
                if prev != glyph.baseline_y {
                    out.push('\n');
                }
            }
            last_baseline = Some(glyph.baseline_y);
            out.push(glyph.ch);
        }
        out
    }
}

/// Iterator over chrome-then-content page commands.
pub type MergedCommandIter<'a> =
    core::iter::Chain<core::slice::Iter<'a, DrawCommand>, core::slice::Iter<'a, DrawCommand>>;
