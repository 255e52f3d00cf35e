//! Handwriting-style text layout.
//!
//! Text flows through three stages:
//!
//! 1. [`wrap`] greedily breaks text into [`Line`]s that fit the usable page width,
//!    measuring candidates with a caller-supplied [`GlyphMeasurer`].
//! 2. [`paginate`] groups lines into numbered [`Page`]s by line height.
//! 3. [`place`] turns one line into [`CharacterPlacement`]s: a cursor position per
//!    character plus small random offsets and rotation for a hand-drawn look.
//!
//! Wrapping and pagination are deterministic. Placement jitter comes from an
//! injected [`RandomSource`], so seeded sources reproduce output exactly.
//!
//! Measurement never fails a layout: errors and non-finite widths fall back to
//! an average glyph width of `0.6 * size` per character.

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod geometry;
pub mod jitter;
pub mod layout;
pub mod measure;
pub mod paginate;
pub mod place;
pub mod stats;
pub mod style;
pub mod wrap;

pub use geometry::PageGeometry;
pub use jitter::{Jitter, RandomSource, RngSource};
pub use layout::{DocumentLayout, LayoutConfig, LayoutEngine, PlacedLine};
pub use measure::{
    estimate_width, measure_or_estimate, AverageGlyphMeasurer, GlyphMeasurer, MeasureError,
    ProportionalMeasurer,
};
pub use paginate::{Page, Paginator};
pub use place::{CharacterPlacement, GlyphPlacer};
pub use stats::{DocumentStats, WORDS_PER_ESTIMATED_PAGE};
pub use style::{HandwritingStyle, InkColor, StyleError, FALLBACK_GLYPH_EM};
pub use wrap::{Line, LineBreaker};

/// Wrap `text` to the usable width of an A4 page.
pub fn wrap<M>(text: &str, style: &HandwritingStyle, measurer: &M) -> Vec<Line>
where
    M: GlyphMeasurer + ?Sized,
{
    LineBreaker::for_geometry(&PageGeometry::A4).wrap(text, style, measurer)
}

/// Paginate `lines` to the usable height of an A4 page.
pub fn paginate<I>(lines: I, style: &HandwritingStyle) -> Vec<Page>
where
    I: IntoIterator<Item = Line>,
{
    Paginator::for_geometry(&PageGeometry::A4).paginate(lines, style)
}

/// Place the characters of `line` starting at `(start_x, start_y)` with default jitter.
pub fn place<M, R>(
    line: &Line,
    start_x: f32,
    start_y: f32,
    style: &HandwritingStyle,
    measurer: &M,
    rng: &mut R,
) -> Vec<CharacterPlacement>
where
    M: GlyphMeasurer + ?Sized,
    R: RandomSource + ?Sized,
{
    GlyphPlacer::default().place(line.as_str(), start_x, start_y, style, measurer, rng)
}
