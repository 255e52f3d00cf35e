//! Render IR and page rendering for `handscript`.
//!
//! [`RenderEngine`] turns text into [`RenderPage`]s: paper rules and page chrome
//! in one command layer, jittered glyphs in another. Backends draw
//! [`RenderPage::merged_commands_iter`] in order.

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

mod render_engine;
mod render_ir;

pub use handscript::{HandwritingStyle, InkColor, PageGeometry};
pub use render_engine::{RenderDocument, RenderEngine, RenderEngineError, RenderEngineOptions};
pub use render_ir::{
    DrawCommand, GlyphCommand, MergedCommandIter, PageChromeCommand, PageChromeConfig,
    PageMetrics, PaperStyle, RenderPage, RuleCommand, RulingConfig,
};
