//! HTML/SVG export for `handscript-render` pages.

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

use core::fmt;

pub mod fonts;
mod html;

pub use fonts::{
    css_font_family, font_by_name, font_family_stack, FontFace, FontInfo, AVAILABLE_FONTS,
    DEFAULT_MAX_FONT_BYTES, FALLBACK_FONT_STACK,
};
pub use html::{export_html, write_html, HtmlExportOptions};

/// Errors from exporting pages or loading font files.
#[derive(Debug)]
pub enum ExportError {
    /// Filesystem read or write failed.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Font file exceeded the embedding limit.
    FontTooLarge {
        path: String,
        bytes: usize,
        limit: usize,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path, source),
            Self::FontTooLarge { path, bytes, limit } => write!(
                f,
                "font '{}' exceeds max bytes ({} > {})",
                path, bytes, limit
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::FontTooLarge { .. } => None,
        }
    }
}
