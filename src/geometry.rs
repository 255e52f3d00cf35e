//! Fixed page geometry for the target medium.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical page size and margins, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageGeometry {
    /// Physical page width.
    pub width: f32,
    /// Physical page height.
    pub height: f32,
    /// Left margin.
    pub margin_left: f32,
    /// Right margin.
    pub margin_right: f32,
    /// Top margin.
    pub margin_top: f32,
    /// Bottom margin.
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// A4 in points with notebook-style margins.
    pub const A4: Self = Self {
        width: 595.0,
        height: 842.0,
        margin_left: 50.0,
        margin_right: 50.0,
        margin_top: 80.0,
        margin_bottom: 80.0,
    };

    /// Page of the given size with A4 margins.
    pub fn for_page(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::A4
        }
    }

    /// Horizontal space available to a line.
    pub fn usable_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Vertical space available to a page of lines.
    pub fn usable_height(&self) -> f32 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    /// Top-left corner of the content box; line 0 is drawn here.
    pub fn content_origin(&self) -> (f32, f32) {
        (self.margin_left, self.margin_top)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}
