//! Greedy width-based line wrapping.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::PageGeometry;
use crate::measure::{measure_or_estimate, GlyphMeasurer};
use crate::style::HandwritingStyle;

/// One wrapped line of text.
///
/// Words are joined by single spaces; the original whitespace is not kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Line(String);

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters, which is the number of placements the line yields.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> core::str::SplitWhitespace<'_> {
        self.0.split_whitespace()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Line {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Line {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Greedy word wrapper bounded by a usable width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBreaker {
    max_width: f32,
}

impl LineBreaker {
    pub fn new(max_width: f32) -> Self {
        Self { max_width }
    }

    /// Wrap to the usable width of `geometry`.
    pub fn for_geometry(geometry: &PageGeometry) -> Self {
        Self::new(geometry.usable_width())
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    /// Wrap `text` into lines no wider than the usable width.
    ///
    /// A word is never split: a line holding a single over-wide word is
    /// emitted as-is.
    pub fn wrap<M>(&self, text: &str, style: &HandwritingStyle, measurer: &M) -> Vec<Line>
    where
        M: GlyphMeasurer + ?Sized,
    {
        let mut lines = Vec::with_capacity(0);
        self.wrap_with(text, style, measurer, |line| lines.push(line));
        lines
    }

    /// Wrap `text` and stream each completed line.
    pub fn wrap_with<M, F>(&self, text: &str, style: &HandwritingStyle, measurer: &M, mut on_line: F)
    where
        M: GlyphMeasurer + ?Sized,
        F: FnMut(Line),
    {
        let mut current = String::new();
        let mut candidate = String::new();

        for word in text.split_whitespace() {
            candidate.clear();
            if !current.is_empty() {
                candidate.push_str(&current);
                candidate.push(' ');
            }
            candidate.push_str(word);

            let width = measure_or_estimate(measurer, &candidate, style);
            if width > self.max_width && !current.is_empty() {
                on_line(Line(core::mem::take(&mut current)));
                current.push_str(word);
            } else {
                core::mem::swap(&mut current, &mut candidate);
            }
        }

        if !current.is_empty() {
            on_line(Line(current));
        }
    }
}

impl Default for LineBreaker {
    fn default() -> Self {
        Self::for_geometry(&PageGeometry::A4)
    }
}
