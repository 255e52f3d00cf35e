//! Per-character placement with presentation jitter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::jitter::{Jitter, RandomSource};
use crate::measure::{measure_or_estimate, GlyphMeasurer};
use crate::style::HandwritingStyle;

/// Where and how to draw one character.
///
/// `x`/`y` are the cursor position; the offsets and rotation are jitter a
/// renderer applies on top of it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CharacterPlacement {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CharacterPlacement {
    /// Jittered draw position.
    pub fn origin(&self) -> (f32, f32) {
        (self.x + self.offset_x, self.y + self.offset_y)
    }

    pub fn is_space(&self) -> bool {
        self.ch == ' '
    }
}

/// Lays out the characters of a single line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphPlacer {
    jitter: Jitter,
}

impl GlyphPlacer {
    pub fn new(jitter: Jitter) -> Self {
        Self { jitter }
    }

    pub fn jitter(&self) -> Jitter {
        self.jitter
    }

    /// How far the cursor moves after `ch`.
    ///
    /// Spaces are stretched by the style's word spacing; other glyphs advance
    /// by their measured width.
    pub fn advance<M>(&self, ch: char, style: &HandwritingStyle, measurer: &M) -> f32
    where
        M: GlyphMeasurer + ?Sized,
    {
        let mut buf = [0u8; 4];
        let width = measure_or_estimate(measurer, ch.encode_utf8(&mut buf), style);
        if ch == ' ' {
            width * style.word_spacing
        } else {
            width
        }
    }

    /// One placement per character of `line`, left to right from `start_x`.
    pub fn place<M, R>(
        &self,
        line: &str,
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
        let mut placements = Vec::with_capacity(line.len());
        let mut cursor_x = start_x;

        for ch in line.chars() {
            let offset_x = self.jitter.sample_offset(rng);
            let offset_y = self.jitter.sample_offset(rng);
            let rotation = self.jitter.sample_rotation(rng);

            placements.push(CharacterPlacement {
                ch,
                x: cursor_x,
                y: start_y,
                rotation,
                offset_x,
                offset_y,
            });

            cursor_x += self.advance(ch, style, measurer);
        }

        placements
    }
}
