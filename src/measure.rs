//! Glyph width measurement hook and fail-open fallback.

use core::fmt;

use crate::style::{HandwritingStyle, FALLBACK_GLYPH_EM};

/// Failure reported by a glyph measurer backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeasureError {
    /// The backend has no face for the requested font.
    MissingFont(String),
    /// Backend-specific failure.
    Backend(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFont(font) => write!(f, "font '{}' is not available", font),
            Self::Backend(msg) => write!(f, "measurement failed: {}", msg),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Rendered text width for a style, in layout units.
///
/// Implementations may fail or return non-finite widths; callers go through
/// [`measure_or_estimate`] which never propagates either.
pub trait GlyphMeasurer: Send + Sync {
    fn measure_text(&self, text: &str, style: &HandwritingStyle) -> Result<f32, MeasureError>;
}

impl<F> GlyphMeasurer for F
where
    F: Fn(&str, &HandwritingStyle) -> Result<f32, MeasureError> + Send + Sync,
{
    fn measure_text(&self, text: &str, style: &HandwritingStyle) -> Result<f32, MeasureError> {
        self(text, style)
    }
}

/// Average-glyph-width estimate: `chars * size * 0.6`.
pub fn estimate_width(text: &str, style: &HandwritingStyle) -> f32 {
    text.chars().count() as f32 * style.size * FALLBACK_GLYPH_EM
}

/// Measure `text`, falling back to [`estimate_width`] on error or non-finite output.
pub fn measure_or_estimate<M>(measurer: &M, text: &str, style: &HandwritingStyle) -> f32
where
    M: GlyphMeasurer + ?Sized,
{
    match measurer.measure_text(text, style) {
        Ok(width) if width.is_finite() => width,
        Ok(width) => {
            log::debug!(
                "non-finite width {} for {:?}; using average glyph estimate",
                width,
                text
            );
            estimate_width(text, style)
        }
        Err(err) => {
            log::debug!("{}; using average glyph estimate for {:?}", err, text);
            estimate_width(text, style)
        }
    }
}

/// Measurer that applies the average glyph width to every character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AverageGlyphMeasurer;

impl GlyphMeasurer for AverageGlyphMeasurer {
    fn measure_text(&self, text: &str, style: &HandwritingStyle) -> Result<f32, MeasureError> {
        Ok(estimate_width(text, style))
    }
}

/// Synthetic measurer with per-character width classes.
///
/// Useful when no rasterizer is available but lines should still break
/// roughly where a proportional handwriting face would break them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProportionalMeasurer {
    /// Extra width multiplier for every glyph.
    pub scale: f32,
}

impl ProportionalMeasurer {
    pub const fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Default for ProportionalMeasurer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl GlyphMeasurer for ProportionalMeasurer {
    fn measure_text(&self, text: &str, style: &HandwritingStyle) -> Result<f32, MeasureError> {
        let em_sum: f32 = text.chars().map(glyph_em_width).sum();
        // Slanted scripts overhang to the right by roughly tan(slant) of an em.
        let lean = style.slant.to_radians().tan().abs().min(0.5) * 0.5;
        Ok(em_sum * style.size * self.scale * (1.0 + lean))
    }
}

fn glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' | '\u{00A0}' => 0.30,
        '\t' => 1.20,
        'i' | 'l' | 'j' | 'I' | '|' | '!' | '\'' => 0.26,
        '.' | ',' | ':' | ';' | '`' | '"' => 0.25,
        'f' | 't' | 'r' => 0.36,
        '-' | '(' | ')' | '[' | ']' | '{' | '}' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' => 0.78,
        c if c.is_ascii_digit() => 0.55,
        c if c.is_ascii_uppercase() => 0.66,
        c if c.is_ascii_lowercase() => 0.54,
        c if c.is_whitespace() => 0.30,
        c if c.is_ascii_punctuation() => 0.44,
        _ => FALLBACK_GLYPH_EM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(size: f32) -> HandwritingStyle {
        HandwritingStyle {
            size,
            ..HandwritingStyle::default()
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn estimate_counts_chars_not_bytes() {
        let s = style(10.0);
        assert_close(estimate_width("abc", &s), 18.0);
        assert_close(estimate_width("héé", &s), 18.0);
        assert_eq!(estimate_width("", &s), 0.0);
    }

    #[test]
    fn closures_act_as_measurers() {
        let s = style(10.0);
        let fixed = |_: &str, _: &HandwritingStyle| -> Result<f32, MeasureError> { Ok(42.0) };
        assert_eq!(measure_or_estimate(&fixed, "anything", &s), 42.0);
    }

    #[test]
    fn failing_measurer_falls_back_to_estimate() {
        let s = style(20.0);
        let failing = |_: &str, _: &HandwritingStyle| -> Result<f32, MeasureError> {
            Err(MeasureError::MissingFont("QEDonaldRoss".to_string()))
        };
        assert_close(measure_or_estimate(&failing, "abcd", &s), 48.0);
    }

    #[test]
    fn non_finite_width_falls_back_to_estimate() {
        let s = style(20.0);
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let m = move |_: &str, _: &HandwritingStyle| -> Result<f32, MeasureError> { Ok(bad) };
            assert_close(measure_or_estimate(&m, "ab", &s), 24.0);
        }
    }

    #[test]
    fn average_measurer_matches_estimate() {
        let s = style(16.0);
        let text = "the quick brown fox";
        assert_eq!(
            AverageGlyphMeasurer.measure_text(text, &s),
            Ok(estimate_width(text, &s))
        );
    }

    #[test]
    fn proportional_measurer_separates_narrow_and_wide() {
        let s = style(20.0);
        let m = ProportionalMeasurer::default();
        let narrow = m.measure_text("iiii", &s).unwrap_or_default();
        let wide = m.measure_text("mmmm", &s).unwrap_or_default();
        assert!(narrow < wide);
        assert!(narrow > 0.0);
    }

    #[test]
    fn proportional_measurer_widens_slanted_text() {
        let m = ProportionalMeasurer::default();
        let upright = m.measure_text("hello", &style(20.0)).unwrap_or_default();
        let slanted = m
            .measure_text("hello", &style(20.0).with_slant(8.0))
            .unwrap_or_default();
        assert!(slanted > upright);
    }

    #[test]
    fn error_display_names_font() {
        let err = MeasureError::MissingFont("QEDavidReid".to_string());
        assert_eq!(err.to_string(), "font 'QEDavidReid' is not available");
    }
}
