//! Editor-style document statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Words per page used for the rough page estimate.
pub const WORDS_PER_ESTIMATED_PAGE: usize = 250;

/// Word, character, and estimated page counts for raw input text.
///
/// `estimated_pages` is a quick editor hint; the real count comes from
/// pagination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentStats {
    /// Whitespace-separated words.
    pub words: usize,
    /// Unicode scalar values, whitespace included.
    pub chars: usize,
    pub estimated_pages: usize,
}

impl DocumentStats {
    pub fn from_text(text: &str) -> Self {
        let words = text.split_whitespace().count();
        Self {
            words,
            chars: text.chars().count(),
            estimated_pages: words.div_ceil(WORDS_PER_ESTIMATED_PAGE),
        }
    }
}
