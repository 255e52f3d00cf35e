#![allow(dead_code)]

use std::path::PathBuf;

pub const LETTER_FIXTURE: &str = "tests/fixtures/letter.txt";

const WORDS: &[&str] = &[
    "ink", "paper", "margin", "notebook", "quietly", "a", "the", "handwriting",
    "extraordinarily", "of", "pencil", "smudge", "letters", "we", "wandered",
    "afternoon", "is", "scribbled", "to", "and",
];

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(name);
    path
}

pub fn letter_text() -> String {
    std::fs::read_to_string(fixture_path(LETTER_FIXTURE))
        .unwrap_or_else(|e| panic!("read {}: {}", LETTER_FIXTURE, e))
}

/// Deterministic pseudo-prose with irregular whitespace.
pub fn generated_prose(word_count: usize, seed: u64) -> String {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut out = String::new();
    for i in 0..word_count {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let pick = (state >> 33) as usize;
        if i > 0 {
            out.push_str(match pick % 11 {
                0 => "  ",
                1 => "\n",
                2 => "\t ",
                3 => "\n\n",
                _ => " ",
            });
        }
        out.push_str(WORDS[pick % WORDS.len()]);
    }
    out
}
