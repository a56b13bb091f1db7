//! Text normalization for spelling comparisons.
//!
//! Required-spelling rules compare text after it has been brought into a
//! canonical shape: Unicode NFC, lowercase, typographic apostrophes folded
//! to `'`, and whitespace (including non-breaking spaces and line breaks)
//! collapsed to single spaces.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse any whitespace run into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Apostrophe-like characters.
const APOSTROPHE_CHARS: &[char] = &['\'', '\u{2019}', '\u{2018}', '`'];

/// Text normalizer for spelling comparisons.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new text normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a piece of text for comparison.
    pub fn normalize(&self, text: &str) -> String {
        let folded: String = text.nfc().map(fold_apostrophe).collect::<String>().to_lowercase();

        WHITESPACE_COLLAPSE_REGEX
            .replace_all(&folded, " ")
            .trim()
            .to_string()
    }

    /// Normalize consecutive segments as one text, remembering which
    /// segment each output byte came from.
    ///
    /// Whitespace runs collapse across segment boundaries but the result is
    /// not trimmed, so a leading or trailing space may remain. The owner
    /// list has one entry per byte of the returned string.
    pub fn normalize_segments<'a, I>(&self, segments: I) -> (String, Vec<usize>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut text = String::new();
        let mut owners = Vec::new();
        let mut after_space = false;

        let mut push = |text: &mut String, c: char, owner: usize| {
            text.push(c);
            owners.extend(std::iter::repeat(owner).take(c.len_utf8()));
        };

        for (owner, segment) in segments.into_iter().enumerate() {
            for c in segment.nfc().map(fold_apostrophe) {
                if c.is_whitespace() {
                    if !after_space {
                        push(&mut text, ' ', owner);
                        after_space = true;
                    }
                    continue;
                }
                after_space = false;
                for lower in c.to_lowercase() {
                    push(&mut text, lower, owner);
                }
            }
        }

        (text, owners)
    }
}

fn fold_apostrophe(c: char) -> char {
    if APOSTROPHE_CHARS.contains(&c) {
        '\''
    } else {
        c
    }
}
