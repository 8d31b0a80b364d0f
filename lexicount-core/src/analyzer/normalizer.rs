//! Profile-driven text normalization.
//!
//! Turns raw input into the exact form the pattern matcher operates on.
//! Two rules exist (see [`NormalizeRule`]):
//!
//! - **LatinFold** (English): lower-case, fold the `kind of` bigram into
//!   the single token `kindof`, replace every character outside
//!   `[a-z0-9'/-]` with a space, then tokenize.
//! - **WhitespaceOnly** (Traditional Chinese, Romanian, Dutch): split on
//!   whitespace only; the dictionary entries for these languages match at
//!   the character level, so no case folding or filtering is applied.
//!
//! Both rules truncate to `max_tokens` when one is configured and rejoin
//! the surviving tokens with single spaces to form the matching text.

use crate::analyzer::tokenizer::tokenize;
use lexicount_types::NormalizeRule;

/// Byte-level filter for the LatinFold rule: keeps `a-z`, `0-9`,
/// apostrophe, slash and hyphen; everything else (including all bytes
/// of multi-byte characters) becomes a space. Input is lower-cased
/// before filtering, so `A-Z` never reaches the table.
#[rustfmt::skip]
const FILTER_TABLE: [u8; 256] = [
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x27,0x20,0x20,0x20,0x20,0x20,0x2d,0x20,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
    0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,0x20,
];

/// Output of one normalization pass. Created per scoring call and
/// discarded afterwards.
#[derive(Debug, Clone)]
pub struct NormalizedText<'t> {
    /// The original, un-normalized input.
    pub raw: &'t str,
    /// Tokens rejoined with single spaces; the string the matcher sees.
    pub matching_text: String,
    /// The (possibly truncated) token sequence.
    pub tokens: Vec<String>,
}

impl NormalizedText<'_> {
    /// Number of tokens after truncation.
    #[inline(always)]
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// True when normalization produced no tokens (the empty-input
    /// sentinel: scoring must short-circuit instead of dividing by zero).
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Language-profile-driven normalizer.
pub struct TextNormalizer {
    rule: NormalizeRule,
}

impl TextNormalizer {
    /// Creates a normalizer for the given rule.
    pub const fn new(rule: NormalizeRule) -> Self {
        Self { rule }
    }

    /// Normalizes `input`, truncating to `max_tokens` when configured.
    pub fn normalize<'t>(&self, input: &'t str, max_tokens: Option<usize>) -> NormalizedText<'t> {
        let cap = max_tokens.unwrap_or(usize::MAX);

        let tokens = match self.rule {
            NormalizeRule::LatinFold => {
                let lowered = input.to_lowercase();
                // The bigram "kind of" scores as the single token "kindof".
                let folded = lowered.replace("kind of", "kindof");

                let mut filtered = Vec::with_capacity(folded.len());
                for &b in folded.as_bytes() {
                    filtered.push(FILTER_TABLE[b as usize]);
                }
                // SAFETY: every FILTER_TABLE entry is a single ASCII byte,
                // so the filtered buffer is valid UTF-8.
                let filtered = unsafe { String::from_utf8_unchecked(filtered) };

                let mut tokens: Vec<String> = Vec::new();
                tokenize(&filtered, |text, _| {
                    if tokens.len() < cap {
                        tokens.push(text.to_string());
                    }
                });
                tokens
            }
            NormalizeRule::WhitespaceOnly => input
                .split_whitespace()
                .take(cap)
                .map(str::to_string)
                .collect(),
        };

        let matching_text = tokens.join(" ");

        NormalizedText {
            raw: input,
            matching_text,
            tokens,
        }
    }
}
