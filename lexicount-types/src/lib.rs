//! Core types and language profiles for the Lexicount scoring engine.
//!
//! This crate provides the fundamental types that are shared across
//! the Lexicount ecosystem. Keeping types separate ensures:
//!
//! - **Cross-crate compatibility**: Core and embedding hosts share the same types
//! - **Clean boundaries**: No circular dependencies between crates

#![warn(missing_docs)]

use thiserror::Error;

/// Numeric category identifier as declared in a dictionary header.
///
/// Dictionary files reference categories by small integer ids; the
/// compiler resolves them to names and discards the ids afterwards.
pub type CategoryId = u32;

/// How raw text is prepared before pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeRule {
    /// Lower-case, fold the `kind of` bigram, replace every character
    /// outside `[a-z0-9'/-]` with a space, then split on whitespace.
    /// Used for Latin-script dictionaries.
    LatinFold,
    /// Split on whitespace only. Used for dictionaries whose entries
    /// already operate at the character level (e.g. Traditional Chinese)
    /// or that expect pre-tokenized input.
    WhitespaceOnly,
}

/// How dictionary file bytes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryEncoding {
    /// Strict UTF-8; invalid bytes fail compilation.
    Utf8,
    /// Lossy UTF-8 for legacy dictionary files; invalid bytes become
    /// replacement characters instead of aborting.
    Utf8Lossy,
}

/// Pattern metacharacters escaped by every profile.
const ESCAPE_MINIMAL: &[char] = &['(', ')'];

/// Pattern metacharacters escaped by full-escape profiles.
///
/// Backslash must come first so the escapes added for the remaining
/// characters are not themselves re-escaped.
const ESCAPE_FULL: &[char] = &['\\', '(', ')', '$', '+', '"', '.', '^'];

/// Language profile: the per-language deltas of one shared algorithm.
///
/// The engine itself is language-agnostic; everything a new language
/// needs is a profile value. The four presets below match the
/// dictionaries the engine historically shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Human-readable profile name, used in diagnostics.
    pub name: &'static str,
    /// Text preparation rule applied before matching.
    pub normalize: NormalizeRule,
    /// When set, a pattern containing both `(` and `)` has all
    /// parentheses removed (they mark optional variants in the source
    /// dictionaries). When unset, parentheses are escaped literally.
    pub strip_variant_parens: bool,
    /// When set, the full metacharacter set is escaped. The English
    /// lineage escapes only parentheses; this asymmetry is preserved
    /// deliberately (see DESIGN.md) rather than unified.
    pub escape_full: bool,
    /// Decoding applied when reading the dictionary file.
    pub encoding: DictionaryEncoding,
}

impl Profile {
    /// English profile: Latin folding, variant parens stripped,
    /// parens-only escaping.
    pub const fn english() -> Self {
        Self {
            name: "english",
            normalize: NormalizeRule::LatinFold,
            strip_variant_parens: true,
            escape_full: false,
            encoding: DictionaryEncoding::Utf8,
        }
    }

    /// Traditional Chinese profile: whitespace-only tokenization,
    /// parens kept and escaped, full metacharacter escaping.
    pub const fn traditional_chinese() -> Self {
        Self {
            name: "traditional_chinese",
            normalize: NormalizeRule::WhitespaceOnly,
            strip_variant_parens: false,
            escape_full: true,
            encoding: DictionaryEncoding::Utf8Lossy,
        }
    }

    /// Romanian profile: whitespace-only tokenization with the
    /// English-lineage pattern handling.
    pub const fn romanian() -> Self {
        Self {
            name: "romanian",
            normalize: NormalizeRule::WhitespaceOnly,
            strip_variant_parens: true,
            escape_full: false,
            encoding: DictionaryEncoding::Utf8Lossy,
        }
    }

    /// Dutch profile: whitespace-only tokenization with the
    /// English-lineage pattern handling.
    pub const fn dutch() -> Self {
        Self {
            name: "dutch",
            normalize: NormalizeRule::WhitespaceOnly,
            strip_variant_parens: true,
            escape_full: false,
            encoding: DictionaryEncoding::Utf8Lossy,
        }
    }

    /// Prepares a raw dictionary pattern for compilation: strips
    /// variant parentheses (profile permitting) and escapes the
    /// profile's metacharacter set.
    ///
    /// The returned text may contain `\`-escapes and unescaped `*`
    /// wildcards; everything else is literal.
    pub fn prepare_pattern(&self, raw: &str) -> String {
        let stripped: String;
        let mut text = raw;

        if self.strip_variant_parens && raw.contains('(') && raw.contains(')') {
            stripped = raw.chars().filter(|&c| c != '(' && c != ')').collect();
            text = &stripped;
        }

        let escape = if self.escape_full {
            ESCAPE_FULL
        } else {
            ESCAPE_MINIMAL
        };

        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if escape.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

/// A compiled dictionary pattern: escaped text plus wildcard marker.
///
/// `text` is the profile-prepared form (see [`Profile::prepare_pattern`]):
/// `\x` denotes a literal `x`, an unescaped `*` denotes "zero or more
/// non-space characters" with a token boundary after the expansion.
/// Both boundaries of a match are always token boundaries.
///
/// Patterns are deduplicated within a category by their escaped text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    text: String,
    is_wildcard: bool,
}

impl Pattern {
    /// Creates a pattern from profile-prepared text.
    pub fn new(text: String) -> Self {
        let is_wildcard = has_unescaped_star(&text);
        Self { text, is_wildcard }
    }

    /// The escaped pattern text.
    #[inline(always)]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the pattern contains an unescaped `*` wildcard.
    #[inline(always)]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }
}

fn has_unescaped_star(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '*' => return true,
            _ => {}
        }
    }
    false
}

/// Errors raised while compiling a dictionary file.
///
/// All variants are fatal: a dictionary that fails to compile produces
/// no lexicon. Header lines that fail to parse are skipped instead
/// (metadata lines are expected there), so they never surface here.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The dictionary file could not be read.
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),
    /// EOF was reached inside the `%`-delimited category header.
    #[error("category header section is not terminated by a closing '%'")]
    UnterminatedHeader,
    /// A pattern line referenced a category with a non-integer id.
    #[error("line {line}: category id {token:?} is not an integer")]
    InvalidCategoryId {
        /// 1-based line number in the dictionary file.
        line: usize,
        /// The offending field text.
        token: String,
    },
    /// A pattern line referenced an id missing from the header.
    #[error("line {line}: category id {id} is not declared in the header")]
    UnknownCategoryId {
        /// 1-based line number in the dictionary file.
        line: usize,
        /// The unresolved id.
        id: CategoryId,
    },
    /// A pattern line had category ids but an empty pattern field.
    #[error("line {line}: empty pattern")]
    EmptyPattern {
        /// 1-based line number in the dictionary file.
        line: usize,
    },
}

/// A dominant-class query named a category absent from the lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {name}")]
pub struct UnknownCategoryError {
    /// The requested category name.
    pub name: String,
}

/// Per-text scoring record: fixed readability statistics plus one
/// coverage value per category, in the lexicon's stored order.
///
/// Coverage values are fractions of the (truncated) token sequence and
/// always lie in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Number of tokens after normalization and truncation.
    pub word_count: usize,
    /// Mean token count across sentence-segmented spans of the
    /// original, un-normalized text.
    pub words_per_sentence: f64,
    /// Fraction of tokens with at least six characters.
    pub six_plus_words: f64,
    categories: Vec<(String, f64)>,
}

impl ScoreResult {
    /// Assembles a result record. `categories` must be in lexicon order.
    pub fn new(
        word_count: usize,
        words_per_sentence: f64,
        six_plus_words: f64,
        categories: Vec<(String, f64)>,
    ) -> Self {
        Self {
            word_count,
            words_per_sentence,
            six_plus_words,
            categories,
        }
    }

    /// Coverage for one category, if present in the lexicon.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// All `(category, coverage)` pairs in lexicon order.
    #[must_use]
    pub fn categories(&self) -> &[(String, f64)] {
        &self.categories
    }
}

/// Result of a dominant-class query: a single coverage value over the
/// unioned pattern sets, plus the words that drove it.
#[derive(Debug, Clone, PartialEq)]
pub struct DominantResult {
    /// Fraction of tokens matched by the unioned pattern set.
    pub coverage: f64,
    /// Matched tokens in order of first occurrence.
    pub matched_tokens: Vec<String>,
    /// The (possibly truncated) token sequence that was scored.
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_escapes_only_parens() {
        let p = Profile::english();
        assert_eq!(p.prepare_pattern("a.b$c"), "a.b$c");
        assert_eq!(p.prepare_pattern("smile("), r"smile\(");
    }

    #[test]
    fn full_escape_covers_metachars() {
        let p = Profile::traditional_chinese();
        assert_eq!(p.prepare_pattern("a.b"), r"a\.b");
        assert_eq!(p.prepare_pattern("1+1"), r"1\+1");
        assert_eq!(p.prepare_pattern("x^y$"), r"x\^y\$");
        assert_eq!(p.prepare_pattern(r"a\b"), r"a\\b");
        assert_eq!(p.prepare_pattern("\"q\""), "\\\"q\\\"");
    }

    #[test]
    fn variant_parens_stripped_when_balanced() {
        let p = Profile::english();
        assert_eq!(p.prepare_pattern("colo(u)r"), "colour");
        // Lone paren: nothing to strip, escaped instead.
        assert_eq!(p.prepare_pattern(":("), r":\(");
    }

    #[test]
    fn chinese_profile_keeps_parens() {
        let p = Profile::traditional_chinese();
        assert_eq!(p.prepare_pattern("colo(u)r"), r"colo\(u\)r");
    }

    #[test]
    fn wildcard_detection() {
        assert!(Pattern::new("happy*".into()).is_wildcard());
        assert!(!Pattern::new("sad".into()).is_wildcard());
        // An escaped star is a literal, not a wildcard.
        assert!(!Pattern::new(r"a\*b".into()).is_wildcard());
        assert!(Pattern::new(r"a\\*".into()).is_wildcard());
    }

    #[test]
    fn patterns_dedupe_by_text() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Pattern::new("happy*".into()));
        set.insert(Pattern::new("happy*".into()));
        set.insert(Pattern::new("happy".into()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn score_result_lookup() {
        let r = ScoreResult::new(
            7,
            7.0,
            0.0,
            vec![("posemo".into(), 1.0 / 7.0), ("negemo".into(), 0.0)],
        );
        assert_eq!(r.word_count, 7);
        assert_eq!(r.category("posemo"), Some(1.0 / 7.0));
        assert_eq!(r.category("negemo"), Some(0.0));
        assert_eq!(r.category("anx"), None);
        assert_eq!(r.categories().len(), 2);
    }

    #[test]
    fn error_messages_name_the_line() {
        let e = DictionaryError::InvalidCategoryId {
            line: 12,
            token: "abc".into(),
        };
        assert!(e.to_string().contains("line 12"));

        let e = DictionaryError::UnknownCategoryId { line: 3, id: 99 };
        assert!(e.to_string().contains("99"));
    }

    #[test]
    fn unknown_category_error_display() {
        let e = UnknownCategoryError {
            name: "posemo".into(),
        };
        assert_eq!(e.to_string(), "unknown category: posemo");
    }

    #[test]
    fn presets_differ_where_documented() {
        let en = Profile::english();
        let zh = Profile::traditional_chinese();
        let ro = Profile::romanian();
        let nl = Profile::dutch();

        assert_eq!(en.normalize, NormalizeRule::LatinFold);
        assert_eq!(zh.normalize, NormalizeRule::WhitespaceOnly);
        assert_eq!(ro.normalize, NormalizeRule::WhitespaceOnly);
        assert_eq!(nl.normalize, NormalizeRule::WhitespaceOnly);

        assert!(!zh.strip_variant_parens);
        assert!(zh.escape_full);
        assert!(!en.escape_full);
        assert!(!ro.escape_full && ro.strip_variant_parens);
    }
}
