//! Compiled lexicon infrastructure.
//!
//! A dictionary file is compiled once at initialization into a
//! [`CompiledLexicon`]: an ordered collection of categories, each with a
//! deduplicated pattern set and a pre-built [`TokenMatcher`].
//!
//! The lexicon is immutable after compilation and holds no interior
//! mutability, so it is safe to share read-only across threads when the
//! host embeds the engine in a multi-threaded service.

mod compile;
mod matcher;

pub use compile::{compile_lexicon, compile_lexicon_str};
pub use matcher::TokenMatcher;

use lexicount_types::Pattern;
use rustc_hash::{FxHashMap, FxHashSet};

/// An insertion-ordered, deduplicated set of compiled patterns.
///
/// Duplicates (by escaped text) are dropped on insert, mirroring the
/// set semantics of the dictionary format: listing a pattern twice under
/// one category must not double its weight.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    seen: FxHashSet<String>,
}

impl PatternSet {
    /// Inserts a pattern; returns `false` if it was already present.
    pub fn insert(&mut self, pattern: Pattern) -> bool {
        if self.seen.insert(pattern.text().to_string()) {
            self.patterns.push(pattern);
            true
        } else {
            false
        }
    }

    /// The deduplicated patterns in insertion order.
    #[inline(always)]
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Number of distinct patterns.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when the set holds no patterns.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl core::ops::Index<usize> for PatternSet {
    type Output = Pattern;

    fn index(&self, index: usize) -> &Self::Output {
        &self.patterns[index]
    }
}

/// One category of the compiled lexicon.
#[derive(Debug)]
pub struct Category {
    name: String,
    patterns: PatternSet,
    matcher: TokenMatcher,
}

impl Category {
    pub(crate) fn new(name: String, patterns: PatternSet) -> Self {
        let matcher = TokenMatcher::build(patterns.patterns());
        Self {
            name,
            patterns,
            matcher,
        }
    }

    /// Category name as declared in the dictionary header.
    #[inline(always)]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The category's pattern set.
    #[inline(always)]
    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The pre-built matcher for this category.
    #[inline(always)]
    #[must_use]
    pub fn matcher(&self) -> &TokenMatcher {
        &self.matcher
    }
}

/// Immutable mapping from category name to compiled pattern set.
///
/// Categories are stored in first-appearance order of the dictionary
/// body; scoring iterates them in that order.
#[derive(Debug)]
pub struct CompiledLexicon {
    categories: Vec<Category>,
    by_name: FxHashMap<String, usize>,
}

impl CompiledLexicon {
    pub(crate) fn from_categories(categories: Vec<Category>) -> Self {
        let by_name = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();
        Self {
            categories,
            by_name,
        }
    }

    /// Number of categories.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the lexicon holds no categories.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Whether a category exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Categories in stored (dictionary) order.
    #[inline(always)]
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up one category by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.by_name.get(name).map(|&i| &self.categories[i])
    }

    /// Returns lexicon statistics.
    #[must_use]
    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            num_categories: self.categories.len(),
            num_patterns: self.categories.iter().map(|c| c.patterns.len()).sum(),
        }
    }
}

/// A snapshot of lexicon statistics.
#[derive(Debug, Clone, Copy)]
pub struct LexiconStats {
    /// Number of categories.
    pub num_categories: usize,
    /// Total number of distinct patterns across categories.
    pub num_patterns: usize,
}

impl core::fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} categories, {} patterns",
            self.num_categories, self.num_patterns
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_set_dedupes() {
        let mut set = PatternSet::default();
        assert!(set.insert(Pattern::new("happy*".into())));
        assert!(!set.insert(Pattern::new("happy*".into())));
        assert!(set.insert(Pattern::new("happy".into())));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn pattern_set_keeps_insertion_order() {
        let mut set = PatternSet::default();
        set.insert(Pattern::new("b".into()));
        set.insert(Pattern::new("a".into()));
        let texts: Vec<&str> = set.patterns().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn lexicon_lookup_and_order() {
        let mut posemo = PatternSet::default();
        posemo.insert(Pattern::new("happy*".into()));
        let mut negemo = PatternSet::default();
        negemo.insert(Pattern::new("sad".into()));

        let lex = CompiledLexicon::from_categories(vec![
            Category::new("posemo".into(), posemo),
            Category::new("negemo".into(), negemo),
        ]);

        assert_eq!(lex.len(), 2);
        assert!(lex.contains("posemo"));
        assert!(!lex.contains("anx"));
        assert_eq!(lex.get("negemo").map(|c| c.name()), Some("negemo"));

        let order: Vec<&str> = lex.categories().iter().map(|c| c.name()).collect();
        assert_eq!(order, vec!["posemo", "negemo"]);
    }

    #[test]
    fn stats_display() {
        let mut set = PatternSet::default();
        set.insert(Pattern::new("a".into()));
        set.insert(Pattern::new("b*".into()));
        let lex = CompiledLexicon::from_categories(vec![Category::new("one".into(), set)]);
        let stats = lex.stats();
        assert_eq!(stats.num_categories, 1);
        assert_eq!(stats.num_patterns, 2);
        assert_eq!(format!("{stats}"), "1 categories, 2 patterns");
    }
}
