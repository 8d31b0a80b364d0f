//! Text scoring.
//!
//! The [`Scorer`] owns a compiled lexicon plus the profile-driven
//! analysis pipeline and turns raw text into per-category coverage
//! scores. Scoring holds no mutable state, so one scorer can serve many
//! texts (and threads) after a single dictionary compilation.

use std::path::Path;

use lexicount_types::{
    DictionaryError, DominantResult, Profile, ScoreResult, UnknownCategoryError,
};
use tracing::debug;

use crate::analyzer::{NormalizedText, PunctSegmenter, SentenceSegmenter, TextNormalizer};
use crate::lexicon::{compile_lexicon, CompiledLexicon, PatternSet, TokenMatcher};

/// Scoring engine: one compiled lexicon, one language profile.
pub struct Scorer {
    lexicon: CompiledLexicon,
    profile: Profile,
    normalizer: TextNormalizer,
    segmenter: Box<dyn SentenceSegmenter + Send + Sync>,
}

impl Scorer {
    /// Wraps an already-compiled lexicon. Uses the rule-based
    /// [`PunctSegmenter`] for sentence statistics; swap it with
    /// [`Scorer::with_segmenter`].
    #[must_use]
    pub fn new(lexicon: CompiledLexicon, profile: Profile) -> Self {
        Self {
            lexicon,
            normalizer: TextNormalizer::new(profile.normalize),
            segmenter: Box::new(PunctSegmenter),
            profile,
        }
    }

    /// Compiles the dictionary at `path` under `profile` and wraps it.
    pub fn from_path<P: AsRef<Path>>(path: P, profile: Profile) -> Result<Self, DictionaryError> {
        let lexicon = compile_lexicon(path, &profile)?;
        Ok(Self::new(lexicon, profile))
    }

    /// Replaces the sentence segmenter used for `words_per_sentence`.
    #[must_use]
    pub fn with_segmenter<S>(mut self, segmenter: S) -> Self
    where
        S: SentenceSegmenter + Send + Sync + 'static,
    {
        self.segmenter = Box::new(segmenter);
        self
    }

    /// The compiled lexicon this scorer evaluates against.
    #[inline(always)]
    #[must_use]
    pub fn lexicon(&self) -> &CompiledLexicon {
        &self.lexicon
    }

    /// The language profile this scorer was built with.
    #[inline(always)]
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Scores `text` against every category of the lexicon.
    ///
    /// Returns `None` when normalization yields no tokens (empty input,
    /// punctuation-only input, or truncation to zero) — there is nothing
    /// to divide by, so no record is produced.
    #[must_use]
    pub fn score(&self, text: &str, max_tokens: Option<usize>) -> Option<ScoreResult> {
        let normalized = self.normalizer.normalize(text, max_tokens);
        if normalized.is_empty() {
            return None;
        }

        let word_count = normalized.token_count();
        let words_per_sentence = self.words_per_sentence(&normalized, max_tokens);
        let six_plus = normalized
            .tokens
            .iter()
            .filter(|t| t.chars().count() >= 6)
            .count();
        let six_plus_words = six_plus as f64 / word_count as f64;

        let categories: Vec<(String, f64)> = self
            .lexicon
            .categories()
            .iter()
            .map(|category| {
                let (coverage, _) = category.matcher().coverage(&normalized.tokens);
                (category.name().to_string(), coverage)
            })
            .collect();

        debug!(
            profile = self.profile.name,
            word_count,
            categories = categories.len(),
            "scored text"
        );

        Some(ScoreResult::new(
            word_count,
            words_per_sentence,
            six_plus_words,
            categories,
        ))
    }

    /// Scores `text` against the union of the named categories' pattern
    /// sets, reporting one coverage value plus the tokens that drove it.
    ///
    /// Category names are validated up front: an unknown name fails the
    /// whole query before any text is inspected. Returns `Ok(None)` for
    /// token-less input, as [`Scorer::score`] does.
    pub fn score_dominant(
        &self,
        text: &str,
        categories: &[&str],
        max_tokens: Option<usize>,
    ) -> Result<Option<DominantResult>, UnknownCategoryError> {
        let mut union = PatternSet::default();
        for name in categories {
            let category = self
                .lexicon
                .get(name)
                .ok_or_else(|| UnknownCategoryError {
                    name: (*name).to_string(),
                })?;
            for pattern in category.patterns().patterns() {
                union.insert(pattern.clone());
            }
        }

        let normalized = self.normalizer.normalize(text, max_tokens);
        if normalized.is_empty() {
            return Ok(None);
        }

        let matcher = TokenMatcher::build(union.patterns());
        let (coverage, matched_tokens) = matcher.coverage(&normalized.tokens);

        debug!(
            profile = self.profile.name,
            categories = categories.len(),
            patterns = union.len(),
            coverage,
            "scored dominant-class query"
        );

        Ok(Some(DominantResult {
            coverage,
            matched_tokens,
            tokens: normalized.tokens,
        }))
    }

    /// Mean normalized token count across sentence spans of the raw
    /// text, each span normalized under the same truncation limit.
    /// Every span counts toward the mean, including spans that
    /// normalize to zero tokens; when segmentation yields no spans at
    /// all, the whole text counts as one sentence.
    fn words_per_sentence(&self, normalized: &NormalizedText<'_>, max_tokens: Option<usize>) -> f64 {
        let spans = self.segmenter.segment(normalized.raw);
        if spans.is_empty() {
            return normalized.token_count() as f64;
        }

        let total: usize = spans
            .iter()
            .map(|span| self.normalizer.normalize(span, max_tokens).token_count())
            .sum();
        total as f64 / spans.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::compile_lexicon_str;

    const DICT: &str = "%\n1\tposemo\n2\tnegemo\n%\nhappy*\t1\nglad\t1\nsad\t2\n";

    fn scorer() -> Scorer {
        let profile = Profile::english();
        let lexicon = compile_lexicon_str(DICT, &profile).unwrap();
        Scorer::new(lexicon, profile)
    }

    #[test]
    fn scores_both_categories() {
        let result = scorer().score("I am happy and she is sad", None).unwrap();
        assert_eq!(result.word_count, 7);
        assert_eq!(result.category("posemo"), Some(1.0 / 7.0));
        assert_eq!(result.category("negemo"), Some(1.0 / 7.0));
    }

    #[test]
    fn unmatched_category_scores_zero() {
        let result = scorer().score("nothing relevant here", None).unwrap();
        assert_eq!(result.category("posemo"), Some(0.0));
        assert_eq!(result.category("negemo"), Some(0.0));
    }

    #[test]
    fn empty_input_yields_none() {
        let s = scorer();
        assert!(s.score("", None).is_none());
        assert!(s.score("?!...", None).is_none());
        assert!(s.score("words here", Some(0)).is_none());
    }

    #[test]
    fn truncation_changes_the_denominator() {
        let s = scorer();
        let result = s.score("happy one two three", Some(2)).unwrap();
        assert_eq!(result.word_count, 2);
        assert_eq!(result.category("posemo"), Some(0.5));
    }

    #[test]
    fn six_plus_counts_long_tokens() {
        let result = scorer().score("tiny enormous gigantic ox", None).unwrap();
        // "enormous" and "gigantic" have six or more characters.
        assert_eq!(result.six_plus_words, 2.0 / 4.0);
    }

    #[test]
    fn words_per_sentence_is_a_mean() {
        let result = scorer().score("One two three. Four five.", None).unwrap();
        assert_eq!(result.words_per_sentence, 2.5);
    }

    #[test]
    fn unterminated_text_is_one_sentence() {
        let result = scorer().score("just four small words", None).unwrap();
        assert_eq!(result.words_per_sentence, 4.0);
    }

    #[test]
    fn token_less_sentences_count_in_the_mean() {
        // The second span ("!!!") normalizes to zero tokens but still
        // contributes to the denominator.
        let result = scorer().score("One two three. !!!", None).unwrap();
        assert_eq!(result.words_per_sentence, 1.5);
    }

    #[test]
    fn truncation_applies_per_sentence() {
        let result = scorer().score("One two three. Four five.", Some(2)).unwrap();
        assert_eq!(result.word_count, 2);
        assert_eq!(result.words_per_sentence, 2.0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let s = scorer();
        let text = "I was happy, then sad. Then happy again!";
        let first = s.score(text, None).unwrap();
        let second = s.score(text, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn matching_is_case_insensitive_for_latin_profiles() {
        let result = scorer().score("HAPPY days", None).unwrap();
        assert_eq!(result.category("posemo"), Some(0.5));
    }

    #[test]
    fn dominant_unions_categories() {
        let s = scorer();
        let result = s
            .score_dominant("happy glad sad other", &["posemo", "negemo"], None)
            .unwrap()
            .unwrap();
        assert_eq!(result.coverage, 3.0 / 4.0);
        assert_eq!(result.matched_tokens, vec!["happy", "glad", "sad"]);
        assert_eq!(result.tokens.len(), 4);
    }

    #[test]
    fn dominant_unknown_category_is_an_error() {
        let s = scorer();
        let err = s.score_dominant("happy", &["posemo", "anx"], None).unwrap_err();
        assert_eq!(err.name, "anx");
    }

    #[test]
    fn dominant_validates_before_inspecting_text() {
        // Even empty input surfaces the unknown category.
        let s = scorer();
        assert!(s.score_dominant("", &["anx"], None).is_err());
    }

    #[test]
    fn dominant_empty_input_yields_none() {
        let s = scorer();
        assert!(s.score_dominant("", &["posemo"], None).unwrap().is_none());
    }

    #[test]
    fn dominant_union_counts_shared_tokens_once() {
        let profile = Profile::english();
        let dict = "%\n1\tone\n2\ttwo\n%\nhappy*\t1\nhappy*\t2\n";
        let lexicon = compile_lexicon_str(dict, &profile).unwrap();
        let s = Scorer::new(lexicon, profile);
        let result = s
            .score_dominant("happy day", &["one", "two"], None)
            .unwrap()
            .unwrap();
        assert_eq!(result.coverage, 0.5);
    }

    #[test]
    fn whitespace_profile_scores_pretokenized_text() {
        let profile = Profile::traditional_chinese();
        let dict = "%\n1\temo\n%\n開心\t1\n";
        let lexicon = compile_lexicon_str(dict, &profile).unwrap();
        let s = Scorer::new(lexicon, profile);
        let result = s.score("我 很 開心", None).unwrap();
        assert_eq!(result.word_count, 3);
        assert_eq!(result.category("emo"), Some(1.0 / 3.0));
    }

    #[test]
    fn custom_segmenter_is_used() {
        struct LineSegmenter;
        impl SentenceSegmenter for LineSegmenter {
            fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
                text.lines().collect()
            }
        }

        let s = scorer().with_segmenter(LineSegmenter);
        let result = s.score("one two\nthree", None).unwrap();
        assert_eq!(result.words_per_sentence, 1.5);
    }
}
