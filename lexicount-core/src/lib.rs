//! Lexicount: lexicon-driven text scoring.
//!
//! A dictionary file maps word patterns to named categories; the engine
//! compiles it once and then scores arbitrary text, reporting per-category
//! coverage (fraction of tokens matched) alongside a few readability
//! statistics. Language differences are captured entirely by
//! [`Profile`] values; the scoring algorithm itself is language-agnostic.
//!
//! ```no_run
//! use lexicount_core::{Profile, Scorer};
//!
//! # fn main() -> Result<(), lexicount_core::DictionaryError> {
//! let scorer = Scorer::from_path("emotions.dic", Profile::english())?;
//! if let Some(result) = scorer.score("I am happy and she is sad", None) {
//!     println!("posemo = {:?}", result.category("posemo"));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod lexicon;
pub mod scorer;

pub use analyzer::{PunctSegmenter, SentenceSegmenter, TextNormalizer};
pub use lexicon::{compile_lexicon, compile_lexicon_str, CompiledLexicon, LexiconStats};
pub use scorer::Scorer;

pub use lexicount_types::{
    CategoryId, DictionaryEncoding, DictionaryError, DominantResult, NormalizeRule, Pattern,
    Profile, ScoreResult, UnknownCategoryError,
};
