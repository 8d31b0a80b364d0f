//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Profile-driven lower-casing, filtering and truncation
//! - **Tokenizer**: Splits filtered text into tokens
//! - **Sentence**: Sentence segmentation capability for readability stats

pub mod normalizer;
pub mod sentence;
pub mod tokenizer;

pub use normalizer::{NormalizedText, TextNormalizer};
pub use sentence::{PunctSegmenter, SentenceSegmenter};
