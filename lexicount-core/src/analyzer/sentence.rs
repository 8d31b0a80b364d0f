//! Sentence segmentation capability.
//!
//! The scorer needs sentence spans of the original text for exactly one
//! statistic (`words_per_sentence`). Segmentation is an injected
//! capability: hosts embedding a real NLP segmenter implement
//! [`SentenceSegmenter`]; [`PunctSegmenter`] is a rule-based default so
//! the crate works out of the box.

/// Splits text into ordered sentence spans.
///
/// Implementations must return spans of the input (no normalization);
/// the scorer normalizes each span itself.
pub trait SentenceSegmenter {
    /// Returns the sentence spans of `text` in order of appearance.
    fn segment<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

/// Default segmenter: breaks after runs of `.`, `!`, `?` (plus any
/// closing quotes attached to them). Abbreviation-blind by design;
/// callers who care inject a real segmenter instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct PunctSegmenter;

impl SentenceSegmenter for PunctSegmenter {
    fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let bytes = text.as_bytes();
        let mut out = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < bytes.len() {
            if matches!(bytes[i], b'.' | b'!' | b'?') {
                let mut end = i + 1;
                while end < bytes.len()
                    && matches!(bytes[end], b'.' | b'!' | b'?' | b'"' | b'\'' | b')')
                {
                    end += 1;
                }
                // start/end always sit on ASCII bytes, so slicing is safe.
                let span = text[start..end].trim();
                if !span.is_empty() {
                    out.push(span);
                }
                start = end;
                i = end;
            } else {
                i += 1;
            }
        }

        if start < text.len() {
            let span = text[start..].trim();
            if !span.is_empty() {
                out.push(span);
            }
        }

        out
    }
}
