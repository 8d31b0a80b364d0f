//! Streaming tokenizer.
//!
//! Splits filtered text into word tokens for scoring. This is the second
//! stage of the text pipeline: the normalizer maps separator characters to
//! ASCII spaces, and the tokenizer emits each non-space run as a token.
//!
//! - **Zero allocation**: tokens are slices of the input, not copies
//! - **Streaming**: tokens are emitted via callback, no intermediate vector
//! - **Fast**: single memchr byte-scan for ASCII space (0x20)
//!
//! Unlike a whitespace splitter, the input may contain arbitrary runs of
//! spaces (the normalizer replaces each filtered character with one space);
//! empty runs are skipped and never emitted.

use core::str;
use memchr::memchr_iter;

/// Tokenizes filtered input and emits `(text, position)` per token.
///
/// Position is `u32` and counts emitted tokens from zero. After emitting a
/// token at position `u32::MAX`, further emissions stop (overflow
/// protection).
#[inline(always)]
pub fn tokenize<'n, F>(filtered: &'n str, mut emit: F)
where
    F: FnMut(&'n str, u32),
{
    let bytes = filtered.as_bytes();

    if bytes.is_empty() {
        return;
    }

    let mut start = 0usize;
    let mut pos = 0u32;

    for i in memchr_iter(b' ', bytes) {
        if start < i {
            // SAFETY: `filtered` is valid UTF-8. We split only on ASCII space
            // (0x20), which is never a continuation byte, so `bytes[start..i]`
            // is always a valid UTF-8 subslice.
            let text = unsafe { str::from_utf8_unchecked(&bytes[start..i]) };
            emit(text, pos);
            if pos == u32::MAX {
                return;
            }
            pos += 1;
        }
        start = i + 1;
    }

    if start < bytes.len() {
        // SAFETY: same invariants as above — `bytes[start..]` is a valid
        // UTF-8 subslice since `start` was set to `i + 1` after an ASCII
        // space byte.
        let text = unsafe { str::from_utf8_unchecked(&bytes[start..]) };
        emit(text, pos);
    }
}
