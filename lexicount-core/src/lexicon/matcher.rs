//! Token-granular pattern matching.
//!
//! Every dictionary pattern carries a token boundary on both sides, so a
//! match is always a whole token (or a consecutive window of tokens for
//! patterns containing spaces). That reduces the alternation engine of
//! the dictionary format to three token tests:
//!
//! - literal text → exact token equality
//! - `stem*` (trailing wildcard) → token prefix test, answered by an
//!   anchored Aho-Corasick automaton over all stems of the set
//! - `*` followed by more text in the same token → unmatchable: the
//!   boundary injected right after a wildcard expansion can never be
//!   followed by non-space text (such dead patterns exist in real
//!   dictionaries and are compiled but never match)
//!
//! Tie-breaking is longest-match-wins at each position, scanning left to
//! right without overlap. This is deterministic where the original
//! alternation order was not; coverage counts are unaffected because
//! every match consumes whole tokens.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, Anchored, Input, MatchKind, StartKind};
use lexicount_types::Pattern;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// One per-token test parsed from a pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Token must equal the text exactly.
    Exact(String),
    /// Token must start with the stem.
    Prefix(String),
    /// Bare `*`: any token.
    Any,
}

impl Segment {
    #[inline(always)]
    fn matches(&self, token: &str) -> bool {
        match self {
            Segment::Exact(text) => token == text,
            Segment::Prefix(stem) => token.starts_with(stem.as_str()),
            Segment::Any => true,
        }
    }
}

/// A multi-token pattern: consecutive tokens matched segment by segment.
#[derive(Debug, Clone)]
struct WindowPattern {
    segments: SmallVec<[Segment; 2]>,
}

/// Compiled matcher for one pattern set (a category, or a dominant-class
/// union). Immutable after construction.
#[derive(Debug)]
pub struct TokenMatcher {
    exact: FxHashSet<String>,
    stems: Vec<String>,
    stem_ac: Option<AhoCorasick>,
    match_all: bool,
    windows: Vec<WindowPattern>,
}

impl TokenMatcher {
    /// Builds a matcher over a deduplicated pattern slice.
    ///
    /// Unmatchable patterns are accepted and simply never match.
    pub fn build(patterns: &[Pattern]) -> Self {
        let mut exact = FxHashSet::default();
        let mut stems: Vec<String> = Vec::new();
        let mut match_all = false;
        let mut windows = Vec::new();

        for pattern in patterns {
            let Some(segments) = parse_segments(pattern.text()) else {
                continue;
            };

            if segments.len() == 1 {
                match segments.into_iter().next() {
                    Some(Segment::Exact(text)) => {
                        exact.insert(text);
                    }
                    Some(Segment::Prefix(stem)) => stems.push(stem),
                    Some(Segment::Any) => match_all = true,
                    None => unreachable!(),
                }
            } else {
                windows.push(WindowPattern { segments });
            }
        }

        stems.sort_unstable();
        stems.dedup();

        // Anchored automaton: any hit means some stem prefixes the token.
        // On the (size-limit) failure path we keep the stems and fall back
        // to a linear scan.
        let stem_ac = if stems.is_empty() {
            None
        } else {
            AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostLongest)
                .start_kind(StartKind::Anchored)
                .build(&stems)
                .ok()
        };

        Self {
            exact,
            stems,
            stem_ac,
            match_all,
            windows,
        }
    }

    /// True when no pattern in the set can ever match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.match_all && self.exact.is_empty() && self.stems.is_empty() && self.windows.is_empty()
    }

    #[inline(always)]
    fn matches_token(&self, token: &str) -> bool {
        if self.match_all || self.exact.contains(token) {
            return true;
        }
        if let Some(ac) = &self.stem_ac {
            ac.find(Input::new(token).anchored(Anchored::Yes)).is_some()
        } else {
            self.stems.iter().any(|s| token.starts_with(s.as_str()))
        }
    }

    #[inline(always)]
    fn window_matches(window: &WindowPattern, tokens: &[String], at: usize) -> bool {
        if at + window.segments.len() > tokens.len() {
            return false;
        }
        window
            .segments
            .iter()
            .zip(&tokens[at..])
            .all(|(segment, token)| segment.matches(token))
    }

    /// Finds all non-overlapping matches, left to right, longest window
    /// first at each position. Returns the matched tokens in order of
    /// first occurrence, one entry per consumed token.
    pub fn find_matches(&self, tokens: &[String]) -> Vec<String> {
        let mut matched = Vec::new();
        let mut i = 0usize;

        while i < tokens.len() {
            let mut best = 0usize;
            for window in &self.windows {
                let len = window.segments.len();
                if len > best && Self::window_matches(window, tokens, i) {
                    best = len;
                }
            }
            if best == 0 && self.matches_token(&tokens[i]) {
                best = 1;
            }

            if best > 0 {
                matched.extend(tokens[i..i + best].iter().cloned());
                i += best;
            } else {
                i += 1;
            }
        }

        matched
    }

    /// Coverage of a non-empty token sequence: matched tokens over total.
    ///
    /// The ratio is bounded by 1 by construction (non-overlapping whole
    /// token consumption); a violation is a matcher defect, not a
    /// recoverable condition.
    pub fn coverage(&self, tokens: &[String]) -> (f64, Vec<String>) {
        let matched = self.find_matches(tokens);
        let coverage = matched.len() as f64 / tokens.len() as f64;
        debug_assert!(
            coverage <= 1.0,
            "coverage invariant violated: {} matched of {} tokens",
            matched.len(),
            tokens.len()
        );
        (coverage, matched)
    }
}

/// Parses escaped pattern text into per-token segments.
///
/// Returns `None` for unmatchable patterns: a wildcard with trailing
/// literal text in the same token, or an empty token segment (doubled,
/// leading or trailing spaces — the single-spaced matching text can
/// never satisfy those).
fn parse_segments(text: &str) -> Option<SmallVec<[Segment; 2]>> {
    #[derive(PartialEq)]
    enum Item {
        Lit(char),
        Star,
    }

    let mut segments: SmallVec<[Segment; 2]> = SmallVec::new();
    let mut items: Vec<Item> = Vec::new();

    let mut flush = |items: &mut Vec<Item>| -> Option<Segment> {
        let first_star = items.iter().position(|i| *i == Item::Star);
        let segment = match first_star {
            None => {
                if items.is_empty() {
                    return None;
                }
                let lit: String = items
                    .iter()
                    .map(|i| match i {
                        Item::Lit(c) => *c,
                        Item::Star => unreachable!(),
                    })
                    .collect();
                Segment::Exact(lit)
            }
            Some(pos) => {
                // Everything after the first star must also be a star:
                // the boundary injected after a wildcard expansion kills
                // any further literal text in this token.
                if items[pos..].iter().any(|i| *i != Item::Star) {
                    items.clear();
                    return None;
                }
                if pos == 0 {
                    Segment::Any
                } else {
                    let stem: String = items[..pos]
                        .iter()
                        .map(|i| match i {
                            Item::Lit(c) => *c,
                            Item::Star => unreachable!(),
                        })
                        .collect();
                    Segment::Prefix(stem)
                }
            }
        };
        items.clear();
        Some(segment)
    };

    let mut dead = false;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => items.push(Item::Lit(escaped)),
                // Trailing lone backslash: literal.
                None => items.push(Item::Lit('\\')),
            },
            '*' => items.push(Item::Star),
            ' ' => match flush(&mut items) {
                Some(segment) => segments.push(segment),
                None => dead = true,
            },
            _ => items.push(Item::Lit(c)),
        }
        if dead {
            return None;
        }
    }

    match flush(&mut items) {
        Some(segment) => segments.push(segment),
        None => return None,
    }

    Some(segments)
}
