//! Dictionary compilation.
//!
//! The dictionary format has two `%`-delimited sections:
//!
//! ```text
//! %
//! 1<TAB>posemo
//! 2<TAB>negemo
//! %
//! happy*<TAB>1
//! sad<TAB>2
//! ```
//!
//! The first block maps numeric category ids to names; the body maps
//! patterns to the ids of every category they belong to. Header lines
//! that fail to parse are skipped (real dictionary files carry stray
//! metadata there); any malformed body line aborts compilation.

use std::fs;
use std::path::Path;

use lexicount_types::{CategoryId, DictionaryEncoding, DictionaryError, Pattern, Profile};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::{Category, CompiledLexicon, PatternSet};

/// Line that toggles between the header and body sections.
const CATEGORY_DELIM: &str = "%";

/// Compiles the dictionary file at `path` under the given profile.
///
/// # Errors
///
/// Returns [`DictionaryError::Io`] when the file cannot be read or (for
/// strict-UTF-8 profiles) decoded, and the format errors documented on
/// [`DictionaryError`] for malformed content.
pub fn compile_lexicon<P: AsRef<Path>>(
    path: P,
    profile: &Profile,
) -> Result<CompiledLexicon, DictionaryError> {
    let raw = fs::read(path)?;
    let source = match profile.encoding {
        DictionaryEncoding::Utf8 => String::from_utf8(raw).map_err(|e| {
            DictionaryError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?,
        DictionaryEncoding::Utf8Lossy => String::from_utf8_lossy(&raw).into_owned(),
    };
    compile_lexicon_str(&source, profile)
}

/// Compiles dictionary source text directly (in-memory dictionaries,
/// tests). Same semantics as [`compile_lexicon`].
pub fn compile_lexicon_str(
    source: &str,
    profile: &Profile,
) -> Result<CompiledLexicon, DictionaryError> {
    let mut in_header = false;
    let mut id_to_name: FxHashMap<CategoryId, String> = FxHashMap::default();
    let mut sets: FxHashMap<String, PatternSet> = FxHashMap::default();
    let mut order: Vec<String> = Vec::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        // Leading tabs are structural (an empty pattern field must stay
        // visible); trailing whitespace, tabs included, is noise.
        let line = raw_line
            .trim_end()
            .trim_start_matches(|c: char| c == ' ' || c == '\r');

        if line == CATEGORY_DELIM {
            in_header = !in_header;
            continue;
        }

        if in_header {
            parse_header_line(line, &mut id_to_name);
        } else {
            if line.is_empty() {
                continue;
            }
            parse_body_line(
                line,
                line_no,
                profile,
                &id_to_name,
                &mut sets,
                &mut order,
            )?;
        }
    }

    if in_header {
        return Err(DictionaryError::UnterminatedHeader);
    }

    let categories: Vec<Category> = order
        .into_iter()
        .map(|name| {
            let patterns = sets.remove(&name).unwrap_or_default();
            Category::new(name, patterns)
        })
        .collect();

    let lexicon = CompiledLexicon::from_categories(categories);
    let stats = lexicon.stats();
    debug!(
        profile = profile.name,
        categories = stats.num_categories,
        patterns = stats.num_patterns,
        "compiled lexicon"
    );

    Ok(lexicon)
}

/// Header lines are `id<TAB>name [extra tokens ignored]`. Anything that
/// does not fit — wrong field count, non-integer id, empty name — is
/// skipped: header sections carry stray metadata lines by convention.
fn parse_header_line(line: &str, id_to_name: &mut FxHashMap<CategoryId, String>) {
    let fields: SmallVec<[&str; 2]> = line.split('\t').collect();
    if fields.len() != 2 {
        return;
    }
    let Ok(id) = fields[0].trim().parse::<CategoryId>() else {
        return;
    };
    let Some(name) = fields[1].split_whitespace().next() else {
        return;
    };
    // Later declarations win, as in the reference format.
    id_to_name.insert(id, name.to_string());
}

/// Body lines are `pattern<TAB>id1<TAB>id2...`. A line without ids is a
/// silent no-op (the pattern belongs to no category); everything else
/// malformed is fatal.
fn parse_body_line(
    line: &str,
    line_no: usize,
    profile: &Profile,
    id_to_name: &FxHashMap<CategoryId, String>,
    sets: &mut FxHashMap<String, PatternSet>,
    order: &mut Vec<String>,
) -> Result<(), DictionaryError> {
    let mut fields = line.split('\t');
    let pattern_text = fields.next().unwrap_or_default();

    let mut ids: SmallVec<[CategoryId; 8]> = SmallVec::new();
    for field in fields {
        let token = field.trim();
        let id = token
            .parse::<CategoryId>()
            .map_err(|_| DictionaryError::InvalidCategoryId {
                line: line_no,
                token: token.to_string(),
            })?;
        ids.push(id);
    }

    if ids.is_empty() {
        return Ok(());
    }
    if pattern_text.is_empty() {
        return Err(DictionaryError::EmptyPattern { line: line_no });
    }

    let pattern = Pattern::new(profile.prepare_pattern(pattern_text));

    for id in ids {
        let name = id_to_name
            .get(&id)
            .ok_or(DictionaryError::UnknownCategoryId { line: line_no, id })?;
        let set = sets.entry(name.clone()).or_insert_with(|| {
            order.push(name.clone());
            PatternSet::default()
        });
        set.insert(pattern.clone());
    }

    Ok(())
}
