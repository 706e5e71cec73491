//! Window title normalization.
//!
//! Titles usually follow the "Document - Application" convention, so the
//! trailing segment after the last delimiter identifies the application and
//! keeps the number of distinct keys in the counter small.

/// Delimiter used to split window titles into segments.
pub const DEFAULT_DELIMITER: char = '-';

/// Remove leading and trailing ASCII whitespace.
///
/// The whitespace set is the locale-independent one: space, `\t`, `\n`,
/// vertical tab, form feed and `\r`.
pub fn trim(title: &str) -> &str {
    title.trim_matches(is_ascii_space)
}

/// Return the last segment of `title` split on `delimiter`.
///
/// A single trailing delimiter does not produce an empty final segment
/// (`"a-b-"` yields `"b"`). If the title has no inner delimiter the input
/// is returned unchanged.
pub fn last_segment(title: &str, delimiter: char) -> &str {
    let body = title.strip_suffix(delimiter).unwrap_or(title);
    match body.rsplit_once(delimiter) {
        Some((_, last)) => last,
        None => title,
    }
}

/// Reduce a raw title to the key stored in the activity counter.
///
/// An empty result means the tick carries no usable sample.
pub fn normalize_title(title: &str, delimiter: char) -> &str {
    trim(last_segment(title, delimiter))
}

fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
