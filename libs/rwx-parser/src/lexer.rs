//! # Line Lexing Utilities
//!
//! Comment stripping and shared numeric-argument parsing. Numeric
//! literals accept an optional sign, integer or decimal form, and an
//! optional exponent; anything else makes the whole statement a silent
//! non-match.

/// Strips the trailing comment from a line.
///
/// A comment begins at the first `#` not immediately followed by `!`;
/// the `#!` escape keeps directives visible to downstream consumers.
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && bytes.get(i + 1) != Some(&b'!') {
            return &line[..i];
        }
    }
    line
}

/// Splits a statement into whitespace-separated fields, treating tabs as
/// spaces.
pub fn fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ' ' || c == '\t')
        .filter(|f| !f.is_empty())
        .collect()
}

/// Parses exactly `N` consecutive floats from the front of `args`.
pub fn parse_floats<const N: usize>(args: &[&str]) -> Option<[f32; N]> {
    if args.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse::<f32>().ok()?;
    }
    Some(out)
}

/// Parses exactly `N` consecutive one-based vertex indices, converting
/// them to zero-based.
pub fn parse_indices<const N: usize>(args: &[&str]) -> Option<[u32; N]> {
    if args.len() < N {
        return None;
    }
    let mut out = [0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        let one_based = arg.parse::<u32>().ok()?;
        *slot = one_based.checked_sub(1)?;
    }
    Some(out)
}

/// Parses an optional trailing `tag N` pair starting at `args[0]`.
///
/// Returns `Some(None)` when no tag is present, `Some(Some(n))` for a
/// well-formed tag, and `None` when the tag keyword appears without a
/// parsable value.
pub fn parse_trailing_tag(args: &[&str]) -> Option<Option<u32>> {
    match args.first() {
        Some(word) if word.eq_ignore_ascii_case("tag") => {
            let value = args.get(1)?.parse::<u32>().ok()?;
            Some(Some(value))
        }
        _ => Some(None),
    }
}
