#![deny(missing_docs)]

//! # Identifier Naming
//!
//! Converts snake-cased catalog identifiers into the two identifier shapes
//! emitted code needs: Pascal case for type names and snake case for
//! function and argument names.
//!
//! Both transforms treat `_` as the only word boundary. General-purpose case
//! converters also fold on case transitions, which would rename caseful
//! catalog identifiers; catalog names must map predictably, so the split is
//! done directly here.

/// Converts a snake-cased identifier into Pascal case.
///
/// Splits on `_`, upper-cases the first character of each segment,
/// lower-cases the remainder, and concatenates with no separator. Empty
/// segments (consecutive underscores) contribute nothing. Total over any
/// input: a string with no underscores yields a capitalized-first-letter
/// transform of itself, and `""` yields `""`.
pub fn to_pascal_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for segment in raw.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
        }
    }
    out
}

/// Converts an identifier into snake case.
///
/// Lower-cases each `_`-separated segment and rejoins with a single `_`,
/// dropping empty segments so consecutive underscores collapse.
pub fn to_snake_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for segment in raw.split('_') {
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('_');
        }
        for c in segment.chars() {
            out.extend(c.to_lowercase());
        }
    }
    out
}
