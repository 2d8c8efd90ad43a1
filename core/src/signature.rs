#![deny(missing_docs)]

//! # Signature Parsing
//!
//! Recovers the ordered parameter-name list from a routine's raw
//! `CREATE PROCEDURE` text.
//!
//! This is a syntactic extraction, not a SQL grammar: the parenthesized
//! parameter list after the `PROCEDURE` keyword is sliced out with a
//! depth-counting scan and split on commas. A nested type such as
//! `DECIMAL(10,2)` therefore produces a residue fragment (`2)`) that has too
//! few tokens to carry a name and is skipped, so surrounding parameters
//! survive. Direction keywords (`IN`/`OUT`/`INOUT`) are never taken as
//! names; a clause with no separable name yields nothing for that slot.

use regex::Regex;
use std::sync::OnceLock;

/// Extracts the ordered parameter names from a procedure definition.
///
/// Returns an empty list when the text has no `PROCEDURE` keyword (commonly
/// because the catalog withheld the definition), when the parameter list is
/// absent or empty, or when no clause carries a separable name.
pub fn parse_parameters(definition: &str) -> Vec<String> {
    let mut params = Vec::new();

    let Some(start) = procedure_keyword_end(definition) else {
        return params;
    };

    let tail = &definition[start..];
    let Some(open) = tail.find('(') else {
        return params;
    };
    let Some(inner) = balanced_parenthesized(&tail[open..]) else {
        return params;
    };

    let inner = inner.trim();
    if inner.is_empty() {
        return params;
    }

    for clause in inner.split(',') {
        let tokens: Vec<&str> = clause.split_whitespace().collect();
        if tokens.len() < 2 {
            continue;
        }
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 && !is_direction_keyword(token) {
                params.push((*token).to_string());
                break;
            }
        }
    }

    params
}

/// Byte offset just past the first case-insensitive `PROCEDURE` keyword.
fn procedure_keyword_end(text: &str) -> Option<usize> {
    static KEYWORD: OnceLock<Regex> = OnceLock::new();
    let keyword = KEYWORD.get_or_init(|| Regex::new(r"(?i)\bprocedure\b").expect("Invalid regex"));
    keyword.find(text).map(|m| m.end())
}

/// Slices the content between the opening parenthesis at the start of
/// `text` and its matching close, tracking nesting depth.
fn balanced_parenthesized(text: &str) -> Option<&str> {
    debug_assert!(text.starts_with('('));
    let mut depth = 0usize;
    for (offset, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[1..offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_direction_keyword(token: &str) -> bool {
    token.eq_ignore_ascii_case("IN")
        || token.eq_ignore_ascii_case("OUT")
        || token.eq_ignore_ascii_case("INOUT")
}
