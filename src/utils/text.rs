// src/utils/text.rs

//! Text helpers shared by the parsers.

use std::cmp::Ordering;

use crate::error::Result;

/// Decode bytes as UTF-8, dropping anything that is not valid.
pub fn decode_lossy(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, ""),
    }
}

/// Parse one comma separated record with double-quoted fields.
///
/// Whitespace around fields is ignored, so `"a", "b", 3` gives
/// `["a", "b", "3"]`. Inside quotes, `\"` is a literal quote.
pub fn csv_record(text: &str) -> Result<Vec<String>> {
    let normalized = strip_field_padding(text.trim());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .escape(Some(b'\\'))
        .trim(csv::Trim::All)
        .from_reader(normalized.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

#[derive(Clone, Copy)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    Escaped,
    AfterQuote,
}

/// Drop whitespace at the start of each field.
///
/// The reader only recognizes a quoted field when the quote is the field's
/// first byte, so `, "b"` has to become `,"b"`. Text inside quotes is kept.
fn strip_field_padding(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = FieldState::Start;

    for ch in text.chars() {
        state = match (state, ch) {
            (FieldState::Start, c) if c.is_whitespace() => continue,
            (FieldState::Start | FieldState::AfterQuote, '"') => FieldState::Quoted,
            (FieldState::Start | FieldState::Unquoted | FieldState::AfterQuote, ',') => {
                FieldState::Start
            }
            (FieldState::Start | FieldState::Unquoted | FieldState::AfterQuote, _) => {
                FieldState::Unquoted
            }
            (FieldState::Quoted, '\\') => FieldState::Escaped,
            (FieldState::Quoted, '"') => FieldState::AfterQuote,
            (FieldState::Quoted, _) | (FieldState::Escaped, _) => FieldState::Quoted,
        };
        out.push(ch);
    }
    out
}

/// Lowercase everything, then uppercase the first letter of each word.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if word_start {
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
        word_start = ch.is_whitespace();
    }
    result
}

/// Split on `sep` where it is not nested inside parentheses.
///
/// Chunks are trimmed of spaces and separators; empty chunks are dropped.
pub fn split_outside_brackets(text: &str, sep: char) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut depth = 0usize;
    let mut chunk_start = 0;

    for (index, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                chunks.push(&text[chunk_start..index]);
                chunk_start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    chunks.push(&text[chunk_start..]);

    chunks
        .into_iter()
        .map(|chunk| chunk.trim_matches(|c: char| c == sep || c == ' '))
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ASCII case-insensitive ordering.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}
