//! Key/value record reader
//!
//! Reads a JSON-like table of numbers, such as a currency table:
//!
//!     {"USD": 1.0, "EUR": 0.92, "JPY": 151.3}
//!
//! Built from the same passes as everything else: the standard merges, group discovery,
//! then a fixed-sequence merge of `Text : Number` into `Pair` tokens. Entries are separated
//! by commas; whitespace and line breaks between them are ignored.

use crate::forge::error::StructureError;
use crate::forge::lexing::tokenize;
use crate::forge::token::{merge_sequence, trim, Token, TokenKind};
use crate::forge::transforms::groups::{discover_groups, STANDARD_GROUPS};
use crate::forge::transforms::merge::merge_all;
use crate::forge::transforms::standard::STANDARD_MERGE_ORDER;
use log::debug;
use serde::Serialize;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected a single {{ ... }} table")]
    MissingTable,
    #[error("malformed entry at {span:?}: expected \"key\": number")]
    MalformedEntry { span: Range<usize> },
    #[error("invalid number `{text}` at {span:?}")]
    InvalidNumber { text: String, span: Range<usize> },
    #[error(transparent)]
    Structure(#[from] StructureError),
}

const NEGATIVE_ENTRY: &[TokenKind] = &[
    TokenKind::Text,
    TokenKind::Colon,
    TokenKind::Minus,
    TokenKind::Number,
];
const ENTRY: &[TokenKind] = &[TokenKind::Text, TokenKind::Colon, TokenKind::Number];

/// Read every `"key": number` entry of the table in `source`, in document order.
pub fn read_records(source: &str) -> Result<Vec<Record>, RecordError> {
    let tokens = discover_groups(merge_all(tokenize(source), STANDARD_MERGE_ORDER), STANDARD_GROUPS)?;
    let table = match trim(&tokens) {
        [table] if table.kind() == TokenKind::CurlyBracketsGroup => table,
        _ => return Err(RecordError::MissingTable),
    };

    let children = table.children();
    let contents = children[1..children.len() - 1].to_vec();
    if trim(&contents).is_empty() {
        return Ok(Vec::new());
    }
    let contents = merge_sequence(contents, TokenKind::Pair, NEGATIVE_ENTRY);
    let contents = merge_sequence(contents, TokenKind::Pair, ENTRY);

    let records = contents
        .split(|t| t.kind() == TokenKind::Comma)
        .map(read_entry)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("read_records: {} record(s)", records.len());
    Ok(records)
}

fn read_entry(entry: &[Token]) -> Result<Record, RecordError> {
    let pair = match trim(entry) {
        [pair] if pair.kind() == TokenKind::Pair => pair,
        other => {
            let span = match (other.first(), other.last()) {
                (Some(first), Some(last)) => first.span().start..last.span().end,
                _ => entry.first().map_or(0..0, Token::span),
            };
            return Err(RecordError::MalformedEntry { span });
        }
    };

    let significant: Vec<&Token> = pair
        .children()
        .iter()
        .filter(|t| !t.kind().is_whitespace())
        .collect();
    let key = unquote(&significant[0].text());
    let number: String = significant[2..].iter().map(|t| t.text()).collect();
    let value = number
        .parse::<f64>()
        .map_err(|_| RecordError::InvalidNumber {
            text: number.clone(),
            span: significant[2].span().start..pair.span().end,
        })?;
    Ok(Record { key, value })
}

/// Strip the quotes of a string token and resolve its escapes.
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
