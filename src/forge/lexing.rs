//! Atomic tokenization
//!
//! Turns source text into a flat sequence of one-character leaves, each carrying the kind
//! the [classifier] assigns to its character and its byte span in the source. This is the
//! only place tokens are created from text; every later pass regroups these leaves.

pub mod classifier;

pub use classifier::classify;

use crate::forge::token::{Token, TokenKind};

/// One leaf per character of `source`.
pub fn tokenize(source: &str) -> Vec<Token> {
    source
        .char_indices()
        .map(|(offset, c)| Token::leaf(classify(c), c.to_string(), offset))
        .collect()
}

/// [`tokenize`], wrapped in a [`TokenKind::Root`] token.
pub fn tokenize_tree(source: &str) -> Token {
    Token::node_at(TokenKind::Root, tokenize(source), 0)
}
