//! Tokenization stage
//!
//! Converts source text into a `Root` token holding one leaf per character.

use crate::forge::lexing::tokenize_tree;
use crate::forge::token::Token;
use crate::forge::transforms::{Runnable, TransformError};

/// Tokenization stage
///
/// # Input
/// - `String` - source text
///
/// # Output
/// - `Token` - a `Root` whose children are the classified characters
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Tokenization
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Token> for Tokenization {
    fn run(&self, input: String) -> Result<Token, TransformError> {
        Ok(tokenize_tree(&input))
    }
}

impl Runnable<&str, Token> for Tokenization {
    fn run(&self, input: &str) -> Result<Token, TransformError> {
        Ok(tokenize_tree(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::token::TokenKind;

    #[test]
    fn test_tokenization_wraps_root() {
        let root = Tokenization::new().run("ab".to_string()).unwrap();
        assert_eq!(root.kind(), TokenKind::Root);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.span(), 0..2);
    }

    #[test]
    fn test_tokenization_empty() {
        let root = Tokenization::new().run("").unwrap();
        assert!(root.children().is_empty());
        assert_eq!(root.text(), "");
    }
}
