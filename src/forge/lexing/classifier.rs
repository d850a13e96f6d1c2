//! Atomic classifier
//!
//! The fixed character table every later merge rule starts from. Each structural or
//! punctuation character has its own kind; anything else (letters, digits, tabs, other
//! symbols) is [`TokenKind::Char`]. The table is total, so classification never fails.

use crate::forge::token::TokenKind;

/// The kind a one-character token of `c` starts out with.
pub fn classify(c: char) -> TokenKind {
    match c {
        '`' => TokenKind::GraveAccent,
        '~' => TokenKind::Tilde,
        '!' => TokenKind::Exclamation,
        '@' => TokenKind::At,
        '#' => TokenKind::Hash,
        '$' => TokenKind::Dollar,
        '%' => TokenKind::Percent,
        '^' => TokenKind::Caret,
        '&' => TokenKind::Ampersand,
        '*' => TokenKind::Asterisk,
        '(' => TokenKind::LeftParenthesis,
        ')' => TokenKind::RightParenthesis,
        '-' => TokenKind::Minus,
        '_' => TokenKind::Underscore,
        '=' => TokenKind::Equal,
        '+' => TokenKind::Plus,
        '{' => TokenKind::LeftCurlyBracket,
        '[' => TokenKind::LeftSquareBracket,
        '}' => TokenKind::RightCurlyBracket,
        ']' => TokenKind::RightSquareBracket,
        '\\' => TokenKind::Backslash,
        '|' => TokenKind::Pipe,
        ';' => TokenKind::Semicolon,
        ':' => TokenKind::Colon,
        '\'' => TokenKind::SingleQuote,
        '"' => TokenKind::DoubleQuote,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Period,
        '<' => TokenKind::LessThan,
        '>' => TokenKind::GreaterThan,
        '/' => TokenKind::Slash,
        '?' => TokenKind::Question,
        ' ' => TokenKind::Space,
        '\r' => TokenKind::CarriageReturn,
        '\n' => TokenKind::LineFeed,
        _ => TokenKind::Char,
    }
}
