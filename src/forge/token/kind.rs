//! Token kinds
//!
//!     Every token in the tree carries a [`TokenKind`]. Kinds come in three layers:
//!
//!     Atomic kinds:
//!         One per structural character of the classification table, plus the `Char`
//!         fallback. Produced only by the classifier. See [classifier](crate::forge::lexing::classifier).
//!
//!     Merged kinds:
//!         Kinds that carry a pattern descriptor and are produced by the merge engine out of
//!         runs of finer tokens. See [patterns](crate::forge::patterns).
//!
//!     Structural kinds:
//!         Wrappers built by the discovery passes (groups, calls, loops) and by the sequence
//!         merge. They never carry a pattern.

use serde::{Deserialize, Serialize};

macro_rules! token_kinds {
    ($($(#[$meta:meta])* $name:ident,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum TokenKind {
            $($(#[$meta])* $name,)+
        }

        impl TokenKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$name,)+];
        }
    };
}

token_kinds! {
    // Atomic
    GraveAccent,
    Tilde,
    Exclamation,
    At,
    Hash,
    Dollar,
    Percent,
    Caret,
    Ampersand,
    Asterisk,
    LeftParenthesis,
    RightParenthesis,
    Minus,
    Underscore,
    Equal,
    Plus,
    LeftCurlyBracket,
    LeftSquareBracket,
    RightCurlyBracket,
    RightSquareBracket,
    Backslash,
    Pipe,
    Semicolon,
    Colon,
    SingleQuote,
    DoubleQuote,
    Comma,
    Period,
    LessThan,
    GreaterThan,
    Slash,
    Question,
    Space,
    CarriageReturn,
    LineFeed,
    /// Any character the classification table does not name.
    Char,

    // Merged
    /// A backslash and the character it escapes.
    EscapeSequence,
    /// A double-quoted string literal on a single line.
    Text,
    /// `#` up to the end of the line.
    Comment,
    Number,
    Word,
    /// `::`
    NamespaceSeparator,
    /// Words joined by namespace separators, e.g. `Units::Length::Metre`.
    NamespacePath,
    /// `loop`
    LoopKeyword,
    /// `over`
    BindingKeyword,
    Equality,
    Inequality,
    LessOrEqual,
    GreaterOrEqual,
    Arrow,
    Range,
    TensorOpen,
    TensorClose,
    /// `||`, opens and closes a norm group.
    NormDelimiter,
    /// A run of spaces and tabs.
    Spaces,
    NewLine,

    // Structural
    ParenthesisGroup,
    SquareBracketsGroup,
    CurlyBracketsGroup,
    AbsoluteGroup,
    NormGroup,
    TensorGroup,
    /// Identifier followed by a parenthesis group.
    ParenthesisCall,
    /// Identifier followed by a square-brackets group and optionally a parenthesis group.
    SequenceCall,
    /// One separator-delimited slice of a call's group.
    Parameter,
    LoopBody,
    LoopExpression,
    /// A `key: value` entry assembled by the sequence merge.
    Pair,
    Root,
}

/// Which layer of the token model a kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindLayer {
    Atomic,
    Merged,
    Structural,
}

impl TokenKind {
    /// Dense index of the kind, usable for per-kind tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn layer(self) -> KindLayer {
        if self <= TokenKind::Char {
            KindLayer::Atomic
        } else if self <= TokenKind::NewLine {
            KindLayer::Merged
        } else {
            KindLayer::Structural
        }
    }

    pub fn is_atomic(self) -> bool {
        self.layer() == KindLayer::Atomic
    }

    /// Whitespace that may sit between tokens without changing meaning.
    pub fn is_whitespace(self) -> bool {
        matches!(
            self,
            TokenKind::Space
                | TokenKind::Spaces
                | TokenKind::CarriageReturn
                | TokenKind::LineFeed
                | TokenKind::NewLine
        )
    }

    /// Spaces and tabs only, never line breaks.
    pub fn is_inline_whitespace(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Spaces)
    }

    /// Kinds that may head a call.
    pub fn is_identifier(self) -> bool {
        matches!(self, TokenKind::Word | TokenKind::NamespacePath)
    }

    pub fn is_group(self) -> bool {
        matches!(
            self,
            TokenKind::ParenthesisGroup
                | TokenKind::SquareBracketsGroup
                | TokenKind::CurlyBracketsGroup
                | TokenKind::AbsoluteGroup
                | TokenKind::NormGroup
                | TokenKind::TensorGroup
        )
    }

    pub fn is_call(self) -> bool {
        matches!(self, TokenKind::ParenthesisCall | TokenKind::SequenceCall)
    }
}
