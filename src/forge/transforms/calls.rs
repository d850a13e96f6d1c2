//! Call discovery
//!
//! Turns "identifier immediately followed by a group" into call tokens:
//!
//!     f(a, b)      ParenthesisCall [Word f, ParenthesisGroup]
//!     S[2, 3]      SequenceCall    [Word S, SquareBracketsGroup]
//!     S[2, 3](4)   SequenceCall    [Word S, SquareBracketsGroup, ParenthesisGroup]
//!
//! The group of a call keeps its delimiters; its contents are split on the separator into
//! `Parameter` nodes, so a call group reads `[open, Parameter, Comma, Parameter, ..., close]`.
//! A parameter is whatever subtree sat between two separators, never re-merged into a scalar.
//!
//! The pass is depth first: any token whose subtree holds a group is processed before the
//! level it sits on, so inner calls resolve before outer ones. Heads listed in the ignore set
//! (reserved words such as `if`) are never treated as calls.

use super::groups::{GroupDescriptor, PARENTHESIS, SQUARE_BRACKETS};
use crate::forge::token::{trim, Token, TokenKind};
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A call kind, the group shape that follows its head, and the parameter separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallDescriptor {
    pub kind: TokenKind,
    pub group: GroupDescriptor,
    pub separator: TokenKind,
}

pub const PARENTHESIS_CALL: CallDescriptor = CallDescriptor {
    kind: TokenKind::ParenthesisCall,
    group: PARENTHESIS,
    separator: TokenKind::Comma,
};

pub const SEQUENCE_CALL: CallDescriptor = CallDescriptor {
    kind: TokenKind::SequenceCall,
    group: SQUARE_BRACKETS,
    separator: TokenKind::Comma,
};

/// How call heads are compared against the ignore set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a == b || a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Policy supplied by the language layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub case: CaseSensitivity,
    pub ignore: Vec<String>,
}

impl CallOptions {
    pub fn new(case: CaseSensitivity) -> Self {
        CallOptions {
            case,
            ignore: Vec::new(),
        }
    }

    pub fn with_ignored<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|word| self.case.equals(word, name))
    }
}

/// Discover calls at every depth of `tokens`.
pub fn discover_calls(tokens: Vec<Token>, options: &CallOptions) -> Vec<Token> {
    let out = discover_level(tokens, options);
    debug!("discover_calls: {} top-level token(s)", out.len());
    out
}

fn discover_level(tokens: Vec<Token>, options: &CallOptions) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut rest = tokens
        .into_iter()
        .map(|token| descend(token, options))
        .peekable();

    while let Some(token) = rest.next() {
        if !is_head(&token, options) {
            out.push(token);
            continue;
        }

        if let Some(group) = rest.next_if(|t| t.kind() == PARENTHESIS_CALL.group.kind) {
            let params = split_parameters(group, PARENTHESIS_CALL.separator);
            out.push(Token::node(PARENTHESIS_CALL.kind, vec![token, params]));
        } else if let Some(group) = rest.next_if(|t| t.kind() == SEQUENCE_CALL.group.kind) {
            let mut children = vec![token, split_parameters(group, SEQUENCE_CALL.separator)];
            if let Some(trailing) = rest.next_if(|t| t.kind() == PARENTHESIS_CALL.group.kind) {
                children.push(split_parameters(trailing, PARENTHESIS_CALL.separator));
            }
            out.push(Token::node(SEQUENCE_CALL.kind, children));
        } else {
            out.push(token);
        }
    }
    out
}

fn is_head(token: &Token, options: &CallOptions) -> bool {
    token.kind().is_identifier() && !options.is_ignored(&token.text())
}

fn descend(token: Token, options: &CallOptions) -> Token {
    if !token.contains(|t| t.kind().is_group()) {
        return token;
    }
    if token.kind().is_call() {
        // Head and groups are settled; only what sits inside the groups may still hold calls.
        return token.map_children(|children| {
            children
                .into_iter()
                .map(|child| child.map_children(|inner| discover_level(inner, options)))
                .collect()
        });
    }
    token.map_children(|children| discover_level(children, options))
}

/// Reshape `[open, ..., close]` into `[open, Parameter, separator, Parameter, ..., close]`.
///
/// Empty contents give no parameters; an empty slot between separators gives an empty
/// `Parameter` positioned where the slot is.
fn split_parameters(group: Token, separator: TokenKind) -> Token {
    group.map_children(|mut contents| {
        if contents.len() < 2 {
            return contents;
        }
        let Some(close) = contents.pop() else {
            return contents;
        };
        let open = contents.remove(0);

        let mut out = Vec::with_capacity(contents.len() + 2);
        let mut at = open.span().end;
        out.push(open);
        if !contents.is_empty() {
            let mut slot = Vec::new();
            for token in contents {
                if token.kind() == separator {
                    out.push(Token::node_at(TokenKind::Parameter, std::mem::take(&mut slot), at));
                    at = token.span().end;
                    out.push(token);
                } else {
                    slot.push(token);
                }
            }
            out.push(Token::node_at(TokenKind::Parameter, slot, at));
        }
        out.push(close);
        out
    })
}

/// Read access to a discovered call token.
#[derive(Debug, Clone, Copy)]
pub struct CallView<'a> {
    token: &'a Token,
}

impl<'a> CallView<'a> {
    /// `None` unless `token` is a call.
    pub fn new(token: &'a Token) -> Option<Self> {
        token.kind().is_call().then_some(CallView { token })
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    pub fn head(&self) -> &'a Token {
        &self.token.children()[0]
    }

    pub fn name(&self) -> Cow<'a, str> {
        self.head().text()
    }

    /// One entry per parameter group, each parameter trimmed of surrounding whitespace.
    pub fn parameter_lists(&self) -> Vec<Vec<&'a [Token]>> {
        self.token.children()[1..]
            .iter()
            .map(|group| {
                group
                    .children()
                    .iter()
                    .filter(|t| t.kind() == TokenKind::Parameter)
                    .map(|p| trim(p.children()))
                    .collect()
            })
            .collect()
    }
}
