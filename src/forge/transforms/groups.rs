//! Group discovery
//!
//! Pairs open and close delimiter tokens into group tokens. Every group comes out as
//! `[open, ...contents, close]`, with its contents already grouped.
//!
//! The pass is a recursive descent over one level. On an open delimiter it scans forward for
//! the close at the same depth, counting only opens and closes of that same descriptor, then
//! groups the span in between and wraps it. Descriptors whose open and close kind are the
//! same (absolute value bars) cannot nest: the next occurrence always closes.
//!
//! An open with no close, or a close with no open, fails the whole pass.

use crate::forge::error::StructureError;
use crate::forge::token::{Token, TokenKind};
use log::debug;

/// A group kind and the delimiter kinds that bound it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDescriptor {
    pub kind: TokenKind,
    pub open: TokenKind,
    pub close: TokenKind,
}

impl GroupDescriptor {
    pub const fn new(kind: TokenKind, open: TokenKind, close: TokenKind) -> Self {
        GroupDescriptor { kind, open, close }
    }
}

pub const PARENTHESIS: GroupDescriptor = GroupDescriptor::new(
    TokenKind::ParenthesisGroup,
    TokenKind::LeftParenthesis,
    TokenKind::RightParenthesis,
);

pub const SQUARE_BRACKETS: GroupDescriptor = GroupDescriptor::new(
    TokenKind::SquareBracketsGroup,
    TokenKind::LeftSquareBracket,
    TokenKind::RightSquareBracket,
);

pub const CURLY_BRACKETS: GroupDescriptor = GroupDescriptor::new(
    TokenKind::CurlyBracketsGroup,
    TokenKind::LeftCurlyBracket,
    TokenKind::RightCurlyBracket,
);

pub const ABSOLUTE: GroupDescriptor =
    GroupDescriptor::new(TokenKind::AbsoluteGroup, TokenKind::Pipe, TokenKind::Pipe);

pub const NORM: GroupDescriptor = GroupDescriptor::new(
    TokenKind::NormGroup,
    TokenKind::NormDelimiter,
    TokenKind::NormDelimiter,
);

pub const TENSOR: GroupDescriptor = GroupDescriptor::new(
    TokenKind::TensorGroup,
    TokenKind::TensorOpen,
    TokenKind::TensorClose,
);

/// Every group the standard pipeline discovers.
pub const STANDARD_GROUPS: &[GroupDescriptor] =
    &[PARENTHESIS, SQUARE_BRACKETS, CURLY_BRACKETS, ABSOLUTE, NORM, TENSOR];

/// Group `tokens` by the given descriptors.
pub fn discover_groups(
    tokens: Vec<Token>,
    groups: &[GroupDescriptor],
) -> Result<Vec<Token>, StructureError> {
    let before = tokens.len();
    let out = discover_level(tokens, groups)?;
    debug!(
        "discover_groups: {} token(s) -> {} token(s)",
        before,
        out.len()
    );
    Ok(out)
}

fn opened_by(token: &Token, groups: &[GroupDescriptor]) -> Option<GroupDescriptor> {
    groups.iter().copied().find(|g| g.open == token.kind())
}

fn closed_by(token: &Token, groups: &[GroupDescriptor]) -> Option<GroupDescriptor> {
    groups.iter().copied().find(|g| g.close == token.kind())
}

fn discover_level(
    tokens: Vec<Token>,
    groups: &[GroupDescriptor],
) -> Result<Vec<Token>, StructureError> {
    let mut slots: Vec<Option<Token>> = tokens.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(slots.len());
    let mut i = 0;

    while i < slots.len() {
        let Some(token) = slots[i].take() else {
            i += 1;
            continue;
        };

        if let Some(group) = opened_by(&token, groups) {
            let close = matching_close(&slots, i, group).ok_or_else(|| {
                StructureError::UnmatchedOpen {
                    delimiter: token.kind(),
                    span: token.span(),
                }
            })?;
            let inner: Vec<Token> = slots[i + 1..close]
                .iter_mut()
                .filter_map(Option::take)
                .collect();
            let closing = slots[close].take();

            let mut children = Vec::with_capacity(inner.len() + 2);
            children.push(token);
            children.extend(discover_level(inner, groups)?);
            children.extend(closing);
            out.push(Token::node(group.kind, children));
            i = close + 1;
            continue;
        }

        if let Some(group) = closed_by(&token, groups) {
            return Err(StructureError::UnmatchedClose {
                delimiter: group.close,
                span: token.span(),
            });
        }

        out.push(token);
        i += 1;
    }

    Ok(out)
}

/// Index of the close matching the open at `open`, counting nesting of `group` only.
fn matching_close(slots: &[Option<Token>], open: usize, group: GroupDescriptor) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, slot) in slots[open + 1..].iter().enumerate() {
        let Some(token) = slot else { continue };
        let kind = token.kind();
        if kind == group.close {
            if depth == 0 {
                return Some(open + 1 + offset);
            }
            depth -= 1;
        } else if kind == group.open {
            depth += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::lexing::tokenize;
    use crate::forge::token::detokenize;
    use crate::forge::transforms::merge::merge_all;

    fn group(source: &str) -> Result<Vec<Token>, StructureError> {
        discover_groups(tokenize(source), STANDARD_GROUPS)
    }

    #[test]
    fn test_nested_groups() {
        let tokens = group("(a,(b,c))").unwrap();
        assert_eq!(tokens.len(), 1);
        let outer = &tokens[0];
        assert_eq!(outer.kind(), TokenKind::ParenthesisGroup);
        let kinds: Vec<TokenKind> = outer.children().iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftParenthesis,
                TokenKind::Char,
                TokenKind::Comma,
                TokenKind::ParenthesisGroup,
                TokenKind::RightParenthesis
            ]
        );
        assert_eq!(outer.children()[3].text(), "(b,c)");
    }

    #[test]
    fn test_missing_close() {
        let err = group("(a,(b,c)").unwrap_err();
        assert_eq!(
            err,
            StructureError::UnmatchedOpen {
                delimiter: TokenKind::LeftParenthesis,
                span: 0..1
            }
        );
    }

    #[test]
    fn test_stray_close() {
        let err = group("a)").unwrap_err();
        assert_eq!(
            err,
            StructureError::UnmatchedClose {
                delimiter: TokenKind::RightParenthesis,
                span: 1..2
            }
        );
    }

    #[test]
    fn test_crossed_delimiters_fail() {
        assert!(group("([)]").is_err());
    }

    #[test]
    fn test_mixed_kinds() {
        let tokens = group("f[1]{x}(y)").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Char,
                TokenKind::SquareBracketsGroup,
                TokenKind::CurlyBracketsGroup,
                TokenKind::ParenthesisGroup
            ]
        );
    }

    #[test]
    fn test_absolute_bars_close_on_next_bar() {
        let tokens = group("|a|+|b|").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::AbsoluteGroup, TokenKind::Plus, TokenKind::AbsoluteGroup]
        );
    }

    #[test]
    fn test_norm_wins_over_absolute() {
        let merged = merge_all(tokenize("||v||"), &[TokenKind::NormDelimiter]);
        let tokens = discover_groups(merged, STANDARD_GROUPS).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::NormGroup);
        assert_eq!(tokens[0].children().len(), 3);
    }

    #[test]
    fn test_tensor_group() {
        let merged = merge_all(
            tokenize("<|1, 2|>"),
            &[TokenKind::TensorOpen, TokenKind::TensorClose],
        );
        let tokens = discover_groups(merged, STANDARD_GROUPS).unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::TensorGroup);
    }

    #[test]
    fn test_strings_are_opaque() {
        let merged = merge_all(tokenize("\"(\" + (a)"), &[TokenKind::Text]);
        let tokens = discover_groups(merged, STANDARD_GROUPS).unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Text);
        assert_eq!(tokens.last().unwrap().kind(), TokenKind::ParenthesisGroup);
    }

    #[test]
    fn test_only_requested_groups() {
        let tokens = discover_groups(tokenize("[(a)]"), &[PARENTHESIS]).unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftSquareBracket,
                TokenKind::ParenthesisGroup,
                TokenKind::RightSquareBracket
            ]
        );
    }

    #[test]
    fn test_text_is_conserved() {
        let source = "{a: [1, (2)], b: |x|}";
        assert_eq!(detokenize(&group(source).unwrap()), source);
    }
}
