//! Loop discovery
//!
//! Wraps `loop <expression> over <variable>` into a loop body:
//!
//!     LoopBody
//!     ├─ LoopKeyword      loop
//!     ├─ LoopExpression   <expression>
//!     ├─ BindingKeyword   over
//!     ├─ Spaces           (optional)
//!     └─ Word             <variable>
//!
//! The binding clause sits next to the expression, outside it but inside the body, so one
//! node carries the whole loop.
//!
//! A single forward pass per level. Instead of climbing parent pointers, the pass keeps a
//! stack of loops still waiting for their binding clause; tokens go into the expression of
//! the innermost open loop, or into the level itself when no loop is open. A binding closes
//! the innermost loop and the finished body is inserted one level up. This is what lets a
//! loop expression hold further loops on the same syntactic level:
//!
//!     loop loop a over b over c
//!
//! Loops never cross group boundaries: groups holding a loop keyword are processed as levels
//! of their own.

use crate::forge::error::StructureError;
use crate::forge::token::{Token, TokenKind};
use log::debug;

/// Discover loop bodies at every depth of `tokens`.
pub fn discover_loops(tokens: Vec<Token>) -> Result<Vec<Token>, StructureError> {
    let out = discover_level(tokens)?;
    debug!("discover_loops: {} top-level token(s)", out.len());
    Ok(out)
}

struct OpenLoop {
    keyword: Token,
    expression: Vec<Token>,
}

fn discover_level(tokens: Vec<Token>) -> Result<Vec<Token>, StructureError> {
    let tokens = tokens
        .into_iter()
        .map(descend)
        .collect::<Result<Vec<_>, _>>()?;

    let mut level = Vec::with_capacity(tokens.len());
    let mut open: Vec<OpenLoop> = Vec::new();
    let mut rest = tokens.into_iter().peekable();

    while let Some(token) = rest.next() {
        match token.kind() {
            TokenKind::LoopKeyword => open.push(OpenLoop {
                keyword: token,
                expression: Vec::new(),
            }),
            TokenKind::BindingKeyword => {
                let Some(OpenLoop {
                    keyword,
                    expression,
                }) = open.pop()
                else {
                    return Err(StructureError::BindingOutsideLoop { span: token.span() });
                };
                let span = token.span();
                let at = keyword.span().end;
                let mut children = vec![
                    keyword,
                    Token::node_at(TokenKind::LoopExpression, expression, at),
                    token,
                ];
                while let Some(gap) = rest.next_if(|t| t.kind().is_inline_whitespace()) {
                    children.push(gap);
                }
                let variable = rest
                    .next_if(|t| t.kind() == TokenKind::Word)
                    .ok_or(StructureError::MissingLoopVariable { span })?;
                children.push(variable);
                insert(&mut open, &mut level, Token::node(TokenKind::LoopBody, children));
            }
            _ => insert(&mut open, &mut level, token),
        }
    }

    match open.pop() {
        Some(unclosed) => Err(StructureError::UnclosedLoop {
            span: unclosed.keyword.span(),
        }),
        None => Ok(level),
    }
}

fn insert(open: &mut [OpenLoop], level: &mut Vec<Token>, token: Token) {
    match open.last_mut() {
        Some(innermost) => innermost.expression.push(token),
        None => level.push(token),
    }
}

fn descend(token: Token) -> Result<Token, StructureError> {
    if !token.contains_kind(TokenKind::LoopKeyword) {
        return Ok(token);
    }
    if token.kind() == TokenKind::LoopBody {
        return token.try_map_children(|children| {
            children
                .into_iter()
                .map(|child| match child.kind() {
                    TokenKind::LoopExpression => child.try_map_children(discover_level),
                    _ => Ok(child),
                })
                .collect()
        });
    }
    token.try_map_children(discover_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::lexing::tokenize;
    use crate::forge::token::detokenize;
    use crate::forge::transforms::groups::{discover_groups, STANDARD_GROUPS};
    use crate::forge::transforms::merge::merge_all;
    use crate::forge::transforms::standard::STANDARD_MERGE_ORDER;

    fn prepare(source: &str) -> Vec<Token> {
        let merged = merge_all(tokenize(source), STANDARD_MERGE_ORDER);
        discover_groups(merged, STANDARD_GROUPS).unwrap()
    }

    fn loops(source: &str) -> Result<Vec<Token>, StructureError> {
        discover_loops(prepare(source))
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_simple_loop() {
        let tokens = loops("loop x^2 over x").unwrap();
        assert_eq!(tokens.len(), 1);
        let body = &tokens[0];
        assert_eq!(body.kind(), TokenKind::LoopBody);
        assert_eq!(
            kinds(body.children()),
            vec![
                TokenKind::LoopKeyword,
                TokenKind::LoopExpression,
                TokenKind::BindingKeyword,
                TokenKind::Spaces,
                TokenKind::Word
            ]
        );
        assert_eq!(body.children()[1].text(), " x^2 ");
        assert_eq!(body.children()[4].text(), "x");
    }

    #[test]
    fn test_tokens_around_loop_stay_on_level() {
        let tokens = loops("y = loop i over i + 1").unwrap();
        let body = tokens
            .iter()
            .position(|t| t.kind() == TokenKind::LoopBody)
            .unwrap();
        assert_eq!(detokenize(&tokens[..body]), "y = ");
        assert_eq!(detokenize(&tokens[body + 1..]), " + 1");
    }

    #[test]
    fn test_same_level_nesting() {
        let tokens = loops("loop loop a over b over c").unwrap();
        assert_eq!(tokens.len(), 1);
        let outer = &tokens[0];
        assert_eq!(outer.children().last().unwrap().text(), "c");
        let expression = &outer.children()[1];
        assert!(expression
            .children()
            .iter()
            .any(|t| t.kind() == TokenKind::LoopBody && t.text() == "loop a over b"));
    }

    #[test]
    fn test_loop_inside_group() {
        let tokens = loops("f(loop a over b)").unwrap();
        assert!(tokens.iter().any(|t| t.contains_kind(TokenKind::LoopBody)));
    }

    #[test]
    fn test_binding_outside_loop() {
        assert_eq!(
            loops("x over y").unwrap_err(),
            StructureError::BindingOutsideLoop { span: 2..6 }
        );
    }

    #[test]
    fn test_missing_variable() {
        assert_eq!(
            loops("loop a over 1").unwrap_err(),
            StructureError::MissingLoopVariable { span: 7..11 }
        );
        assert!(matches!(
            loops("loop a over").unwrap_err(),
            StructureError::MissingLoopVariable { .. }
        ));
    }

    #[test]
    fn test_unclosed_loop() {
        assert_eq!(
            loops("loop a").unwrap_err(),
            StructureError::UnclosedLoop { span: 0..4 }
        );
    }

    #[test]
    fn test_loop_does_not_cross_group() {
        assert!(matches!(
            loops("(loop a) over b").unwrap_err(),
            StructureError::UnclosedLoop { .. }
        ));
    }

    #[test]
    fn test_rediscovery_is_stable() {
        let once = loops("loop (loop a over b) over c").unwrap();
        let twice = discover_loops(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_text_is_conserved() {
        let source = "s = loop f(k) * loop k over j over k\n";
        assert_eq!(detokenize(&loops(source).unwrap()), source);
    }
}
