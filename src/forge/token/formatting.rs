//! Rendering token trees back to text
//!
//! Two renderings are provided:
//!
//! - [`detokenize`]: the source text a sequence covers. Because passes only regroup tokens,
//!   detokenizing the output of any pass reproduces its input exactly.
//! - [`to_treeviz`]: one line per token, nesting drawn with box connectors and an icon per
//!   kind of token:
//!
//! ```text
//! ⧉ Root f(a)
//! └─ ƒ ParenthesisCall f(a)
//!   ├─ ◦ Word "f"
//!   └─ ⊂ ParenthesisGroup (a)
//!     ├─ ◦ LeftParenthesis "("
//!     ├─ • Parameter a
//!     │ └─ ◦ Word "a"
//!     └─ ◦ RightParenthesis ")"
//! ```
//!
//! Icons
//!     Root: ⧉
//!     Groups: ⊂
//!     Calls: ƒ
//!     Parameter: •
//!     LoopBody, LoopExpression: ↻
//!     Pair: ⇄
//!     Other merged nodes: ≡
//!     Leaves: ◦

use super::kind::TokenKind;
use super::tree::Token;

/// The source text covered by `tokens`, in order.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    tokens.iter().for_each(|t| t.write_text(&mut out));
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(token: &Token) -> &'static str {
    let kind = token.kind();
    match kind {
        TokenKind::Root => "⧉",
        TokenKind::Parameter => "•",
        TokenKind::LoopBody | TokenKind::LoopExpression => "↻",
        TokenKind::Pair => "⇄",
        _ if kind.is_group() => "⊂",
        _ if kind.is_call() => "ƒ",
        _ if token.is_leaf() => "◦",
        _ => "≡",
    }
}

fn label(token: &Token) -> String {
    if token.is_leaf() {
        format!("{:?} {:?}", token.kind(), token.text())
    } else {
        let text = token.text().escape_debug().to_string();
        format!("{:?} {}", token.kind(), truncate(&text, 30))
    }
}

fn format_token(token: &Token, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    out.push_str(&format!("{}{} {} {}\n", prefix, connector, icon(token), label(token)));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(token.children(), &child_prefix, out);
}

fn format_children(children: &[Token], prefix: &str, out: &mut String) {
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_token(child, prefix, i + 1 == count, out);
    }
}

/// Render `token` and its subtree, one line per token.
pub fn to_treeviz(token: &Token) -> String {
    let mut out = format!("{} {}\n", icon(token), label(token));
    format_children(token.children(), "", &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detokenize_concatenates() {
        let tokens = vec![
            Token::leaf(TokenKind::Word, "ab", 0),
            Token::node(
                TokenKind::Parameter,
                vec![Token::leaf(TokenKind::Space, " ", 2), Token::leaf(TokenKind::Char, "c", 3)],
            ),
        ];
        assert_eq!(detokenize(&tokens), "ab c");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_treeviz_escapes_line_breaks() {
        let root = Token::node(
            TokenKind::Root,
            vec![
                Token::leaf(TokenKind::Word, "a", 0),
                Token::leaf(TokenKind::NewLine, "\n", 1),
            ],
        );
        let rendered = to_treeviz(&root);
        assert_eq!(
            rendered,
            "⧉ Root a\\n\n├─ ◦ Word \"a\"\n└─ ◦ NewLine \"\\n\"\n"
        );
    }
}
