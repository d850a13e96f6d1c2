//! The token tree
//!
//!     A [`Token`] is a node of an ordered, rooted, n-ary tree. Leaves own the source text
//!     they were classified from; a non-leaf's text is always the concatenation of its
//!     children's text, computed on demand, so that no pass can make the two disagree.
//!
//!     Nodes have no parent pointers. Passes that need to climb back up (loop discovery)
//!     carry an explicit stack of insertion points instead. Every pass consumes the tokens it
//!     is given and hands back new ones, so a node is owned by exactly one parent at a time.

use super::kind::TokenKind;
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    span: Range<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Token>,
}

impl Token {
    /// A leaf covering `text`, starting at byte offset `start` of the source.
    pub fn leaf(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let span = start..start + text.len();
        Token {
            kind,
            span,
            text: Some(text),
            children: Vec::new(),
        }
    }

    /// A node over `children`. Its span runs from the first child to the last.
    ///
    /// An empty child list yields an empty span at offset 0; use [`Token::node_at`] when the
    /// children may be empty.
    pub fn node(kind: TokenKind, children: Vec<Token>) -> Self {
        Token::node_at(kind, children, 0)
    }

    /// A node over `children`, or an empty node sitting at byte offset `at`.
    pub fn node_at(kind: TokenKind, children: Vec<Token>, at: usize) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.start..last.span.end,
            _ => at..at,
        };
        Token {
            kind,
            span,
            text: None,
            children,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Change the kind of this token. Text and children are untouched.
    pub fn reclassify(&mut self, kind: TokenKind) {
        self.kind = kind;
    }

    /// Byte range of the source this token covers.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn is_leaf(&self) -> bool {
        self.text.is_some()
    }

    pub fn children(&self) -> &[Token] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Token> {
        self.children
    }

    /// The text this token covers.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.text {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => {
                let mut out = String::with_capacity(self.span.len());
                self.write_text(&mut out);
                Cow::Owned(out)
            }
        }
    }

    pub fn write_text(&self, out: &mut String) {
        match &self.text {
            Some(text) => out.push_str(text),
            None => self.children.iter().for_each(|child| child.write_text(out)),
        }
    }

    /// Whether this token is a leaf whose text equals `text`, or a node covering exactly it.
    pub fn text_is(&self, text: &str) -> bool {
        match &self.text {
            Some(own) => own == text,
            None => self.span.len() == text.len() && self.text() == text,
        }
    }

    /// Containment query: does any descendant (not the token itself) satisfy `pred`?
    pub fn contains(&self, pred: impl Fn(&Token) -> bool + Copy) -> bool {
        self.children
            .iter()
            .any(|child| pred(child) || child.contains(pred))
    }

    pub fn contains_kind(&self, kind: TokenKind) -> bool {
        self.contains(|t| t.kind == kind)
    }

    /// Leaves in document order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            self.children.iter().for_each(|c| c.collect_leaves(out));
        }
    }

    /// Replace the children through `f`, keeping kind and span.
    pub fn map_children(self, f: impl FnOnce(Vec<Token>) -> Vec<Token>) -> Self {
        if self.is_leaf() {
            return self;
        }
        Token {
            children: f(self.children),
            ..self
        }
    }

    /// Fallible [`Token::map_children`].
    pub fn try_map_children<E>(
        self,
        f: impl FnOnce(Vec<Token>) -> Result<Vec<Token>, E>,
    ) -> Result<Self, E> {
        if self.is_leaf() {
            return Ok(self);
        }
        Ok(Token {
            children: f(self.children)?,
            ..self
        })
    }
}
