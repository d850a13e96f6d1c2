//! Fluent assertion API for token trees
//!
//! ```rust,ignore
//! assert_token(&root)
//!     .kind(TokenKind::Root)
//!     .child_count(1)
//!     .child(0, |call| {
//!         call.kind(TokenKind::ParenthesisCall)
//!             .child(0, |head| {
//!                 head.text("f");
//!             });
//!     });
//! ```
//!
//! Failures name the path from the asserted token down, e.g. `children[0].children[1]`.

use crate::forge::token::{Token, TokenKind};

/// Create an assertion builder for a token
pub fn assert_token(token: &Token) -> TokenAssertion<'_> {
    TokenAssertion {
        token,
        context: "token".to_string(),
    }
}

pub struct TokenAssertion<'a> {
    token: &'a Token,
    context: String,
}

fn summarize(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:?}({:?})", t.kind(), t.text()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl<'a> TokenAssertion<'a> {
    pub fn kind(self, expected: TokenKind) -> Self {
        assert_eq!(
            self.token.kind(),
            expected,
            "{}: Expected kind {:?}, found {:?} ({:?})",
            self.context,
            expected,
            self.token.kind(),
            self.token.text()
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.token.text(),
            expected,
            "{}: Expected text {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn span(self, expected: std::ops::Range<usize>) -> Self {
        assert_eq!(
            self.token.span(),
            expected,
            "{}: Expected span {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn is_leaf(self) -> Self {
        assert!(
            self.token.is_leaf(),
            "{}: Expected a leaf, found {} children",
            self.context,
            self.token.children().len()
        );
        self
    }

    /// Assert the number of children
    pub fn child_count(self, expected: usize) -> Self {
        let children = self.token.children();
        assert_eq!(
            children.len(),
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            children.len(),
            summarize(children)
        );
        self
    }

    /// Assert the kinds of all children, in order
    pub fn child_kinds(self, expected: &[TokenKind]) -> Self {
        let actual: Vec<TokenKind> = self.token.children().iter().map(|t| t.kind()).collect();
        assert_eq!(
            actual,
            expected,
            "{}: children were [{}]",
            self.context,
            summarize(self.token.children())
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TokenAssertion<'a>),
    {
        let children = self.token.children();
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(TokenAssertion {
            token: &children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Assert some descendant has the given kind
    pub fn contains_kind(self, kind: TokenKind) -> Self {
        assert!(
            self.token.contains_kind(kind),
            "{}: Expected a descendant of kind {:?} in {:?}",
            self.context,
            kind,
            self.token.text()
        );
        self
    }

    pub fn lacks_kind(self, kind: TokenKind) -> Self {
        assert!(
            !self.token.contains_kind(kind),
            "{}: Expected no descendant of kind {:?} in {:?}",
            self.context,
            kind,
            self.token.text()
        );
        self
    }
}
