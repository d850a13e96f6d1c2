//! Structural errors raised by the discovery passes.
//!
//! A merge that finds nothing to merge is not an error; only malformed structure is. Each
//! variant carries the byte span of the token that could not be placed, and a pass that
//! fails returns no tree at all.

use crate::forge::token::TokenKind;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// An open delimiter with no close at the same nesting depth.
    #[error("unmatched {delimiter:?} at {span:?}: no closing delimiter")]
    UnmatchedOpen {
        delimiter: TokenKind,
        span: Range<usize>,
    },
    /// A close delimiter with no open before it.
    #[error("unmatched {delimiter:?} at {span:?}: no opening delimiter")]
    UnmatchedClose {
        delimiter: TokenKind,
        span: Range<usize>,
    },
    /// A binding keyword not followed by the iteration variable.
    #[error("binding keyword at {span:?} is not followed by an identifier")]
    MissingLoopVariable { span: Range<usize> },
    /// A binding keyword with no open loop to close.
    #[error("binding keyword at {span:?} is outside of any loop")]
    BindingOutsideLoop { span: Range<usize> },
    /// A loop keyword whose binding clause never arrives.
    #[error("loop at {span:?} has no binding clause")]
    UnclosedLoop { span: Range<usize> },
}

impl StructureError {
    /// Byte span of the offending token.
    pub fn span(&self) -> Range<usize> {
        match self {
            StructureError::UnmatchedOpen { span, .. }
            | StructureError::UnmatchedClose { span, .. }
            | StructureError::MissingLoopVariable { span }
            | StructureError::BindingOutsideLoop { span }
            | StructureError::UnclosedLoop { span } => span.clone(),
        }
    }
}
