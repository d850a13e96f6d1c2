//! Merging stage
//!
//! Runs the merge engine over the top level of the `Root` token, once per kind of the
//! configured order. An order naming a kind no pattern produces fails the stage rather than
//! silently skipping the pass.

use crate::forge::patterns::pattern_for;
use crate::forge::token::{Token, TokenKind};
use crate::forge::transforms::merge::merge_all;
use crate::forge::transforms::{Runnable, TransformError};

pub struct Merging {
    order: Vec<TokenKind>,
}

impl Merging {
    pub fn new(order: &[TokenKind]) -> Self {
        Merging {
            order: order.to_vec(),
        }
    }
}

impl Runnable<Token, Token> for Merging {
    fn run(&self, input: Token) -> Result<Token, TransformError> {
        if let Some(kind) = self.order.iter().find(|&&kind| pattern_for(kind).is_none()) {
            return Err(TransformError::StageFailed {
                stage: "merging".to_string(),
                message: format!("{:?} has no merge pattern", kind),
            });
        }
        Ok(input.map_children(|children| merge_all(children, &self.order)))
    }
}
