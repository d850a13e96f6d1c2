//! Discovery stages
//!
//! Group, call and loop discovery over the children of the `Root` token. Structural errors
//! surface as [`TransformError::Structure`] and stop the pipeline.

use crate::forge::token::Token;
use crate::forge::transforms::calls::{discover_calls, CallOptions};
use crate::forge::transforms::groups::{discover_groups, GroupDescriptor};
use crate::forge::transforms::loops::discover_loops;
use crate::forge::transforms::{Runnable, TransformError};

pub struct GroupDiscovery {
    groups: Vec<GroupDescriptor>,
}

impl GroupDiscovery {
    pub fn new(groups: &[GroupDescriptor]) -> Self {
        GroupDiscovery {
            groups: groups.to_vec(),
        }
    }
}

impl Runnable<Token, Token> for GroupDiscovery {
    fn run(&self, input: Token) -> Result<Token, TransformError> {
        Ok(input.try_map_children(|children| discover_groups(children, &self.groups))?)
    }
}

pub struct CallDiscovery {
    options: CallOptions,
}

impl CallDiscovery {
    pub fn new(options: CallOptions) -> Self {
        CallDiscovery { options }
    }
}

impl Default for CallDiscovery {
    fn default() -> Self {
        Self::new(CallOptions::default())
    }
}

impl Runnable<Token, Token> for CallDiscovery {
    fn run(&self, input: Token) -> Result<Token, TransformError> {
        Ok(input.map_children(|children| discover_calls(children, &self.options)))
    }
}

pub struct LoopDiscovery;

impl LoopDiscovery {
    pub fn new() -> Self {
        LoopDiscovery
    }
}

impl Default for LoopDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Token, Token> for LoopDiscovery {
    fn run(&self, input: Token) -> Result<Token, TransformError> {
        Ok(input.try_map_children(discover_loops)?)
    }
}
