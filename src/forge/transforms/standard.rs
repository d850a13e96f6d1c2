//! Standard pipelines
//!
//! [`STANDARD_MERGE_ORDER`] is the one place the order of merge passes is declared. The
//! order matters wherever two kinds' patterns can claim the same characters:
//!
//! - escapes before strings, so `\"` never closes a string,
//! - strings and comments before everything else, so their contents stay opaque,
//! - numbers before words, so `2x` is a number then a word,
//! - the namespace separator and words before namespace paths, which are built from them,
//! - two-character operators and delimiters before group discovery, so the longest
//!   delimiter wins: `||` is a norm delimiter, never two absolute-value bars.
//!
//! The pipelines are built once, on first use, with `once_cell::sync::Lazy`.

use crate::forge::config::ForgeConfig;
use crate::forge::token::{Token, TokenKind};
use crate::forge::transforms::groups::STANDARD_GROUPS;
use crate::forge::transforms::stages::{
    CallDiscovery, GroupDiscovery, LoopDiscovery, Merging, Tokenization,
};
use crate::forge::transforms::Transform;
use log::debug;
use once_cell::sync::Lazy;

pub const STANDARD_MERGE_ORDER: &[TokenKind] = &[
    TokenKind::EscapeSequence,
    TokenKind::Text,
    TokenKind::Comment,
    TokenKind::Number,
    TokenKind::NamespaceSeparator,
    TokenKind::Word,
    TokenKind::NamespacePath,
    TokenKind::LoopKeyword,
    TokenKind::BindingKeyword,
    TokenKind::Equality,
    TokenKind::Inequality,
    TokenKind::LessOrEqual,
    TokenKind::GreaterOrEqual,
    TokenKind::Arrow,
    TokenKind::Range,
    TokenKind::TensorOpen,
    TokenKind::TensorClose,
    TokenKind::NormDelimiter,
    TokenKind::Spaces,
    TokenKind::NewLine,
];

/// Source text to a finished tree.
pub type TreeTransform = Transform<String, Token>;

/// String → Root of one-character leaves.
pub static TOKENIZATION: Lazy<TreeTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::new()));

/// String → Root of merged tokens, in the standard order.
pub static LEXING: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(Tokenization::new())
        .then(Merging::new(STANDARD_MERGE_ORDER))
});

/// String → Root with groups discovered.
pub static GROUPING: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&LEXING)
        .then(GroupDiscovery::new(STANDARD_GROUPS))
});

/// String → fully structured Root: groups, calls with default options, then loops.
pub static STRUCTURING: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&GROUPING)
        .then(CallDiscovery::default())
        .then(LoopDiscovery::new())
});

/// How far a configured pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Depth {
    Tokens,
    Lexing,
    Grouping,
    Full,
}

/// Build the full pipeline a loaded configuration describes.
pub fn pipeline_from_config(config: &ForgeConfig) -> TreeTransform {
    pipeline_to_depth(config, Depth::Full)
}

/// Build a configured pipeline that stops after `depth`. Every depth past tokenization
/// merges in the configured order.
pub fn pipeline_to_depth(config: &ForgeConfig, depth: Depth) -> TreeTransform {
    let order = config
        .pipeline
        .merge_order
        .as_deref()
        .unwrap_or(STANDARD_MERGE_ORDER);
    debug!(
        "pipeline to {:?}: {} merge pass(es), calls={}, loops={}",
        depth,
        order.len(),
        config.pipeline.discover_calls,
        config.pipeline.discover_loops
    );

    let mut pipeline: TreeTransform = Transform::from_fn(Ok).then(Tokenization::new());
    if depth >= Depth::Lexing {
        pipeline = pipeline.then(Merging::new(order));
    }
    if depth >= Depth::Grouping {
        pipeline = pipeline.then(GroupDiscovery::new(STANDARD_GROUPS));
    }
    if depth < Depth::Full {
        return pipeline;
    }
    if config.pipeline.discover_calls {
        pipeline = pipeline.then(CallDiscovery::new(config.calls.options()));
    }
    if config.pipeline.discover_loops {
        pipeline = pipeline.then(LoopDiscovery::new());
    }
    pipeline
}
