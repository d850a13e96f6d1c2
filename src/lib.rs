//! # tokenforge
//!
//! A token-tree engine: classifies source text character by character, merges the
//! characters into higher-level tokens by declarative patterns, then discovers groups,
//! calls and loops by recursive passes over the merged sequence.
//!
//! ## Testing
//!
//! Tree shapes are checked with the fluent assertions of the [testing module](forge::testing).

pub mod forge;
