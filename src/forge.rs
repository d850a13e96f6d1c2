//! Token-tree engine
//!
//! Source text goes through a fixed sequence of passes, each consuming the previous tree:
//!
//!     text
//!      └─ lexing::tokenize            one leaf per character, kinds from the classifier
//!          └─ transforms::merge       runs of leaves into numbers, words, strings, operators
//!              └─ transforms::groups  delimiter pairs into groups
//!                  └─ transforms::calls  identifier + group into calls
//!                      └─ transforms::loops  `loop ... over x` into loop bodies
//!
//! There is no grammar. Every kind the merge engine produces is described by a pattern in
//! [`patterns`], and the order the merges run in is declared once in
//! [`transforms::standard::STANDARD_MERGE_ORDER`]. The discovery passes are hand-written
//! recursive descents; only they can fail, with a [`error::StructureError`].
//!
//! Every pass keeps the source text intact: the leaves of any tree, read in order, are the
//! input. [`token::detokenize`] rebuilds it.

pub mod config;
pub mod error;
pub mod lexing;
pub mod patterns;
pub mod records;
pub mod testing;
pub mod token;
pub mod transforms;
