//! Token model: kinds, the token tree, and helpers shared by every pass.
//!
//!     A token is a node tagged with a [`TokenKind`] and covering a span of the source. The
//!     tree is built bottom-up by the classifier (one leaf per character) and then regrouped
//!     by the merge engine and the discovery passes. Two invariants hold after every pass:
//!
//!     Text conservation:
//!         Concatenating the leaves in document order yields the original source. Passes
//!         regroup tokens; they never insert, drop or reorder characters.
//!
//!     Leaf immutability:
//!         A leaf's text is fixed when it is classified. Only kinds and the shape of the tree
//!         above the leaves change afterwards.

pub mod formatting;
pub mod kind;
pub mod tree;
pub mod utilities;

pub use formatting::{detokenize, to_treeviz};
pub use kind::{KindLayer, TokenKind};
pub use tree::Token;
pub use utilities::{merge_sequence, trim, trim_end, trim_start};
