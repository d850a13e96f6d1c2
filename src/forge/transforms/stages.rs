//! Individual pipeline stages
//!
//! Each stage wraps one pass and implements [`Runnable`](super::Runnable). Apart from
//! tokenization, every stage takes and returns the `Root` token, rewriting its children.

pub mod discovery;
pub mod merging;
pub mod tokenization;

pub use discovery::{CallDiscovery, GroupDiscovery, LoopDiscovery};
pub use merging::Merging;
pub use tokenization::Tokenization;
