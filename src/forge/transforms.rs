//! Passes and the pipeline that chains them
//!
//! The passes themselves are plain functions over token sequences:
//!
//! - [`merge`]: the merge engine, one target kind per call.
//! - [`groups`]: delimiter pairing into group tokens.
//! - [`calls`]: identifier + group into call tokens.
//! - [`loops`]: `loop ... over x` into loop bodies.
//!
//! On top of them sits a small composable pipeline. Each pass is wrapped as a stage
//! implementing [`Runnable`], and stages are chained through [`Transform::then`]; the
//! compiler checks that each stage's input is the previous stage's output:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Tokenization::new())             // String -> Root token
//!     .then(Merging::new(STANDARD_MERGE_ORDER))
//!     .then(GroupDiscovery::new(STANDARD_GROUPS));
//! ```
//!
//! Pre-built pipelines live in [`standard`] as lazily initialised statics.

pub mod calls;
pub mod groups;
pub mod loops;
pub mod merge;
pub mod stages;
pub mod standard;

use crate::forge::error::StructureError;
use thiserror::Error;

/// Error that can occur while running a pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A stage rejected its own setup, such as a merge order naming an unmergeable kind
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },
    /// A discovery pass found malformed structure
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Trait for anything that can transform an input to an output
///
/// This is implemented by individual stages. The `Transform` struct composes them.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform, returning a transform with the stage's output type.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built (static) transform after this one.
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
