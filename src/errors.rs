//! Error types for hard invariant violations.
//!
//! Most of the pipeline treats degenerate input (zero-length edges, zero
//! radii, near-identity transforms) as soft cases handled locally — they
//! never surface an error. A small number of operations have a precondition
//! that the caller is expected to have checked; violating it is a logic
//! error in the caller, not a recoverable runtime condition, so these
//! return `Result` rather than silently producing garbage.

use thiserror::Error;

/// Hard invariant violations surfaced by the rendering pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum GraphicsError {
    /// A precondition the caller must uphold was violated.
    #[error("precondition violated: {0}")]
    PreconditionViolated(&'static str),
}
