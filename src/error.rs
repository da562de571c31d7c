//! Error types for polygon decomposition.

use thiserror::Error;

/// Errors surfaced at the decomposition boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnkinkError {
    /// The input failed validation before any heavy computation.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Which validation rule failed.
        reason: String,
    },

    /// A next-intersection link could not be resolved after graph wiring.
    ///
    /// This indicates a bug in the intersection finder or the graph wiring,
    /// not bad input.
    #[error("inconsistent intersection graph at intersection {index}")]
    GraphInconsistency {
        /// Index of the intersection whose link was unresolved.
        index: usize,
    },
}
