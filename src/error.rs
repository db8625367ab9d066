//! Builder contract violations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A refinement was requested in a state that does not allow it.
    #[error("configuration error: `{refinement}` {reason}")]
    Configuration {
        refinement: &'static str,
        reason: &'static str,
    },

    /// The positional builder was finalized before it was given a value.
    #[error("missing value: positional operator `{tag}` was never given a value")]
    MissingValue { tag: String },

    #[error("unsupported operator: `{verb}` cannot be applied through positional operator `{tag}`")]
    UnsupportedOperator { verb: String, tag: String },
}
