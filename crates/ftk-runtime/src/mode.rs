#![forbid(unsafe_code)]

//! Runtime mode definitions for Strict and Hardened operation.

use serde::{Deserialize, Serialize};

/// Operational mode governing how much input validation a transform performs.
///
/// - **Strict**: Validate only the structural preconditions (length, worker
///   counts). Non-finite samples flow through the arithmetic unchanged.
/// - **Hardened**: Additionally reject NaN and infinite samples before any
///   work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuntimeMode {
    #[default]
    Strict,
    Hardened,
}

impl RuntimeMode {
    /// Whether non-finite samples must be rejected up front.
    #[must_use]
    pub const fn rejects_non_finite(self) -> bool {
        matches!(self, Self::Hardened)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Hardened => "Hardened",
        }
    }
}
