//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from providers and repositories so the step loop can
//! bubble them up with consistent context.
use std::fmt;

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("{kind} provider failed: {message}")]
    Provider { kind: ProviderKind, message: String },

    #[error("observation window malformed")]
    MalformedWindow(#[from] nav_core::WindowError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// Convenience for providers wrapping an underlying failure.
    pub fn provider(kind: ProviderKind, error: impl fmt::Display) -> Self {
        Self::Provider {
            kind,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Observation,
    Goal,
    Fallback,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Observation => "observation",
            ProviderKind::Goal => "goal",
            ProviderKind::Fallback => "fallback",
        };
        write!(f, "{}", label)
    }
}
