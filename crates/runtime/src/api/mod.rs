//! Types downstream clients interact with: provider traits and errors.

mod errors;
mod providers;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{
    DecisionFallback, GoalProvider, NoFallback, Observation, ObservationFeed,
};
