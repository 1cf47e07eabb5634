//! Runtime orchestration around the navigation core.
//!
//! This crate wires the provider abstractions (observation feed, goal
//! provider, decision fallback), the durable map repository, and the
//! per-step pipeline into a cohesive API. Consumers embed [`NavRuntime`]
//! to drive steps and read accumulated map knowledge.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the provider traits and error types
//! - [`repository`] provides durable storage for the map store
//! - [`snapshot`] provides read-only diagnostic views
pub mod api;
pub mod repository;
pub mod runtime;
pub mod snapshot;

pub use api::{
    DecisionFallback, GoalProvider, NoFallback, Observation, ObservationFeed, ProviderKind,
    Result, RuntimeError,
};
pub use repository::{FileMapRepository, InMemoryMapRepo, MapRepository, RepositoryError};
pub use runtime::{NavRuntime, NavRuntimeBuilder, RuntimeConfig, StepOutcome};
pub use snapshot::{grid_snapshot, grid_snapshot_json, GridSnapshot};
