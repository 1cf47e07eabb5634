//! Deterministic map reconstruction and navigation core.
//!
//! `nav-core` rebuilds a persistent, coordinate-consistent world model from
//! small noisy observation windows and plans goal-directed movement over
//! it. The [`stitch::MapStitcher`] is the single writer of the
//! [`map::AreaGridStore`]; the [`path::Pathfinder`] and
//! [`navigator::Navigator`] only read it. All APIs are pure and synchronous;
//! persistence and external collaborators live in the runtime crate.
pub mod config;
pub mod map;
pub mod navigator;
pub mod observe;
pub mod path;
pub mod stitch;
pub mod types;

pub use config::{NavConfig, TravelMode};
pub use map::{AreaGrid, AreaGridStore, Bounds, TileSymbol, WarpConnection, WarpKind};
pub use navigator::{NavDecision, Navigator};
pub use observe::{RawTile, TileBehavior, TileWindow, WindowError, WINDOW_RADIUS, WINDOW_SIZE};
pub use path::{
    CostModel, NavigationGoal, NoPathReason, PathPlan, PathResult, Pathfinder, PlanTarget,
};
pub use stitch::{MapStitcher, StitchOutcome};
pub use types::{Direction, MapId, Position, Tick};
