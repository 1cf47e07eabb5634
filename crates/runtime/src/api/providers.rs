//! Asynchronous seams to the external collaborators.
//!
//! The core never performs I/O; everything it consumes — tile windows from
//! the emulator, goals from the objective layer, visually-grounded fallback
//! decisions — arrives through these traits. Implementations can wrap the
//! real perception stack, scripted fixtures, or replay logs.
use async_trait::async_trait;
use nav_core::{Direction, MapId, NavigationGoal, Position, RawTile, TileWindow};

use super::errors::Result;

/// One position fix plus the tile window observed around it.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub map: MapId,
    /// Player position in the location's local coordinates.
    pub player_local: Position,
    pub window: TileWindow,
}

impl Observation {
    /// Builds an observation from raw row-major window data, rejecting
    /// windows of the wrong shape.
    pub fn from_rows(
        map: MapId,
        player_local: Position,
        rows: Vec<Vec<RawTile>>,
    ) -> Result<Self> {
        Ok(Self {
            map,
            player_local,
            window: TileWindow::from_rows(rows)?,
        })
    }
}

/// Source of tile observations, polled once per step.
#[async_trait]
pub trait ObservationFeed: Send + Sync {
    async fn observe(&self) -> Result<Observation>;
}

/// Supplies the current navigation objective each planning cycle.
///
/// The runtime treats the goal as opaque: it never interprets what the
/// objective means in game terms.
#[async_trait]
pub trait GoalProvider: Send + Sync {
    async fn current_goal(&self) -> Result<NavigationGoal>;
}

/// External decision maker consulted only when the core defers.
///
/// Whatever it returns is passed through unmodified; `None` means even the
/// fallback has no move to offer.
#[async_trait]
pub trait DecisionFallback: Send + Sync {
    async fn decide(&self, map: MapId, position: Position) -> Result<Option<Direction>>;
}

/// Fallback that never has an answer. Useful for tests and for embedders
/// that handle deferrals themselves.
pub struct NoFallback;

#[async_trait]
impl DecisionFallback for NoFallback {
    async fn decide(&self, _map: MapId, _position: Position) -> Result<Option<Direction>> {
        Ok(None)
    }
}
