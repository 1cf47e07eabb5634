use arrayvec::ArrayVec;

use crate::config::NavConfig;
use crate::map::AreaGrid;
use crate::types::{Direction, Position};

/// Why the pathfinding engine produced no plan.
///
/// None of these are failures in the error sense; the caller escalates to
/// an external decision maker when it sees one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NoPathReason {
    #[error("no grid recorded for the current location")]
    GridMissing,

    #[error("current position lies outside the grid's explored bounds")]
    OutOfSync,

    #[error("goal cell has never been observed")]
    GoalUnexplored,

    #[error("no route through known walkable tiles")]
    NoRoute,

    #[error("no reachable frontier in the goal direction")]
    NoFrontier,
}

/// Outcome of one planning call: a plan, or the reason there is none.
#[derive(Clone, Debug, PartialEq)]
pub enum PathResult {
    Found(PathPlan),
    NotFound(NoPathReason),
}

impl PathResult {
    pub fn plan(&self) -> Option<&PathPlan> {
        match self {
            PathResult::Found(plan) => Some(plan),
            PathResult::NotFound(_) => None,
        }
    }
}

/// Ordered primitive moves from one A* invocation, with the grid cells they
/// traverse.
///
/// Plans are transient: they are recomputed whenever the agent's position or
/// the map data changes, and they never extend past a warp tile, since grid
/// coordinates beyond a warp are meaningless until re-observation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PathPlan {
    steps: Vec<Direction>,
    cells: Vec<Position>,
}

impl PathPlan {
    /// Builds a plan from an A* cell sequence (start inclusive), truncating
    /// at the first warp tile encountered.
    pub(super) fn from_cells(grid: &AreaGrid, mut cells: Vec<Position>) -> Self {
        if let Some(cut) = cells
            .iter()
            .skip(1)
            .position(|cell| grid.tile(*cell).is_some_and(|symbol| symbol.is_warp()))
        {
            cells.truncate(cut + 2);
        }

        let steps = cells
            .windows(2)
            .map(|pair| {
                Direction::between(pair[0], pair[1])
                    .expect("A* produces orthogonally adjacent cells")
            })
            .collect();

        Self { steps, cells }
    }

    pub fn first_step(&self) -> Option<Direction> {
        self.steps.first().copied()
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Final cell of the (possibly truncated) plan.
    pub fn destination(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Up to [`NavConfig::MAX_BATCHED_STEPS`] leading steps for batched
    /// execution. Callers must re-plan before executing past the batch if
    /// anything may have changed state.
    pub fn batched(&self) -> ArrayVec<Direction, { NavConfig::MAX_BATCHED_STEPS }> {
        self.steps
            .iter()
            .copied()
            .take(NavConfig::MAX_BATCHED_STEPS)
            .collect()
    }
}
