use crate::types::Position;

/// Cost-shaping objective for route planning.
///
/// Speedrun mode treats tall grass as something to route around (wild
/// encounters cost real time); training mode makes grass cheap so routes
/// deliberately pass through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    #[default]
    Speedrun,
    Training,
}

/// Navigation configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavConfig {
    /// Cost-shaping objective; selects which grass cost applies.
    pub travel_mode: TravelMode,
    /// Cost of entering a tall-grass tile in speedrun mode, in cost units.
    pub grass_cost_speedrun: u32,
    /// Cost of entering a tall-grass tile in training mode, in cost units.
    pub grass_cost_training: u32,
    /// Cost of committing to a one-way ledge hop, in cost units.
    pub ledge_cost: u32,
    /// Extra cost for re-entering a position recently visited under a
    /// different location key (warp-loop damping).
    pub cross_map_penalty: u32,
    /// Observation windows with more than this fraction of unreadable tiles
    /// are discarded instead of merged.
    pub max_unreadable_fraction: f64,
}

impl NavConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum primitive steps handed to the executor per plan.
    pub const MAX_BATCHED_STEPS: usize = 8;

    // ===== fixed algorithm parameters =====
    /// Interior anchor that the first locally-reported position of a new
    /// area is pinned to. Far from the i32 edges so a grid can grow in any
    /// direction without renumbering.
    pub const GRID_ANCHOR: Position = Position::new(512, 512);
    /// Cost of entering an ordinary walkable tile, in cost units.
    pub const STEP_COST: u32 = 10;
    /// Rolling (location, position) history length for warp-loop damping.
    pub const HISTORY_LEN: usize = 10;
    /// Hard cap on A* expansions; trips only on pathological grids.
    pub const ASTAR_MAX_ITERATIONS: usize = 10_000;
    /// How far ahead of the player a directional goal is projected when
    /// scoring frontier candidates.
    pub const FRONTIER_HORIZON: i32 = 48;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRASS_COST_SPEEDRUN: u32 = 100;
    pub const DEFAULT_GRASS_COST_TRAINING: u32 = 5;
    pub const DEFAULT_LEDGE_COST: u32 = 12;
    pub const DEFAULT_CROSS_MAP_PENALTY: u32 = 50;
    pub const DEFAULT_MAX_UNREADABLE_FRACTION: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            travel_mode: TravelMode::Speedrun,
            grass_cost_speedrun: Self::DEFAULT_GRASS_COST_SPEEDRUN,
            grass_cost_training: Self::DEFAULT_GRASS_COST_TRAINING,
            ledge_cost: Self::DEFAULT_LEDGE_COST,
            cross_map_penalty: Self::DEFAULT_CROSS_MAP_PENALTY,
            max_unreadable_fraction: Self::DEFAULT_MAX_UNREADABLE_FRACTION,
        }
    }

    pub fn with_travel_mode(travel_mode: TravelMode) -> Self {
        Self {
            travel_mode,
            ..Self::new()
        }
    }

    /// Cost of entering a tall-grass tile under the configured objective.
    pub fn grass_cost(&self) -> u32 {
        match self.travel_mode {
            TravelMode::Speedrun => self.grass_cost_speedrun,
            TravelMode::Training => self.grass_cost_training,
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self::new()
    }
}
