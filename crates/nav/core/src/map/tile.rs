use crate::types::Direction;

/// Canonical classification for one grid cell.
///
/// Tiles are immutable value data: re-observation overwrites a cell, it
/// never mutates one in place. `Unknown` exists as a classification result
/// for unreadable sensor data but is never stored in a grid — an absent
/// cell already means unexplored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileSymbol {
    Floor,
    TallGrass,
    Wall,
    Door,
    Stairs,
    /// One-way ledge, passable only when entered moving in its direction.
    Ledge(Direction),
    Unknown,
}

impl TileSymbol {
    /// Whether this tile can be entered while moving in `approach`.
    ///
    /// Doors and stairs are excluded here: stepping onto one triggers a
    /// location change, so the planner admits them only as final targets
    /// (see [`TileSymbol::is_warp`]).
    pub fn is_walkable(self, approach: Direction) -> bool {
        match self {
            TileSymbol::Floor | TileSymbol::TallGrass => true,
            TileSymbol::Ledge(direction) => direction == approach,
            TileSymbol::Wall | TileSymbol::Door | TileSymbol::Stairs | TileSymbol::Unknown => {
                false
            }
        }
    }

    /// Whether standing on this tile triggers a transition to another area.
    pub fn is_warp(self) -> bool {
        matches!(self, TileSymbol::Door | TileSymbol::Stairs)
    }

    /// Whether this tile can serve as a standing cell for frontier probing.
    pub fn is_open_ground(self) -> bool {
        matches!(self, TileSymbol::Floor | TileSymbol::TallGrass)
    }

    /// Short label for diagnostics and snapshot histograms.
    pub fn label(self) -> &'static str {
        match self {
            TileSymbol::Floor => "floor",
            TileSymbol::TallGrass => "tall_grass",
            TileSymbol::Wall => "wall",
            TileSymbol::Door => "door",
            TileSymbol::Stairs => "stairs",
            TileSymbol::Ledge(_) => "ledge",
            TileSymbol::Unknown => "unknown",
        }
    }
}
