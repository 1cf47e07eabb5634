use std::collections::BTreeMap;

use crate::config::NavConfig;
use crate::types::{Position, Tick};

use super::TileSymbol;

/// Axis-aligned explored extent of an area grid.
///
/// Bounds only ever grow; nothing shrinks or re-centers them once cells have
/// been written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    pub fn cell(position: Position) -> Self {
        Self {
            min: position,
            max: position,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }

    pub fn expand(&mut self, position: Position) {
        self.min.x = self.min.x.min(position.x);
        self.min.y = self.min.y.min(position.y);
        self.max.x = self.max.x.max(position.x);
        self.max.y = self.max.y.max(position.y);
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y + 1) as u32
    }
}

/// Persistent sparse tile map for one game location.
///
/// Created on first entry, updated by the stitcher on every observation
/// while the agent occupies the location, and persisted indefinitely.
/// `origin_offset` is fixed at creation by pinning the first locally
/// reported player position to [`NavConfig::GRID_ANCHOR`] and never changes
/// afterwards; every local-to-grid translation flows through
/// [`AreaGrid::local_to_grid`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaGrid {
    tiles: BTreeMap<Position, TileSymbol>,
    bounds: Option<Bounds>,
    origin_offset: Position,
    visited_count: u32,
    first_entered: Tick,
    last_stitched: Tick,
}

impl AreaGrid {
    /// Creates an empty grid whose coordinate system anchors `player_local`
    /// to the fixed interior anchor point.
    pub(crate) fn anchored(player_local: Position, now: Tick) -> Self {
        let anchor = NavConfig::GRID_ANCHOR;
        Self {
            tiles: BTreeMap::new(),
            bounds: None,
            origin_offset: Position::new(anchor.x - player_local.x, anchor.y - player_local.y),
            visited_count: 0,
            first_entered: now,
            last_stitched: now,
        }
    }

    /// Translates a locally-reported coordinate into this grid's persistent
    /// coordinate space. The single place offset arithmetic happens.
    pub fn local_to_grid(&self, local: Position) -> Position {
        local.offset(self.origin_offset.x, self.origin_offset.y)
    }

    pub fn tile(&self, position: Position) -> Option<TileSymbol> {
        self.tiles.get(&position).copied()
    }

    /// Writes a cell and grows the explored bounds to cover it.
    ///
    /// Conflict policy (which readings may replace which) is the stitcher's
    /// responsibility; the grid itself accepts any non-`Unknown` symbol.
    pub(crate) fn set_tile(&mut self, position: Position, symbol: TileSymbol) {
        debug_assert!(symbol != TileSymbol::Unknown, "unknown tiles are not stored");
        self.tiles.insert(position, symbol);
        match &mut self.bounds {
            Some(bounds) => bounds.expand(position),
            None => self.bounds = Some(Bounds::cell(position)),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Position, TileSymbol)> + '_ {
        self.tiles.iter().map(|(position, symbol)| (*position, *symbol))
    }

    pub fn explored_cells(&self) -> usize {
        self.tiles.len()
    }

    /// Fraction of the bounding rectangle that has been observed.
    pub fn explored_fraction(&self) -> f64 {
        match self.bounds {
            Some(bounds) => {
                let area = u64::from(bounds.width()) * u64::from(bounds.height());
                self.tiles.len() as f64 / area as f64
            }
            None => 0.0,
        }
    }

    pub fn visited_count(&self) -> u32 {
        self.visited_count
    }

    pub fn first_entered(&self) -> Tick {
        self.first_entered
    }

    pub fn last_stitched(&self) -> Tick {
        self.last_stitched
    }

    pub(crate) fn mark_visit(&mut self, now: Tick) {
        self.visited_count += 1;
        self.last_stitched = now;
    }

    pub(crate) fn mark_stitched(&mut self, now: Tick) {
        self.last_stitched = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_fixes_origin_on_creation() {
        let grid = AreaGrid::anchored(Position::new(10, 4), Tick::ZERO);
        assert_eq!(
            grid.local_to_grid(Position::new(10, 4)),
            NavConfig::GRID_ANCHOR
        );
        // Translation stays consistent for any other local coordinate.
        assert_eq!(
            grid.local_to_grid(Position::new(11, 4)),
            NavConfig::GRID_ANCHOR.offset(1, 0)
        );
    }

    #[test]
    fn bounds_grow_monotonically() {
        let mut grid = AreaGrid::anchored(Position::ORIGIN, Tick::ZERO);
        grid.set_tile(Position::new(5, 5), TileSymbol::Floor);
        let first = grid.bounds().unwrap();
        assert_eq!(first.min, Position::new(5, 5));
        assert_eq!(first.max, Position::new(5, 5));

        grid.set_tile(Position::new(2, 9), TileSymbol::Wall);
        let grown = grid.bounds().unwrap();
        assert!(grown.contains(Position::new(5, 5)));
        assert!(grown.contains(Position::new(2, 9)));

        // Re-writing an interior cell leaves bounds untouched.
        grid.set_tile(Position::new(3, 6), TileSymbol::Floor);
        assert_eq!(grid.bounds().unwrap(), grown);
    }

    #[test]
    fn explored_fraction_counts_sparse_cells() {
        let mut grid = AreaGrid::anchored(Position::ORIGIN, Tick::ZERO);
        assert_eq!(grid.explored_fraction(), 0.0);

        grid.set_tile(Position::new(0, 0), TileSymbol::Floor);
        grid.set_tile(Position::new(1, 1), TileSymbol::Floor);
        // 2 of the 4 cells in the 2x2 bounding box are known.
        assert!((grid.explored_fraction() - 0.5).abs() < f64::EPSILON);
    }
}
