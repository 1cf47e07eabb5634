//! Incremental map merging: fuses each observation window into the store
//! while keeping previously-known good data intact.

use crate::config::NavConfig;
use crate::map::{AreaGridStore, TileSymbol, WarpConnection, WarpKind};
use crate::observe::{TileWindow, WINDOW_SIZE};
use crate::types::{Direction, MapId, Position};

/// Result of one [`MapStitcher::integrate_observation`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StitchOutcome {
    /// The window was merged into the area's grid.
    Merged {
        /// The grid for this location was created by this call. Callers may
        /// want one more observation before trusting it for planning.
        new_area: bool,
        /// Cells written or overwritten by this merge.
        cells_written: usize,
    },
    /// Too much of the window was unreadable; the store was left untouched
    /// and the caller should retry on the next observation.
    SkippedCorrupt { unreadable: usize, total: usize },
}

impl StitchOutcome {
    pub fn merged(&self) -> bool {
        matches!(self, StitchOutcome::Merged { .. })
    }
}

/// Single writer of the [`AreaGridStore`].
///
/// Owns only cross-call context: where the agent was on the previous
/// observation (for warp detection) and the last intra-map step direction
/// (for warp approach classification).
#[derive(Debug)]
pub struct MapStitcher {
    config: NavConfig,
    last_fix: Option<(MapId, Position)>,
    last_step: Option<Direction>,
}

impl MapStitcher {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            last_fix: None,
            last_step: None,
        }
    }

    /// Fuses one observation window into the grid for `map`.
    ///
    /// Creates and anchors the grid on first visit, records a warp
    /// connection when the location key changed since the previous call,
    /// and merges every readable tile under the conflict policy:
    ///
    /// - a known cell is never downgraded to `Unknown` (unreadable tiles
    ///   are simply not written);
    /// - a cached `Door` survives a plain-wall reading with no door
    ///   behavior, guarding against animated doors flickering "closed".
    pub fn integrate_observation(
        &mut self,
        store: &mut AreaGridStore,
        map: MapId,
        player_local: Position,
        window: &TileWindow,
    ) -> StitchOutcome {
        let unreadable = window.unreadable_count();
        if window.unreadable_fraction() > self.config.max_unreadable_fraction {
            return StitchOutcome::SkippedCorrupt {
                unreadable,
                total: WINDOW_SIZE * WINDOW_SIZE,
            };
        }

        let now = store.tick();
        let (grid, new_area) = store.grid_or_anchor(map, player_local, now);
        let player_grid_pos = grid.local_to_grid(player_local);

        let entered_area = match self.last_fix {
            Some((previous_map, _)) => previous_map != map,
            None => true,
        };

        if let Some((previous_map, previous_pos)) = self.last_fix {
            if previous_map != map {
                let kind = warp_kind_at(store, previous_map, previous_pos);
                store.record_warp(WarpConnection {
                    from_map: previous_map,
                    to_map: map,
                    from_pos: previous_pos,
                    to_pos: player_grid_pos,
                    kind,
                    approach: self.last_step,
                });
                self.last_step = None;
            } else if previous_pos != player_grid_pos {
                self.last_step = Direction::between(previous_pos, player_grid_pos);
            }
        }

        let grid = store
            .grid_mut(map)
            .expect("grid exists: anchored above");

        let mut cells_written = 0;
        for (dx, dy, raw) in window.iter_offsets() {
            let symbol = raw.classify();
            if symbol == TileSymbol::Unknown {
                continue;
            }
            let world = grid.local_to_grid(player_local.offset(dx, dy));
            if grid.tile(world) == Some(TileSymbol::Door) && symbol == TileSymbol::Wall {
                continue;
            }
            grid.set_tile(world, symbol);
            cells_written += 1;
        }

        if entered_area {
            grid.mark_visit(now);
        } else {
            grid.mark_stitched(now);
        }

        self.last_fix = Some((map, player_grid_pos));

        StitchOutcome::Merged {
            new_area,
            cells_written,
        }
    }

    /// Grid-space position of the previous successful observation, if any.
    pub fn last_fix(&self) -> Option<(MapId, Position)> {
        self.last_fix
    }
}

/// Classifies a departure tile by what the source grid knows about it or its
/// orthogonal neighbors.
fn warp_kind_at(store: &AreaGridStore, map: MapId, position: Position) -> WarpKind {
    let Some(grid) = store.grid(map) else {
        return WarpKind::RouteBoundary;
    };

    let mut probe = |pos: Position| match grid.tile(pos) {
        Some(TileSymbol::Door) => Some(WarpKind::Door),
        Some(TileSymbol::Stairs) => Some(WarpKind::Stairs),
        _ => None,
    };

    if let Some(kind) = probe(position) {
        return kind;
    }
    for direction in Direction::ALL {
        if let Some(kind) = probe(position.step(direction)) {
            return kind;
        }
    }
    WarpKind::RouteBoundary
}
