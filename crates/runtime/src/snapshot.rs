//! Read-only diagnostic views of the map store.
//!
//! These exist for visualization and debugging; nothing here can mutate
//! grid contents.

use std::collections::BTreeMap;

use nav_core::{AreaGridStore, MapId};
use serde::Serialize;

/// Summary of one area grid, serializable for dashboards and logs.
#[derive(Clone, Debug, Serialize)]
pub struct GridSnapshot {
    pub map: u32,
    /// (min_x, min_y, max_x, max_y) of the explored extent.
    pub bounds: Option<(i32, i32, i32, i32)>,
    pub explored_cells: usize,
    pub explored_fraction: f64,
    pub visited_count: u32,
    /// Count of known cells per tile class.
    pub tile_histogram: BTreeMap<&'static str, usize>,
    pub outgoing_warps: usize,
}

/// Builds a snapshot of one area, or `None` when the location is unmapped.
pub fn grid_snapshot(store: &AreaGridStore, map: MapId) -> Option<GridSnapshot> {
    let grid = store.grid(map)?;

    let mut tile_histogram: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (_, symbol) in grid.tiles() {
        *tile_histogram.entry(symbol.label()).or_default() += 1;
    }

    Some(GridSnapshot {
        map: map.0,
        bounds: grid
            .bounds()
            .map(|b| (b.min.x, b.min.y, b.max.x, b.max.y)),
        explored_cells: grid.explored_cells(),
        explored_fraction: grid.explored_fraction(),
        visited_count: grid.visited_count(),
        tile_histogram,
        outgoing_warps: store.warps_from(map).count(),
    })
}

/// JSON rendering of a grid snapshot for log attachments.
pub fn grid_snapshot_json(store: &AreaGridStore, map: MapId) -> Option<String> {
    grid_snapshot(store, map)
        .as_ref()
        .and_then(|snapshot| serde_json::to_string_pretty(snapshot).ok())
}
