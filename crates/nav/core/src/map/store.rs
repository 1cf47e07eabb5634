use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::types::{Direction, MapId, Position, Tick};

use super::AreaGrid;

/// How a recorded transition between two areas was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WarpKind {
    Door,
    Stairs,
    /// Walking off the edge of one route onto the next.
    RouteBoundary,
}

/// Directed edge between two area grids.
///
/// Recorded whenever the reported location key changes between consecutive
/// observations. The return edge is recorded the same way when the agent
/// later warps back, which is what makes the graph usable for cross-area
/// planning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarpConnection {
    pub from_map: MapId,
    pub to_map: MapId,
    /// Departure position, in the source grid's coordinate space.
    pub from_pos: Position,
    /// Arrival position, in the destination grid's coordinate space.
    pub to_pos: Position,
    pub kind: WarpKind,
    /// Last intra-map step direction before the transition, when known.
    pub approach: Option<Direction>,
}

/// Owner of all persistent map knowledge: one [`AreaGrid`] per visited
/// location plus the warp connections between them.
///
/// Exactly one of these exists per agent process and it is passed explicitly
/// into the stitcher (single writer) and the pathfinding layer (reader);
/// there is no ambient global map state.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaGridStore {
    grids: BTreeMap<MapId, AreaGrid>,
    warps: Vec<WarpConnection>,
    clock: Tick,
}

impl AreaGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self, map: MapId) -> Option<&AreaGrid> {
        self.grids.get(&map)
    }

    pub(crate) fn grid_mut(&mut self, map: MapId) -> Option<&mut AreaGrid> {
        self.grids.get_mut(&map)
    }

    /// Returns the grid for `map`, creating and anchoring it on first visit.
    /// The boolean reports whether the grid was freshly created.
    pub(crate) fn grid_or_anchor(
        &mut self,
        map: MapId,
        player_local: Position,
        now: Tick,
    ) -> (&mut AreaGrid, bool) {
        let created = !self.grids.contains_key(&map);
        let grid = self
            .grids
            .entry(map)
            .or_insert_with(|| AreaGrid::anchored(player_local, now));
        (grid, created)
    }

    pub fn maps(&self) -> impl Iterator<Item = MapId> + '_ {
        self.grids.keys().copied()
    }

    pub fn area_count(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Advances the stitch clock and returns the new tick.
    pub(crate) fn tick(&mut self) -> Tick {
        self.clock = self.clock.next();
        self.clock
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Records a warp edge, ignoring exact duplicates so oscillating through
    /// a doorway does not flood the graph.
    pub(crate) fn record_warp(&mut self, connection: WarpConnection) {
        let duplicate = self.warps.iter().any(|existing| {
            existing.from_map == connection.from_map
                && existing.to_map == connection.to_map
                && existing.from_pos == connection.from_pos
        });
        if !duplicate {
            self.warps.push(connection);
        }
    }

    pub fn warps(&self) -> &[WarpConnection] {
        &self.warps
    }

    pub fn warps_from(&self, map: MapId) -> impl Iterator<Item = &WarpConnection> + '_ {
        self.warps
            .iter()
            .filter(move |connection| connection.from_map == map)
    }

    /// Breadth-first route over the warp graph from `from` to `to`.
    ///
    /// Returns the chain of connections to traverse, shortest hop count
    /// first; `None` when no recorded chain links the two areas yet.
    pub fn warp_route(&self, from: MapId, to: MapId) -> Option<Vec<WarpConnection>> {
        if from == to {
            return Some(Vec::new());
        }

        let mut visited: BTreeSet<MapId> = BTreeSet::new();
        let mut parent: BTreeMap<MapId, WarpConnection> = BTreeMap::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for connection in self.warps_from(current) {
                if !visited.insert(connection.to_map) {
                    continue;
                }
                parent.insert(connection.to_map, *connection);
                if connection.to_map == to {
                    let mut route = Vec::new();
                    let mut cursor = to;
                    while cursor != from {
                        let hop = parent[&cursor];
                        cursor = hop.from_map;
                        route.push(hop);
                    }
                    route.reverse();
                    return Some(route);
                }
                queue.push_back(connection.to_map);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileSymbol;

    fn warp(from: u32, to: u32, from_pos: Position) -> WarpConnection {
        WarpConnection {
            from_map: MapId(from),
            to_map: MapId(to),
            from_pos,
            to_pos: Position::ORIGIN,
            kind: WarpKind::Door,
            approach: None,
        }
    }

    #[test]
    fn duplicate_warps_are_ignored() {
        let mut store = AreaGridStore::new();
        store.record_warp(warp(1, 2, Position::new(3, 3)));
        store.record_warp(warp(1, 2, Position::new(3, 3)));
        assert_eq!(store.warps().len(), 1);

        // A different departure tile is a distinct edge.
        store.record_warp(warp(1, 2, Position::new(4, 3)));
        assert_eq!(store.warps().len(), 2);
    }

    #[test]
    fn warp_route_finds_multi_hop_chain() {
        let mut store = AreaGridStore::new();
        store.record_warp(warp(1, 2, Position::new(0, 0)));
        store.record_warp(warp(2, 3, Position::new(5, 5)));
        store.record_warp(warp(1, 4, Position::new(9, 9)));

        let route = store.warp_route(MapId(1), MapId(3)).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0].from_map, MapId(1));
        assert_eq!(route[0].to_map, MapId(2));
        assert_eq!(route[1].to_map, MapId(3));

        assert_eq!(store.warp_route(MapId(3), MapId(1)), None);
        assert_eq!(store.warp_route(MapId(2), MapId(2)), Some(Vec::new()));
    }

    #[test]
    fn grid_or_anchor_creates_once() {
        let mut store = AreaGridStore::new();
        let now = store.tick();
        let (grid, created) = store.grid_or_anchor(MapId(7), Position::new(4, 4), now);
        assert!(created);
        grid.set_tile(Position::new(500, 500), TileSymbol::Floor);

        let (grid, created) = store.grid_or_anchor(MapId(7), Position::new(9, 9), now);
        assert!(!created);
        // Origin offset from the first visit still applies.
        assert_eq!(grid.tile(Position::new(500, 500)), Some(TileSymbol::Floor));
    }
}
