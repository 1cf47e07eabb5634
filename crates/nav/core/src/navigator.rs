//! Per-step navigation orchestration: resolves goals against the store,
//! invokes the pathfinder, and tracks recent positions to damp warp loops.

use std::collections::{BTreeSet, VecDeque};

use crate::config::NavConfig;
use crate::map::AreaGridStore;
use crate::path::{NavigationGoal, NoPathReason, PathPlan, PathResult, Pathfinder, PlanTarget};
use crate::types::{Direction, MapId, Position};

/// What the navigator wants the agent to do this step.
#[derive(Clone, Debug, PartialEq)]
pub enum NavDecision {
    /// Advance one step (a longer batched plan is attached for callers that
    /// execute several steps between re-plans).
    Step {
        direction: Direction,
        plan: PathPlan,
    },
    /// Already standing on the resolved target cell.
    Arrived,
    /// No plan can be made from map knowledge; the caller must fall back to
    /// an external decision maker.
    Defer(NoPathReason),
}

/// Thin decision layer over the pathfinder.
///
/// Owns the rolling (location, position) history — the only persistent
/// navigation state — and resolves cross-area goals against the warp graph
/// before planning within the current grid.
#[derive(Debug)]
pub struct Navigator {
    pathfinder: Pathfinder,
    history: VecDeque<(MapId, Position)>,
}

impl Navigator {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            pathfinder: Pathfinder::new(config),
            history: VecDeque::with_capacity(NavConfig::HISTORY_LEN),
        }
    }

    /// Decides the next move from the current map knowledge.
    ///
    /// Never guesses: when the goal is unreachable with what the store
    /// knows, the result is [`NavDecision::Defer`] with the reason.
    pub fn decide(
        &mut self,
        store: &AreaGridStore,
        map: MapId,
        position: Position,
        goal: NavigationGoal,
    ) -> NavDecision {
        self.record(map, position);

        let Some(grid) = store.grid(map) else {
            return NavDecision::Defer(NoPathReason::GridMissing);
        };

        let target = match self.resolve(store, map, goal) {
            Some(target) => target,
            None => PlanTarget::Explore,
        };

        if let PlanTarget::Point(goal_cell) = target {
            if goal_cell == position {
                return NavDecision::Arrived;
            }
        }

        let penalized = self.penalized(map);
        match self
            .pathfinder
            .find_next_direction(grid, position, target, &penalized)
        {
            PathResult::Found(plan) => match plan.first_step() {
                Some(direction) => NavDecision::Step { direction, plan },
                None => NavDecision::Arrived,
            },
            PathResult::NotFound(reason) => NavDecision::Defer(reason),
        }
    }

    /// Maps a navigation goal onto a target within the current grid.
    ///
    /// A goal in another area is retargeted at the first hop of the recorded
    /// warp route; `None` means no route is known yet and the caller should
    /// explore for one.
    fn resolve(
        &self,
        store: &AreaGridStore,
        map: MapId,
        goal: NavigationGoal,
    ) -> Option<PlanTarget> {
        match goal {
            NavigationGoal::Point { map: goal_map, pos } if goal_map == map => {
                Some(PlanTarget::Point(pos))
            }
            NavigationGoal::Point { map: goal_map, .. } => {
                let route = store.warp_route(map, goal_map)?;
                let hop = route.first()?;
                Some(PlanTarget::Point(hop.from_pos))
            }
            NavigationGoal::Toward(direction) => Some(PlanTarget::Toward(direction)),
            NavigationGoal::Explore => Some(PlanTarget::Explore),
        }
    }

    /// Positions recently occupied under a *different* location key.
    /// Re-entering one of those means oscillating through a warp boundary.
    fn penalized(&self, map: MapId) -> BTreeSet<Position> {
        self.history
            .iter()
            .filter(|(seen_map, _)| *seen_map != map)
            .map(|(_, position)| *position)
            .collect()
    }

    fn record(&mut self, map: MapId, position: Position) {
        if self.history.back() == Some(&(map, position)) {
            return;
        }
        if self.history.len() == NavConfig::HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back((map, position));
    }

    pub fn recent_positions(&self) -> impl Iterator<Item = (MapId, Position)> + '_ {
        self.history.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{TileSymbol, WarpConnection, WarpKind};
    use crate::observe::{RawTile, TileBehavior, TileWindow};
    use crate::stitch::MapStitcher;

    fn floor_window() -> TileWindow {
        TileWindow::from_fn(|_, _| RawTile {
            tile_id: 1,
            behavior: TileBehavior::Normal,
            collision: false,
        })
    }

    fn stitched_store(map: MapId) -> AreaGridStore {
        let mut store = AreaGridStore::new();
        let mut stitcher = MapStitcher::new(NavConfig::default());
        stitcher.integrate_observation(&mut store, map, Position::new(8, 8), &floor_window());
        store
    }

    #[test]
    fn defers_when_location_is_unmapped() {
        let store = AreaGridStore::new();
        let mut navigator = Navigator::new(&NavConfig::default());
        let decision = navigator.decide(
            &store,
            MapId(9),
            Position::ORIGIN,
            NavigationGoal::Explore,
        );
        assert_eq!(decision, NavDecision::Defer(NoPathReason::GridMissing));
    }

    #[test]
    fn steps_toward_a_point_goal() {
        let map = MapId(1);
        let store = stitched_store(map);
        let grid = store.grid(map).unwrap();
        let position = grid.local_to_grid(Position::new(8, 8));
        let goal_cell = grid.local_to_grid(Position::new(8, 5));

        let mut navigator = Navigator::new(&NavConfig::default());
        let decision = navigator.decide(
            &store,
            map,
            position,
            NavigationGoal::Point {
                map,
                pos: goal_cell,
            },
        );
        match decision {
            NavDecision::Step { direction, plan } => {
                assert_eq!(direction, Direction::North);
                assert_eq!(plan.len(), 3);
            }
            other => panic!("expected a step, got {other:?}"),
        }
    }

    #[test]
    fn arrives_when_standing_on_the_goal() {
        let map = MapId(1);
        let store = stitched_store(map);
        let position = store.grid(map).unwrap().local_to_grid(Position::new(8, 8));

        let mut navigator = Navigator::new(&NavConfig::default());
        let decision = navigator.decide(
            &store,
            map,
            position,
            NavigationGoal::Point { map, pos: position },
        );
        assert_eq!(decision, NavDecision::Arrived);
    }

    #[test]
    fn cross_area_goal_targets_the_recorded_warp() {
        let town = MapId(1);
        let house = MapId(2);
        let mut store = stitched_store(town);
        let grid = store.grid(town).unwrap();
        let position = grid.local_to_grid(Position::new(8, 8));
        let door_cell = grid.local_to_grid(Position::new(8, 4));
        store
            .grid_mut(town)
            .unwrap()
            .set_tile(door_cell, TileSymbol::Door);
        store.record_warp(WarpConnection {
            from_map: town,
            to_map: house,
            from_pos: door_cell,
            to_pos: Position::new(500, 500),
            kind: WarpKind::Door,
            approach: Some(Direction::North),
        });

        let mut navigator = Navigator::new(&NavConfig::default());
        let decision = navigator.decide(
            &store,
            town,
            position,
            NavigationGoal::Point {
                map: house,
                pos: Position::new(500, 500),
            },
        );
        match decision {
            NavDecision::Step { direction, plan } => {
                assert_eq!(direction, Direction::North);
                assert_eq!(plan.destination(), Some(door_cell));
            }
            other => panic!("expected a step toward the door, got {other:?}"),
        }
    }

    #[test]
    fn history_is_bounded_and_deduplicated() {
        let mut navigator = Navigator::new(&NavConfig::default());
        let store = AreaGridStore::new();
        for i in 0..25 {
            let _ = navigator.decide(
                &store,
                MapId(1),
                Position::new(i % 3, 0),
                NavigationGoal::Explore,
            );
        }
        assert!(navigator.recent_positions().count() <= NavConfig::HISTORY_LEN);
    }
}
