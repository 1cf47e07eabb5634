//! Goal-directed planning over reconstructed area grids: A* with tile-cost
//! shaping plus multi-directional frontier search for unmapped terrain.

mod astar;
mod cost;
mod frontier;
mod goal;
mod plan;

use std::collections::BTreeSet;

use crate::config::NavConfig;
use crate::map::AreaGrid;
use crate::types::{Direction, Position};

pub use cost::CostModel;
pub use goal::{NavigationGoal, PlanTarget};
pub use plan::{NoPathReason, PathPlan, PathResult};

/// Stateless planner: a pure function of grid, position, and goal.
///
/// The only persistent navigation state (the rolling position history for
/// warp-loop damping) lives in the orchestrator and is passed in per call
/// as a set of penalized cells.
#[derive(Clone, Copy, Debug)]
pub struct Pathfinder {
    cost: CostModel,
}

impl Pathfinder {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            cost: CostModel::from_config(config),
        }
    }

    /// Plans the next moves toward `target` using only grid knowledge.
    ///
    /// Refuses to plan when `current` falls outside the grid's explored
    /// bounds — that indicates stale persisted data from another session,
    /// and planning against it would produce confidently wrong moves.
    pub fn find_next_direction(
        &self,
        grid: &AreaGrid,
        current: Position,
        target: PlanTarget,
        penalized: &BTreeSet<Position>,
    ) -> PathResult {
        let in_bounds = grid
            .bounds()
            .is_some_and(|bounds| bounds.contains(current));
        if !in_bounds {
            return PathResult::NotFound(NoPathReason::OutOfSync);
        }

        match target {
            PlanTarget::Point(goal) => self.plan_to_point(grid, current, goal, penalized),
            PlanTarget::Toward(direction) => {
                self.plan_toward(grid, current, direction, penalized, NoPathReason::NoFrontier)
            }
            PlanTarget::Explore => self.plan_explore(grid, current, penalized),
        }
    }

    fn plan_to_point(
        &self,
        grid: &AreaGrid,
        current: Position,
        goal: Position,
        penalized: &BTreeSet<Position>,
    ) -> PathResult {
        match grid.tile(goal) {
            Some(symbol) if symbol.is_open_ground() || symbol.is_warp() => {
                if let Some(cells) = astar::find_path(grid, &self.cost, penalized, current, goal) {
                    return PathResult::Found(PathPlan::from_cells(grid, cells));
                }
                // Known but unreachable: probe frontiers toward it instead.
                self.degrade_to_frontier(grid, current, goal, penalized, NoPathReason::NoRoute)
            }
            Some(_) => {
                // Goal data is approximate and landed on a blocked cell; an
                // adjacent walkable cell is an acceptable stand-in.
                if let Some(cells) = self.path_to_adjacent(grid, current, goal, penalized) {
                    return PathResult::Found(PathPlan::from_cells(grid, cells));
                }
                self.degrade_to_frontier(grid, current, goal, penalized, NoPathReason::NoRoute)
            }
            None => self.degrade_to_frontier(
                grid,
                current,
                goal,
                penalized,
                NoPathReason::GoalUnexplored,
            ),
        }
    }

    /// Cheapest path to any walkable 4-neighbor of a blocked goal cell,
    /// costed with the same model A* uses (a one-step grass hop can lose to
    /// a longer walk over floor).
    fn path_to_adjacent(
        &self,
        grid: &AreaGrid,
        current: Position,
        goal: Position,
        penalized: &BTreeSet<Position>,
    ) -> Option<Vec<Position>> {
        Direction::ALL
            .into_iter()
            .map(|direction| goal.step(direction))
            .filter(|stand_in| {
                grid.tile(*stand_in)
                    .is_some_and(|symbol| symbol.is_open_ground())
            })
            .filter_map(|stand_in| astar::find_path(grid, &self.cost, penalized, current, stand_in))
            .min_by_key(|cells| self.route_cost(grid, penalized, cells))
    }

    /// Total cost of entering every cell after the start, mirroring A*'s
    /// accounting including the cross-map surcharge.
    fn route_cost(
        &self,
        grid: &AreaGrid,
        penalized: &BTreeSet<Position>,
        cells: &[Position],
    ) -> u32 {
        cells
            .iter()
            .skip(1)
            .map(|cell| {
                let mut cost = grid
                    .tile(*cell)
                    .map_or(0, |symbol| self.cost.enter_cost(symbol));
                if penalized.contains(cell) {
                    cost += self.cost.cross_map_penalty();
                }
                cost
            })
            .sum()
    }

    fn degrade_to_frontier(
        &self,
        grid: &AreaGrid,
        current: Position,
        goal: Position,
        penalized: &BTreeSet<Position>,
        reason: NoPathReason,
    ) -> PathResult {
        match PlanTarget::dominant_direction(current, goal) {
            Some(direction) => {
                match self.plan_toward(grid, current, direction, penalized, reason) {
                    PathResult::NotFound(_) => PathResult::NotFound(reason),
                    found => found,
                }
            }
            None => PathResult::NotFound(reason),
        }
    }

    /// Tries A* toward each frontier candidate in score order; the first
    /// candidate that yields a path wins. Probing perpendicular candidates
    /// after primary ones is what lets the search escape mazes instead of
    /// giving up at the first dead end.
    fn plan_toward(
        &self,
        grid: &AreaGrid,
        current: Position,
        direction: Direction,
        penalized: &BTreeSet<Position>,
        exhausted: NoPathReason,
    ) -> PathResult {
        let targets = frontier::directional_targets(grid, current, direction);
        self.first_reachable(grid, current, &targets, penalized, exhausted)
    }

    fn plan_explore(
        &self,
        grid: &AreaGrid,
        current: Position,
        penalized: &BTreeSet<Position>,
    ) -> PathResult {
        let targets = frontier::explore_targets(grid, current);
        self.first_reachable(grid, current, &targets, penalized, NoPathReason::NoFrontier)
    }

    fn first_reachable(
        &self,
        grid: &AreaGrid,
        current: Position,
        targets: &[Position],
        penalized: &BTreeSet<Position>,
        exhausted: NoPathReason,
    ) -> PathResult {
        for target in targets {
            if let Some(cells) = astar::find_path(grid, &self.cost, penalized, current, *target) {
                return PathResult::Found(PathPlan::from_cells(grid, cells));
            }
        }
        PathResult::NotFound(exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileSymbol;
    use crate::types::Tick;

    fn grid_from_rows(rows: &[&str]) -> AreaGrid {
        let mut grid = AreaGrid::anchored(Position::ORIGIN, Tick::ZERO);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let symbol = match ch {
                    '.' => TileSymbol::Floor,
                    '#' => TileSymbol::Wall,
                    'g' => TileSymbol::TallGrass,
                    'D' => TileSymbol::Door,
                    ' ' => continue,
                    other => panic!("unhandled tile char {other:?}"),
                };
                grid.set_tile(grid.local_to_grid(Position::new(x as i32, y as i32)), symbol);
            }
        }
        grid
    }

    fn at(grid: &AreaGrid, x: i32, y: i32) -> Position {
        grid.local_to_grid(Position::new(x, y))
    }

    fn pathfinder() -> Pathfinder {
        Pathfinder::new(&NavConfig::default())
    }

    fn none() -> BTreeSet<Position> {
        BTreeSet::new()
    }

    #[test]
    fn corridor_advances_straight_every_step() {
        // 3-wide corridor of floor flanked by walls, goal 5 tiles north.
        let grid = grid_from_rows(&[
            "#...#",
            "#...#",
            "#...#",
            "#...#",
            "#...#",
            "#...#",
        ]);
        let goal = at(&grid, 2, 0);
        let finder = pathfinder();

        for y in (1..=5).rev() {
            let current = at(&grid, 2, y);
            let result =
                finder.find_next_direction(&grid, current, PlanTarget::Point(goal), &none());
            let plan = result.plan().expect("corridor is fully explored");
            assert_eq!(plan.first_step(), Some(Direction::North));
            assert_eq!(plan.len(), y as usize);
            assert_eq!(plan.destination(), Some(goal));
        }
    }

    #[test]
    fn dead_end_escapes_through_perpendicular_frontier() {
        // North is walled off; an open cell two tiles east touches
        // unexplored space. The engine must go east, not give up.
        let grid = grid_from_rows(&[
            "###  ",
            ".....",
        ]);
        let finder = pathfinder();
        let result = finder.find_next_direction(
            &grid,
            at(&grid, 0, 1),
            PlanTarget::Toward(Direction::North),
            &none(),
        );
        let plan = result.plan().expect("perpendicular frontier is reachable");
        assert_eq!(plan.first_step(), Some(Direction::East));
    }

    #[test]
    fn refuses_stale_grid() {
        let grid = grid_from_rows(&["...."]);
        // A position far outside the explored bounds: persisted data from
        // some other run. The engine must refuse rather than guess.
        let result = pathfinder().find_next_direction(
            &grid,
            Position::new(0, 0),
            PlanTarget::Explore,
            &none(),
        );
        assert_eq!(result, PathResult::NotFound(NoPathReason::OutOfSync));
    }

    #[test]
    fn unexplored_goal_reports_reason_when_no_frontier_helps() {
        // Fully enclosed room: no frontiers at all.
        let grid = grid_from_rows(&[
            "####",
            "#..#",
            "####",
        ]);
        let result = pathfinder().find_next_direction(
            &grid,
            at(&grid, 1, 1),
            PlanTarget::Point(at(&grid, 20, 1)),
            &none(),
        );
        assert_eq!(result, PathResult::NotFound(NoPathReason::GoalUnexplored));
    }

    #[test]
    fn blocked_goal_settles_for_adjacent_cell() {
        let grid = grid_from_rows(&[
            ".....",
            "...#.",
            ".....",
        ]);
        let goal = at(&grid, 3, 1);
        let result = pathfinder().find_next_direction(
            &grid,
            at(&grid, 0, 1),
            PlanTarget::Point(goal),
            &none(),
        );
        let plan = result.plan().expect("adjacent stand-in exists");
        let destination = plan.destination().unwrap();
        assert_eq!(destination.manhattan(goal), 1);
    }

    #[test]
    fn blocked_goal_stand_in_is_cheapest_not_nearest() {
        // The grass neighbor is one step away (cost 100 in speedrun mode);
        // the floor neighbor above the goal costs 30 despite the longer walk.
        let grid = grid_from_rows(&[
            "...",
            ".g#",
            "...",
        ]);
        let goal = at(&grid, 2, 1);
        let result = pathfinder().find_next_direction(
            &grid,
            at(&grid, 0, 1),
            PlanTarget::Point(goal),
            &none(),
        );
        let plan = result.plan().expect("stand-in exists");
        assert_eq!(plan.destination().unwrap().manhattan(goal), 1);
        assert!(
            plan.cells()
                .iter()
                .all(|cell| grid.tile(*cell) != Some(TileSymbol::TallGrass))
        );
    }

    #[test]
    fn plans_end_at_goal_or_warp() {
        let grid = grid_from_rows(&[
            "..D..",
            ".....",
        ]);
        let finder = pathfinder();
        // Door as explicit target: plan ends on the door.
        let result = finder.find_next_direction(
            &grid,
            at(&grid, 0, 0),
            PlanTarget::Point(at(&grid, 2, 0)),
            &none(),
        );
        let plan = result.plan().unwrap();
        assert_eq!(plan.destination(), Some(at(&grid, 2, 0)));
        assert_eq!(grid.tile(plan.destination().unwrap()), Some(TileSymbol::Door));
    }

    #[test]
    fn never_plans_into_unknown_cells() {
        let grid = grid_from_rows(&[
            "...  ",
            ". .  ",
            ".....",
        ]);
        let finder = pathfinder();
        for target in [
            PlanTarget::Toward(Direction::East),
            PlanTarget::Explore,
        ] {
            if let PathResult::Found(plan) =
                finder.find_next_direction(&grid, at(&grid, 0, 0), target, &none())
            {
                for cell in plan.cells() {
                    assert!(grid.tile(*cell).is_some(), "stepped into unknown at {cell}");
                }
            }
        }
    }

    #[test]
    fn penalized_cells_are_avoided_when_alternative_exists() {
        // Two equal-length routes around a block; penalize one of them.
        let grid = grid_from_rows(&[
            "...",
            ".#.",
            "...",
        ]);
        let finder = pathfinder();
        let mut penalized = BTreeSet::new();
        penalized.insert(at(&grid, 1, 0));

        let result = finder.find_next_direction(
            &grid,
            at(&grid, 0, 1),
            PlanTarget::Point(at(&grid, 2, 1)),
            &penalized,
        );
        let plan = result.plan().unwrap();
        assert!(!plan.cells().contains(&at(&grid, 1, 0)));
    }
}
