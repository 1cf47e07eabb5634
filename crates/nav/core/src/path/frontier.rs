//! Frontier detection and target ordering for exploration through
//! partially-mapped terrain.

use crate::config::NavConfig;
use crate::map::AreaGrid;
use crate::types::{Direction, Position};

/// Score reduction for candidates dead ahead on the goal axis (sideways
/// offset below [`PERPENDICULAR_MIN_OFFSET`]); off-axis primaries compete
/// unboosted.
const PRIMARY_BONUS: f64 = 5.0;
/// Distance-to-player weight for primary candidates.
const PRIMARY_PLAYER_WEIGHT: f64 = 0.1;
/// Distance-to-player weight for perpendicular candidates.
const PERPENDICULAR_PLAYER_WEIGHT: f64 = 0.2;
/// Minimum sideways offset for a perpendicular candidate.
const PERPENDICULAR_MIN_OFFSET: i32 = 2;
/// How far a perpendicular candidate may regress on the primary axis.
const PRIMARY_REGRESSION_WINDOW: i32 = 2;
/// Upper bound on A* attempts per planning call.
const MAX_TARGETS: usize = 24;

/// A walkable cell adjacent to at least one unexplored cell.
pub(super) fn is_frontier(grid: &AreaGrid, position: Position) -> bool {
    match grid.tile(position) {
        Some(symbol) if symbol.is_open_ground() => Direction::ALL
            .into_iter()
            .any(|direction| grid.tile(position.step(direction)).is_none()),
        _ => false,
    }
}

fn frontier_cells(grid: &AreaGrid, player: Position) -> impl Iterator<Item = Position> + '_ {
    grid.tiles()
        .map(|(position, _)| position)
        .filter(move |position| *position != player && is_frontier(grid, *position))
}

/// Frontier targets for a directional goal, best candidates first.
///
/// Primary candidates make monotonic progress along the goal axis;
/// perpendicular candidates probe sideways (>= 2 tiles off-axis, within a
/// small non-regression window) so the search can escape mazes whose direct
/// route is walled off. All primaries are tried before any perpendicular.
pub(super) fn directional_targets(
    grid: &AreaGrid,
    player: Position,
    toward: Direction,
) -> Vec<Position> {
    let (dx, dy) = toward.delta();
    let goal_point = player.offset(
        dx * NavConfig::FRONTIER_HORIZON,
        dy * NavConfig::FRONTIER_HORIZON,
    );

    let mut primary: Vec<(f64, Position)> = Vec::new();
    let mut perpendicular: Vec<(f64, Position)> = Vec::new();

    for cell in frontier_cells(grid, player) {
        let to_goal = f64::from(cell.manhattan(goal_point));
        let to_player = f64::from(cell.manhattan(player));

        if primary_progress(player, cell, toward) > 0 {
            let bonus = if perpendicular_offset(player, cell, toward) < PERPENDICULAR_MIN_OFFSET {
                PRIMARY_BONUS
            } else {
                0.0
            };
            let score = to_goal + PRIMARY_PLAYER_WEIGHT * to_player - bonus;
            primary.push((score, cell));
        } else if perpendicular_offset(player, cell, toward) >= PERPENDICULAR_MIN_OFFSET
            && primary_progress(player, cell, toward) >= -PRIMARY_REGRESSION_WINDOW
        {
            let score = to_goal + PERPENDICULAR_PLAYER_WEIGHT * to_player;
            perpendicular.push((score, cell));
        }
    }

    sort_by_score(&mut primary);
    sort_by_score(&mut perpendicular);

    primary
        .into_iter()
        .chain(perpendicular)
        .map(|(_, cell)| cell)
        .take(MAX_TARGETS)
        .collect()
}

/// Frontier targets for an undirected explore goal: nearest first.
pub(super) fn explore_targets(grid: &AreaGrid, player: Position) -> Vec<Position> {
    let mut candidates: Vec<(f64, Position)> = frontier_cells(grid, player)
        .map(|cell| (f64::from(cell.manhattan(player)), cell))
        .collect();
    sort_by_score(&mut candidates);
    candidates
        .into_iter()
        .map(|(_, cell)| cell)
        .take(MAX_TARGETS)
        .collect()
}

/// Signed progress of `cell` relative to `player` along the goal axis;
/// positive means closer to the goal edge.
fn primary_progress(player: Position, cell: Position, toward: Direction) -> i32 {
    match toward {
        Direction::North => player.y - cell.y,
        Direction::South => cell.y - player.y,
        Direction::East => cell.x - player.x,
        Direction::West => player.x - cell.x,
    }
}

fn perpendicular_offset(player: Position, cell: Position, toward: Direction) -> i32 {
    match toward {
        Direction::North | Direction::South => (cell.x - player.x).abs(),
        Direction::East | Direction::West => (cell.y - player.y).abs(),
    }
}

fn sort_by_score(candidates: &mut [(f64, Position)]) {
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileSymbol;
    use crate::types::Tick;

    fn open_grid(cells: &[(i32, i32)]) -> AreaGrid {
        let mut grid = AreaGrid::anchored(Position::ORIGIN, Tick::ZERO);
        for (x, y) in cells {
            grid.set_tile(Position::new(*x, *y), TileSymbol::Floor);
        }
        grid
    }

    #[test]
    fn frontier_requires_missing_neighbor() {
        // Center cell fully surrounded by known tiles: not a frontier.
        let grid = open_grid(&[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)]);
        assert!(!is_frontier(&grid, Position::new(0, 0)));
        // Edge cells still touch unexplored space.
        assert!(is_frontier(&grid, Position::new(1, 0)));
    }

    #[test]
    fn walls_are_not_frontiers() {
        let mut grid = open_grid(&[(0, 0)]);
        grid.set_tile(Position::new(1, 0), TileSymbol::Wall);
        assert!(!is_frontier(&grid, Position::new(1, 0)));
    }

    #[test]
    fn primary_candidates_come_before_perpendicular() {
        // Player at (0,0); one frontier north of it, one far east.
        let grid = open_grid(&[(0, 0), (0, -1), (4, 0)]);
        let player = Position::new(0, 0);
        let targets = directional_targets(&grid, player, Direction::North);
        assert_eq!(targets[0], Position::new(0, -1));
        assert!(targets.contains(&Position::new(4, 0)));
    }

    #[test]
    fn dead_ahead_primary_outranks_offset_primary() {
        // (2,-6) scores nearer the projected goal point (44.8 vs 45.3), but
        // (0,-3) sits straight on the goal axis and the boost puts it first.
        let grid = open_grid(&[(0, 0), (0, -3), (2, -6)]);
        let targets = directional_targets(&grid, Position::new(0, 0), Direction::North);
        assert_eq!(targets[0], Position::new(0, -3));
        assert_eq!(targets[1], Position::new(2, -6));
    }

    #[test]
    fn perpendicular_needs_two_tiles_of_offset() {
        // A frontier only 1 tile east and not ahead: not a candidate.
        let grid = open_grid(&[(0, 0), (1, 0)]);
        let targets = directional_targets(&grid, Position::new(0, 0), Direction::North);
        assert!(targets.is_empty());
    }

    #[test]
    fn regressing_candidates_are_dropped() {
        // Far behind on the primary axis: outside the regression window.
        let grid = open_grid(&[(0, 0), (3, 5)]);
        let targets = directional_targets(&grid, Position::new(0, 0), Direction::North);
        assert!(targets.is_empty());
    }

    #[test]
    fn explore_orders_by_distance() {
        let grid = open_grid(&[(0, 0), (5, 0), (2, 0)]);
        let targets = explore_targets(&grid, Position::new(0, 0));
        assert_eq!(targets.first(), Some(&Position::new(2, 0)));
    }
}
