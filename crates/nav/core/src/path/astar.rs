use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::config::NavConfig;
use crate::map::AreaGrid;
use crate::types::{Direction, Position};

use super::cost::CostModel;

/// Whether `position` may be stepped onto while moving in `approach`.
///
/// Absent cells are unexplored and never admitted. Warp tiles (door/stairs)
/// are admitted only as the final target, since stepping onto one ends the
/// plan's coordinate validity.
fn can_enter(grid: &AreaGrid, position: Position, approach: Direction, is_goal: bool) -> bool {
    match grid.tile(position) {
        Some(symbol) if symbol.is_warp() => is_goal,
        Some(symbol) => symbol.is_walkable(approach),
        None => false,
    }
}

/// A* over 4-neighborhoods with Manhattan heuristic.
///
/// Returns the cell sequence from `start` to `goal` inclusive, or `None`
/// when no route exists through known walkable tiles. `penalized` cells get
/// the cross-map surcharge instead of being forbidden outright, so a warp
/// mouth is still usable when it is the only way through.
pub(super) fn find_path(
    grid: &AreaGrid,
    cost: &CostModel,
    penalized: &BTreeSet<Position>,
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut open: BinaryHeap<Reverse<(u32, Position)>> = BinaryHeap::new();
    let mut came_from: BTreeMap<Position, Position> = BTreeMap::new();
    let mut g_score: BTreeMap<Position, u32> = BTreeMap::new();

    g_score.insert(start, 0);
    open.push(Reverse((heuristic(cost, start, goal), start)));

    let mut iterations = 0usize;
    while let Some(Reverse((_, current))) = open.pop() {
        iterations += 1;
        if iterations > NavConfig::ASTAR_MAX_ITERATIONS {
            return None;
        }

        if current == goal {
            return Some(reconstruct(came_from, current));
        }

        let current_g = g_score[&current];
        for direction in Direction::ALL {
            let neighbor = current.step(direction);
            if !can_enter(grid, neighbor, direction, neighbor == goal) {
                continue;
            }

            let symbol = grid.tile(neighbor).expect("can_enter implies known tile");
            let mut tentative = current_g + cost.enter_cost(symbol);
            if penalized.contains(&neighbor) {
                tentative += cost.cross_map_penalty();
            }

            if tentative < g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                open.push(Reverse((tentative + heuristic(cost, neighbor, goal), neighbor)));
            }
        }
    }

    None
}

/// Manhattan distance scaled by the cheapest enter cost, so the estimate
/// never exceeds the true remaining cost regardless of travel mode.
fn heuristic(cost: &CostModel, from: Position, to: Position) -> u32 {
    from.manhattan(to) * cost.min_enter_cost()
}

fn reconstruct(came_from: BTreeMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut cells = vec![current];
    while let Some(previous) = came_from.get(&current) {
        current = *previous;
        cells.push(current);
    }
    cells.reverse();
    cells
}
