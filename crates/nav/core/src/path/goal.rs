use crate::types::{Direction, MapId, Position};

/// One planning cycle's objective, supplied by the external goal provider.
///
/// Constructed fresh each cycle and never persisted. The core treats the
/// goal as opaque input: it plans toward the coordinate or direction and
/// attaches no game meaning to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationGoal {
    /// A concrete target cell in a specific location.
    Point { map: MapId, pos: Position },
    /// Make progress toward one edge of the current area.
    Toward(Direction),
    /// Expand explored territory; no preferred direction.
    Explore,
}

/// A goal resolved against the current location: what the pathfinding
/// engine actually plans for within one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanTarget {
    Point(Position),
    Toward(Direction),
    Explore,
}

impl PlanTarget {
    /// Dominant direction from `from` toward a point target, used when a
    /// concrete goal degrades into frontier probing.
    pub(super) fn dominant_direction(from: Position, to: Position) -> Option<Direction> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        Some(if dx.abs() >= dy.abs() {
            if dx > 0 { Direction::East } else { Direction::West }
        } else if dy > 0 {
            Direction::South
        } else {
            Direction::North
        })
    }
}
