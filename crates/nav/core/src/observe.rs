//! Raw tile observations as delivered by the sensing layer, plus the single
//! classification function that turns them into [`TileSymbol`]s.

use crate::map::TileSymbol;
use crate::types::Direction;

/// Radius of the observation window around the player.
pub const WINDOW_RADIUS: i32 = 7;
/// Side length of the observation window (2 * radius + 1).
pub const WINDOW_SIZE: usize = 15;

/// Behavior classification reported alongside each raw tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileBehavior {
    Normal,
    TallGrass,
    Door,
    Stairs,
    Ledge(Direction),
    /// Diagonal ledge variants; no diagonal movement exists, so these are
    /// treated as impassable.
    LedgeDiagonal,
    /// Tile data could not be read (out of bounds, mid-load, corrupt).
    Unreadable,
}

/// One raw tile triple from the observation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawTile {
    pub tile_id: u16,
    pub behavior: TileBehavior,
    pub collision: bool,
}

impl RawTile {
    pub fn unreadable() -> Self {
        Self {
            tile_id: 0,
            behavior: TileBehavior::Unreadable,
            collision: true,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        self.behavior == TileBehavior::Unreadable
    }

    /// Classifies this raw reading into a tile symbol.
    ///
    /// Collision-flagged tiles with no special behavior are plain walls;
    /// door/stairs/ledge behavior takes precedence over the collision flag
    /// so warp tiles and ledges keep their semantics either way the sensor
    /// reports them.
    pub fn classify(&self) -> TileSymbol {
        match self.behavior {
            TileBehavior::Unreadable => TileSymbol::Unknown,
            TileBehavior::Door => TileSymbol::Door,
            TileBehavior::Stairs => TileSymbol::Stairs,
            TileBehavior::Ledge(direction) => TileSymbol::Ledge(direction),
            TileBehavior::LedgeDiagonal => TileSymbol::Wall,
            TileBehavior::TallGrass if !self.collision => TileSymbol::TallGrass,
            TileBehavior::TallGrass => TileSymbol::Wall,
            TileBehavior::Normal if self.collision => TileSymbol::Wall,
            TileBehavior::Normal => TileSymbol::Floor,
        }
    }
}

/// Malformed observation window shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("expected {WINDOW_SIZE} rows, got {rows}")]
    WrongHeight { rows: usize },

    #[error("row {row} has {len} tiles, expected {WINDOW_SIZE}")]
    WrongWidth { row: usize, len: usize },
}

/// Fixed 15x15 window of raw tiles centered on the player.
///
/// Offsets run from `-WINDOW_RADIUS` to `+WINDOW_RADIUS` on both axes, with
/// `(0, 0)` the player's own tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileWindow {
    cells: Vec<RawTile>,
}

impl TileWindow {
    /// Builds a window from row-major rows (north row first).
    pub fn from_rows(rows: Vec<Vec<RawTile>>) -> Result<Self, WindowError> {
        if rows.len() != WINDOW_SIZE {
            return Err(WindowError::WrongHeight { rows: rows.len() });
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != WINDOW_SIZE {
                return Err(WindowError::WrongWidth {
                    row,
                    len: cells.len(),
                });
            }
        }
        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds a window by sampling a closure at every offset.
    pub fn from_fn(mut tile_at: impl FnMut(i32, i32) -> RawTile) -> Self {
        let mut cells = Vec::with_capacity(WINDOW_SIZE * WINDOW_SIZE);
        for dy in -WINDOW_RADIUS..=WINDOW_RADIUS {
            for dx in -WINDOW_RADIUS..=WINDOW_RADIUS {
                cells.push(tile_at(dx, dy));
            }
        }
        Self { cells }
    }

    pub fn get(&self, dx: i32, dy: i32) -> Option<&RawTile> {
        if dx.abs() > WINDOW_RADIUS || dy.abs() > WINDOW_RADIUS {
            return None;
        }
        let row = (dy + WINDOW_RADIUS) as usize;
        let col = (dx + WINDOW_RADIUS) as usize;
        self.cells.get(row * WINDOW_SIZE + col)
    }

    /// Iterates `(dx, dy, tile)` over every cell in the window.
    pub fn iter_offsets(&self) -> impl Iterator<Item = (i32, i32, RawTile)> + '_ {
        self.cells.iter().enumerate().map(|(index, tile)| {
            let dx = (index % WINDOW_SIZE) as i32 - WINDOW_RADIUS;
            let dy = (index / WINDOW_SIZE) as i32 - WINDOW_RADIUS;
            (dx, dy, *tile)
        })
    }

    pub fn unreadable_count(&self) -> usize {
        self.cells.iter().filter(|tile| tile.is_unreadable()).count()
    }

    pub fn unreadable_fraction(&self) -> f64 {
        self.unreadable_count() as f64 / self.cells.len() as f64
    }
}
