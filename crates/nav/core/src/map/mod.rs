//! Persistent world model: tiles, per-area grids, and the store that owns
//! them together with the warp graph.

mod grid;
mod store;
mod tile;

pub use grid::{AreaGrid, Bounds};
pub use store::{AreaGridStore, WarpConnection, WarpKind};
pub use tile::TileSymbol;
