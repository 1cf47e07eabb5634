//! Repository layer for the durable map store.
//!
//! Repositories handle the data that accumulates during play (area grids
//! and warp connections). Everything else in the pipeline is transient and
//! recomputed per step.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileMapRepository;
pub use memory::InMemoryMapRepo;
pub use traits::MapRepository;
