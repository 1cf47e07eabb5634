use nav_core::AreaGridStore;

use super::RepositoryError;

/// Durable storage for the map store.
///
/// Save/load must round-trip exactly: a reloaded store is
/// indistinguishable from the one that was saved (same tiles, bounds,
/// origin offsets, warp connections).
pub trait MapRepository: Send + Sync {
    fn save(&self, store: &AreaGridStore) -> Result<(), RepositoryError>;

    /// Loads the persisted store, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AreaGridStore>, RepositoryError>;
}
