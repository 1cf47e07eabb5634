use std::sync::Mutex;

use nav_core::AreaGridStore;

use super::{MapRepository, RepositoryError};

/// In-memory repository for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryMapRepo {
    snapshot: Mutex<Option<AreaGridStore>>,
}

impl InMemoryMapRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapRepository for InMemoryMapRepo {
    fn save(&self, store: &AreaGridStore) -> Result<(), RepositoryError> {
        *self.snapshot.lock().expect("repository lock poisoned") = Some(store.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<AreaGridStore>, RepositoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("repository lock poisoned")
            .clone())
    }
}
