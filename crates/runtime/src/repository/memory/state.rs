//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use auren_core::Player;

use crate::repository::{RepositoryError, Result, SaveRepository, SaveSlot};

/// In-memory implementation of SaveRepository.
///
/// Stores players by slot for testing and local development.
pub struct InMemorySaveRepository {
    saves: RwLock<HashMap<SaveSlot, Player>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            saves: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySaveRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: SaveSlot, player: &Player) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot, player.clone());
        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<Player>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(&slot).cloned())
    }

    fn exists(&self, slot: SaveSlot) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(&slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: SaveSlot) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(&slot);
        Ok(())
    }
}
