//! Repository contract for saving and loading the player.

use auren_core::Player;

use super::{Result, SaveSlot};

/// Repository for player persistence
///
/// Saves are whole player records; a load either returns the complete record
/// or fails, never a partial one.
pub trait SaveRepository: Send + Sync {
    /// Save the player into a slot, replacing what was there.
    fn save(&self, slot: SaveSlot, player: &Player) -> Result<()>;

    /// Load the player from a slot. `None` for an empty slot.
    fn load(&self, slot: SaveSlot) -> Result<Option<Player>>;

    /// Check if a slot holds a save
    fn exists(&self, slot: SaveSlot) -> bool;

    /// Delete a save
    fn delete(&self, slot: SaveSlot) -> Result<()>;

    /// List all occupied slots
    fn list_slots(&self) -> Result<Vec<SaveSlot>> {
        Ok(SaveSlot::all().filter(|slot| self.exists(*slot)).collect())
    }
}
