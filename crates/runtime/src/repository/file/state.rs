//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use auren_core::Player;

use crate::repository::{RepositoryError, Result, SaveRepository, SaveSlot};

/// File-based implementation of SaveRepository.
///
/// # File Format
///
/// Each slot is stored as `save_{slot}.json`, pretty-printed so saves stay
/// readable and hand-editable. Writes go to a temp file first and are renamed
/// into place, so a crash never leaves a half-written save behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a slot file.
    fn slot_path(&self, slot: SaveSlot) -> PathBuf {
        self.base_dir.join(slot.file_name())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: SaveSlot, player: &Player) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(player)?;

        // Write to temp file
        fs::write(&temp_path, json)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot {} to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<Player>> {
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let player: Player =
            serde_json::from_str(&json).map_err(|e| RepositoryError::CorruptedData {
                slot: slot.get(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Loaded slot {} from {}", slot, path.display());

        Ok(Some(player))
    }

    fn exists(&self, slot: SaveSlot) -> bool {
        self.slot_path(slot).exists()
    }

    fn delete(&self, slot: SaveSlot) -> Result<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted slot {}", slot);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auren_core::RulesTable;

    fn slot(n: u8) -> SaveSlot {
        SaveSlot::new(n).unwrap()
    }

    #[test]
    fn save_then_load_returns_the_same_player() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let mut player = Player::new("Ash", &RulesTable::default(), None);
        player.gold = 77;

        repo.save(slot(2), &player).unwrap();

        assert!(dir.path().join("save_2.json").exists());
        assert!(!dir.path().join("save_2.json.tmp").exists());
        assert_eq!(repo.load(slot(2)).unwrap(), Some(player));
        assert_eq!(repo.list_slots().unwrap(), vec![slot(2)]);
    }

    #[test]
    fn empty_slot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();

        assert_eq!(repo.load(slot(1)).unwrap(), None);
        assert!(repo.list_slots().unwrap().is_empty());
    }

    #[test]
    fn corrupted_file_fails_without_partial_data() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("save_3.json"), "{ \"name\": \"Ash\", ").unwrap();

        let err = repo.load(slot(3)).unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptedData { slot: 3, .. }));
    }

    #[test]
    fn delete_empties_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let player = Player::new("Ash", &RulesTable::default(), None);

        repo.save(slot(1), &player).unwrap();
        repo.delete(slot(1)).unwrap();
        repo.delete(slot(1)).unwrap();

        assert!(!repo.exists(slot(1)));
    }
}
