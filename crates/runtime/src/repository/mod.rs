//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during gameplay: the player record
//! kept in save slots. Static game content (monsters, items, quests) is
//! handled by the [`OracleManager`](crate::oracle::OracleManager), not
//! repositories.

mod error;
mod file;
mod memory;
mod slot;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use slot::SaveSlot;
pub use traits::SaveRepository;
