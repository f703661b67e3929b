//! Session orchestration for Echoes of Auren.
//!
//! This crate wires validated content, the player record and save-slot
//! storage into a [`Session`] that clients drive with plain requests.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the player, the active encounter and the roll stream
//! - [`oracle`] loads and validates content and hands out game environments
//! - [`repository`] persists the player to numbered save slots
//! - [`normalize`] repairs saves that no longer match the content
//! - [`config`] reads runtime settings from the environment
pub mod config;
pub mod error;
pub mod normalize;
pub mod oracle;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use normalize::{Adjustment, normalize_player};
pub use oracle::OracleManager;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository, SaveSlot,
};
pub use session::Session;
