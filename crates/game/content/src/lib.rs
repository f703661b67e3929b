//! Data-driven content for Echoes of Auren.
//!
//! This crate houses the static game content and the loaders for its data
//! files:
//! - Status effects, equipment, codex entries and monsters (RON)
//! - The main-quest chain and side-quest pool (RON)
//! - Balance rules (TOML)
//!
//! Everything is parsed straight into `auren-core` types and assembled into a
//! [`ContentSnapshot`](auren_core::ContentSnapshot). A copy of the shipped data
//! is compiled in and available through [`bundled`]. Content never appears in
//! save files; [`validate()`] checks the cross-table references before a
//! session starts.

pub mod validate;

#[cfg(feature = "loaders")]
mod bundled;
#[cfg(feature = "loaders")]
pub mod loaders;

pub use validate::{ValidationIssue, validate};

#[cfg(feature = "loaders")]
pub use bundled::bundled;
#[cfg(feature = "loaders")]
pub use loaders::{
    CodexLoader, ContentFactory, EffectLoader, ItemLoader, LoadResult, MonsterLoader,
    QuestCatalog, QuestLoader, TablesLoader,
};
