//! Runtime wrapper around the static content tables.
//!
//! [`OracleManager`] owns one validated [`ContentSnapshot`] and the PCG roll
//! oracle, and builds [`GameEnv`] views on demand. The data is immutable at
//! runtime; dynamic state lives on the player and in repositories.

use std::path::Path;
use std::sync::Arc;

use auren_content::{ContentFactory, validate};
use auren_core::env::PcgRng;
use auren_core::{ContentSnapshot, GameEnv};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// Validated content plus the roll oracle. Cheap to clone.
#[derive(Clone)]
pub struct OracleManager {
    content: Arc<ContentSnapshot>,
    rng: PcgRng,
}

impl OracleManager {
    /// Wraps a snapshot after checking its cross-table references.
    ///
    /// # Errors
    ///
    /// `RuntimeError::InvalidContent` listing every issue found.
    pub fn new(content: ContentSnapshot) -> Result<Self> {
        let issues = validate(&content);
        if !issues.is_empty() {
            for issue in &issues {
                tracing::error!(%issue, "invalid content");
            }
            return Err(RuntimeError::InvalidContent(issues));
        }

        tracing::debug!(
            monsters = content.monsters.len(),
            items = content.items.len(),
            quests = content.main_quest.len() + content.side_quests.len(),
            "content loaded"
        );
        Ok(Self {
            content: Arc::new(content),
            rng: PcgRng, // PcgRng is stateless
        })
    }

    /// Content compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let content =
            auren_content::bundled().map_err(|e| RuntimeError::ContentLoad(format!("{e:#}")))?;
        Self::new(content)
    }

    /// Content read from a data directory.
    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        let content = ContentFactory::new(data_dir)
            .load_snapshot()
            .map_err(|e| RuntimeError::ContentLoad(format!("{e:#}")))?;
        Self::new(content)
    }

    /// Loads content the way the configuration asks for.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        match &config.content_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "loading content from data directory");
                Self::from_dir(dir)
            }
            None => Self::bundled(),
        }
    }

    /// Converts oracle manager into GameEnv for auren-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::from_snapshot(&self.content, &self.rng)
    }

    pub fn content(&self) -> &ContentSnapshot {
        &self.content
    }
}
