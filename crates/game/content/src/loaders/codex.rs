//! Codex (echo) catalog loader.

use std::path::Path;

use auren_core::env::CodexEntry;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodexCatalog {
    pub entries: Vec<CodexEntry>,
}

/// Loader for codex entries from RON files.
pub struct CodexLoader;

impl CodexLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CodexEntry>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CodexEntry>> {
        let catalog: CodexCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse codex catalog RON: {}", e))?;

        Ok(catalog.entries)
    }
}
