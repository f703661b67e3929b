//! Balance rules loader.

use std::path::Path;

use auren_core::RulesTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for the balance rules from TOML files.
///
/// Every section and key is optional; missing values keep the built-in
/// defaults.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<RulesTable> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<RulesTable> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let rules = TablesLoader::parse("[progression]\nmax_level = 20\n").unwrap();

        assert_eq!(rules.progression.max_level, 20);
        assert_eq!(rules.progression.base_xp_threshold, 40);
        assert_eq!(rules.consumables, RulesTable::default().consumables);
    }

    #[test]
    fn empty_file_is_the_default_table() {
        assert_eq!(TablesLoader::parse("").unwrap(), RulesTable::default());
    }
}
