//! Equipment catalog loader.

use std::path::Path;

use auren_core::env::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for the equipment catalog.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auren_core::env::{EquipSlot, Special};

    #[test]
    fn parses_optional_fields() {
        let items = ItemLoader::parse(
            r#"(items: [
                (id: "stick", name: "Stick", slot: weapon),
                (
                    id: "robe",
                    name: "Robe",
                    slot: armor,
                    stats: (defense: 2),
                    special: Some(Resist(element: fire, percent: 50)),
                ),
            ])"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].stats.is_zero());
        assert_eq!(items[1].slot, EquipSlot::Armor);
        assert_eq!(items[1].stats.defense, 2);
        assert!(matches!(
            items[1].special,
            Some(Special::Resist { percent: 50, .. })
        ));
    }

    #[test]
    fn reports_parse_errors() {
        let err = ItemLoader::parse("(items: [(id: \"x\")])").unwrap_err();
        assert!(err.to_string().contains("item catalog"));
    }
}
