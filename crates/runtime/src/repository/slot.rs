use std::fmt;
use std::str::FromStr;

use auren_core::GameConfig;

use super::RepositoryError;

/// A validated save slot number, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaveSlot(u8);

impl SaveSlot {
    pub const MAX: u8 = GameConfig::SAVE_SLOTS;

    pub fn new(slot: u8) -> Result<Self, RepositoryError> {
        if (1..=Self::MAX).contains(&slot) {
            Ok(Self(slot))
        } else {
            Err(RepositoryError::InvalidSlot {
                slot,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every slot in order.
    pub fn all() -> impl Iterator<Item = SaveSlot> {
        (1..=Self::MAX).map(SaveSlot)
    }

    /// File name used by file-backed repositories.
    pub fn file_name(self) -> String {
        format!("save_{}.json", self.0)
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SaveSlot {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slot = s
            .trim()
            .parse::<u8>()
            .map_err(|_| RepositoryError::InvalidSlot {
                slot: 0,
                max: Self::MAX,
            })?;
        Self::new(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_one_based() {
        assert!(SaveSlot::new(0).is_err());
        assert_eq!(SaveSlot::new(3).unwrap().file_name(), "save_3.json");
        assert!(SaveSlot::new(4).is_err());
        assert_eq!(SaveSlot::all().count(), 3);
        assert_eq!("2".parse::<SaveSlot>().unwrap().get(), 2);
        assert!("two".parse::<SaveSlot>().is_err());
    }
}
