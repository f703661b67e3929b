/// Compile-time capacities and fixed identifiers shared by the rules.
///
/// Tunable balance numbers live in [`RulesTable`](crate::env::RulesTable) and
/// are loaded with the rest of the content; the values here size fixed
/// containers and therefore cannot change at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active timed effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== save slots =====
    pub const SAVE_SLOTS: u8 = 3;
}
