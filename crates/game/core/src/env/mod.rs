//! Traits describing read-only game content.
//!
//! Oracles expose monster templates, equipment, effect definitions, codex
//! entries, quest definitions and the balance rules table. The [`Env`]
//! aggregate bundles them so the rules can access everything they need
//! without hard coupling to concrete implementations.
mod codex;
mod effects;
mod error;
mod items;
mod monsters;
mod quests;
mod rng;
mod snapshot;
mod tables;

pub use codex::{CodexEntry, CodexOracle, CombatStartEffect, PermanentBonus};
pub use effects::{EffectDefinition, EffectKind, EffectOracle, Element};
pub use error::OracleError;
pub use items::{EquipSlot, ItemDefinition, ItemOracle, OnHitProc, Special, StatModifiers};
pub use monsters::{Behavior, BehaviorEntry, LootEntry, MonsterOracle, MonsterTemplate, Trigger};
pub use quests::{
    MainQuestStep, NextStep, Objective, QuestOracle, QuestReward, SideQuest, StoryPath,
    WorldChange,
};
pub use rng::{FixedRng, PcgRng, RngOracle, RollContext, RollStream, compute_seed};
pub use snapshot::ContentSnapshot;
pub use tables::{
    ConsumableRules, MapDimensions, ProgressionRules, QuestRules, RulesTable, StartingKit,
    TablesOracle, WorldRules,
};

/// Aggregates read-only oracles required by the rules.
pub struct Env<'a, M, I, E, X, Q, T, R>
where
    M: MonsterOracle + ?Sized,
    I: ItemOracle + ?Sized,
    E: EffectOracle + ?Sized,
    X: CodexOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    monsters: Option<&'a M>,
    items: Option<&'a I>,
    effects: Option<&'a E>,
    codex: Option<&'a X>,
    quests: Option<&'a Q>,
    tables: Option<&'a T>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn MonsterOracle + 'a,
    dyn ItemOracle + 'a,
    dyn EffectOracle + 'a,
    dyn CodexOracle + 'a,
    dyn QuestOracle + 'a,
    dyn TablesOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, I, E, X, Q, T, R> Env<'a, M, I, E, X, Q, T, R>
where
    M: MonsterOracle + ?Sized,
    I: ItemOracle + ?Sized,
    E: EffectOracle + ?Sized,
    X: CodexOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        monsters: Option<&'a M>,
        items: Option<&'a I>,
        effects: Option<&'a E>,
        codex: Option<&'a X>,
        quests: Option<&'a Q>,
        tables: Option<&'a T>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            monsters,
            items,
            effects,
            codex,
            quests,
            tables,
            rng,
        }
    }

    pub fn with_all(
        monsters: &'a M,
        items: &'a I,
        effects: &'a E,
        codex: &'a X,
        quests: &'a Q,
        tables: &'a T,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(monsters),
            Some(items),
            Some(effects),
            Some(codex),
            Some(quests),
            Some(tables),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            monsters: None,
            items: None,
            effects: None,
            codex: None,
            quests: None,
            tables: None,
            rng: None,
        }
    }

    /// Returns the MonsterOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MonstersNotAvailable` if no monster oracle was provided.
    pub fn monsters(&self) -> Result<&'a M, OracleError> {
        self.monsters.ok_or(OracleError::MonstersNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no items oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the EffectOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EffectsNotAvailable` if no effect oracle was provided.
    pub fn effects(&self) -> Result<&'a E, OracleError> {
        self.effects.ok_or(OracleError::EffectsNotAvailable)
    }

    /// Returns the CodexOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CodexNotAvailable` if no codex oracle was provided.
    pub fn codex(&self) -> Result<&'a X, OracleError> {
        self.codex.ok_or(OracleError::CodexNotAvailable)
    }

    /// Returns the QuestOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::QuestsNotAvailable` if no quest oracle was provided.
    pub fn quests(&self) -> Result<&'a Q, OracleError> {
        self.quests.ok_or(OracleError::QuestsNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TablesNotAvailable` if no tables oracle was provided.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the balance rules from the tables oracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TablesNotAvailable` if no tables oracle was provided.
    pub fn rules(&self) -> Result<&'a RulesTable, OracleError> {
        Ok(self.tables()?.rules())
    }

    /// Looks up an item; unknown ids and a missing oracle both yield `None`.
    pub fn item(&self, id: &str) -> Option<&'a ItemDefinition> {
        self.items.and_then(|items| items.definition(id))
    }

    /// Looks up an effect; unknown ids and a missing oracle both yield `None`.
    pub fn effect(&self, id: &str) -> Option<&'a EffectDefinition> {
        self.effects.and_then(|effects| effects.effect(id))
    }

    /// Looks up a codex entry; unknown ids and a missing oracle both yield `None`.
    pub fn codex_entry(&self, id: &str) -> Option<&'a CodexEntry> {
        self.codex.and_then(|codex| codex.entry(id))
    }
}

impl<'a> GameEnv<'a> {
    /// Builds an environment where every content oracle is backed by one
    /// snapshot.
    pub fn from_snapshot(snapshot: &'a ContentSnapshot, rng: &'a dyn RngOracle) -> Self {
        Self::with_all(snapshot, snapshot, snapshot, snapshot, snapshot, snapshot, rng)
    }
}

// Manual impls: the oracles are borrowed, so copying never requires the
// oracle types themselves to be `Clone`.
impl<M, I, E, X, Q, T, R> Clone for Env<'_, M, I, E, X, Q, T, R>
where
    M: MonsterOracle + ?Sized,
    I: ItemOracle + ?Sized,
    E: EffectOracle + ?Sized,
    X: CodexOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, I, E, X, Q, T, R> Copy for Env<'_, M, I, E, X, Q, T, R>
where
    M: MonsterOracle + ?Sized,
    I: ItemOracle + ?Sized,
    E: EffectOracle + ?Sized,
    X: CodexOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}
