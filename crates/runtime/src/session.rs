//! One playthrough: the player, the active encounter and the roll stream.
//!
//! A [`Session`] is the single owner of mutable game state. Clients call its
//! methods with plain requests and render the events that come back; the
//! rules themselves live in `auren-core`.

use auren_core::combat::CombatEvent;
use auren_core::env::{EquipSlot, PermanentBonus, RollStream, SideQuest, StoryPath};
use auren_core::progression::{self, ProgressEvent, Respawn};
use auren_core::{
    CombatAction, CombatState, Encounter, GameEnv, ItemId, Player, Position, QuestId, RoundResult,
    Tonic, recompute_stats,
};

use crate::error::{Result, RuntimeError};
use crate::normalize::{Adjustment, normalize_player};
use crate::oracle::OracleManager;
use crate::repository::{SaveRepository, SaveSlot};

pub struct Session {
    oracles: OracleManager,
    player: Player,
    encounter: Option<Encounter>,
    rolls: RollStream,
    seed: u64,
}

impl Session {
    /// Starts a fresh character at the first main-quest step.
    pub fn new_game(oracles: OracleManager, name: impl Into<String>, seed: u64) -> Result<Self> {
        let player = {
            let env = oracles.as_game_env();
            let first_step = env.quests()?.first_main_step().cloned();
            let mut player = Player::new(name, env.rules()?, first_step);
            recompute_stats(&mut player, &env)?;
            player
        };
        tracing::info!(player = %player.name, seed, "new game");
        Ok(Self::with_player(oracles, player, seed))
    }

    /// Loads a save and repairs whatever no longer matches the content.
    ///
    /// A record saved at zero health loads downed, or with the journey over
    /// when its respawn is spent.
    ///
    /// # Errors
    ///
    /// `RuntimeError::EmptySlot` when the slot holds nothing; repository
    /// errors when the file cannot be read or parsed.
    pub fn load(
        oracles: OracleManager,
        repo: &dyn SaveRepository,
        slot: SaveSlot,
        seed: u64,
    ) -> Result<(Self, Vec<Adjustment>)> {
        let mut player = repo
            .load(slot)?
            .ok_or(RuntimeError::EmptySlot(slot.get()))?;
        let adjustments = normalize_player(&mut player, &oracles.as_game_env())?;
        tracing::info!(player = %player.name, %slot, seed, "save loaded");
        Ok((Self::with_player(oracles, player, seed), adjustments))
    }

    fn with_player(oracles: OracleManager, player: Player, seed: u64) -> Self {
        Self {
            oracles,
            player,
            encounter: None,
            rolls: RollStream::new(seed),
            seed,
        }
    }

    /// Writes the player to `slot`. Refused mid-fight and while the player
    /// is down.
    pub fn save(&self, repo: &dyn SaveRepository, slot: SaveSlot) -> Result<()> {
        self.ensure_idle()?;
        repo.save(slot, &self.player)?;
        tracing::info!(player = %self.player.name, %slot, "game saved");
        Ok(())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The player fell with the one respawn already spent.
    pub fn is_journey_over(&self) -> bool {
        self.is_downed() && self.player.respawned
    }

    pub fn is_downed(&self) -> bool {
        self.player.health == 0
    }

    pub fn env(&self) -> GameEnv<'_> {
        self.oracles.as_game_env()
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    /// Opens a fight against `monster`. Each encounter draws from its own
    /// stream forked off the session's.
    pub fn start_combat(&mut self, monster: &str) -> Result<Vec<CombatEvent>> {
        self.ensure_playable()?;

        let env = self.oracles.as_game_env();
        let rolls = self.rolls.fork();
        let (encounter, events) = Encounter::start(&mut self.player, monster, rolls, &env)?;
        tracing::info!(monster, "encounter started");

        if encounter.state().is_over() {
            self.finish(encounter.state());
        } else {
            self.encounter = Some(encounter);
        }
        Ok(events)
    }

    /// Resolves one round of the active encounter.
    pub fn submit(&mut self, action: CombatAction) -> Result<RoundResult> {
        let env = self.oracles.as_game_env();
        let encounter = self.encounter.as_mut().ok_or(RuntimeError::NoEncounter)?;
        let result = encounter.submit(&mut self.player, action, &env)?;
        tracing::debug!(
            round = encounter.round(),
            ?action,
            state = ?result.state,
            events = result.events.len(),
            "round resolved"
        );

        if result.state.is_over() {
            self.encounter = None;
            self.finish(result.state);
            if result.rewards.as_ref().is_some_and(|rewards| rewards.game_won) {
                tracing::info!(player = %self.player.name, "final boss defeated");
            }
        }
        Ok(result)
    }

    fn finish(&self, state: CombatState) {
        match state {
            CombatState::Defeat { can_respawn: false } => {
                tracing::info!(player = %self.player.name, "player fell for good");
            }
            state => tracing::info!(?state, "encounter ended"),
        }
    }

    /// Brings a downed player back to town once.
    pub fn respawn(&mut self) -> Result<Respawn> {
        if self.encounter.is_some() {
            return Err(RuntimeError::EncounterInProgress);
        }
        if !self.is_downed() {
            return Err(RuntimeError::NotDowned);
        }
        let outcome = progression::respawn(&mut self.player, &self.oracles.as_game_env())?;
        match &outcome {
            Respawn::Revived { gold_lost, health } => {
                tracing::info!(gold_lost, health, "player respawned in town");
            }
            Respawn::Fallen => tracing::info!("no respawn left"),
        }
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Exploration and quests
    // ------------------------------------------------------------------

    /// Moves the player. Arriving in town counts as visiting it.
    pub fn travel(&mut self, to: Position) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        let world = &env.rules()?.world;
        if !world.map.contains(to) {
            return Err(RuntimeError::OutOfBounds(to));
        }

        self.player.position = to;
        tracing::debug!(%to, "player moved");
        if to == world.town {
            Ok(progression::on_location_visited(
                &mut self.player,
                &world.town_location,
                &env,
            )?)
        } else {
            Ok(Vec::new())
        }
    }

    pub fn visit(&mut self, location: &str) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        Ok(progression::on_location_visited(
            &mut self.player,
            location,
            &env,
        )?)
    }

    pub fn talk(&mut self, npc: &str) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        Ok(progression::on_npc_talked(&mut self.player, npc, &env)?)
    }

    /// Adds a codex entry found while exploring.
    pub fn collect_codex(&mut self, entry: &str) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        Ok(progression::collect_codex(&mut self.player, entry, &env)?)
    }

    /// Raises the permanent bonus stats, for exploration events that reward
    /// strength outright.
    pub fn grant_permanent_bonus(
        &mut self,
        bonus: PermanentBonus,
    ) -> Result<Option<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        let event = progression::grant_permanent_bonus(&mut self.player, bonus, &env)?;
        tracing::info!(
            attack = bonus.attack,
            defense = bonus.defense,
            "permanent bonus granted"
        );
        Ok(event)
    }

    pub fn choose_path(&mut self, path: StoryPath) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        let events = progression::choose_path(&mut self.player, path, &env)?;
        tracing::info!(?path, "story path chosen");
        Ok(events)
    }

    /// Samples the quest board. Uses the session stream, so repeated calls
    /// give different offers.
    pub fn board_offers(&mut self) -> Result<Vec<QuestId>> {
        let env = self.oracles.as_game_env();
        Ok(progression::board_offers(
            &self.player,
            &mut self.rolls,
            &env,
        )?)
    }

    /// Active side quests ready to hand in.
    pub fn ready_side_quests(&self) -> Result<Vec<&SideQuest>> {
        Ok(progression::ready_side_quests(&self.player, &self.env())?)
    }

    pub fn accept_side_quest(&mut self, id: &str) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        let events = progression::accept_side_quest(&mut self.player, id, &env)?;
        tracing::info!(quest = id, "side quest accepted");
        Ok(events)
    }

    pub fn turn_in_side_quest(&mut self, id: &str) -> Result<Vec<ProgressEvent>> {
        self.ensure_playable()?;
        let env = self.oracles.as_game_env();
        let events = progression::turn_in_side_quest(&mut self.player, id, &env)?;
        tracing::info!(quest = id, "side quest turned in");
        Ok(events)
    }

    // ------------------------------------------------------------------
    // Loadout
    // ------------------------------------------------------------------

    pub fn focus_echo(&mut self, entry: &str) -> Result<()> {
        self.ensure_idle()?;
        let env = self.oracles.as_game_env();
        progression::focus_echo(&mut self.player, entry, &env)?;
        Ok(())
    }

    pub fn unfocus_echo(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let env = self.oracles.as_game_env();
        progression::unfocus_echo(&mut self.player, &env)?;
        Ok(())
    }

    /// Equips `item` and returns whatever it replaced.
    pub fn equip(&mut self, item: &str) -> Result<Option<ItemId>> {
        self.ensure_idle()?;
        let env = self.oracles.as_game_env();
        Ok(progression::equip(&mut self.player, item, &env)?)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<ItemId>> {
        self.ensure_idle()?;
        let env = self.oracles.as_game_env();
        Ok(progression::unequip(&mut self.player, slot, &env)?)
    }

    pub fn prime_tonic(&mut self, tonic: Tonic) -> Result<()> {
        self.ensure_idle()?;
        progression::prime_tonic(&mut self.player, tonic)?;
        Ok(())
    }

    fn ensure_playable(&self) -> Result<()> {
        if self.is_journey_over() {
            return Err(RuntimeError::JourneyOver);
        }
        self.ensure_idle()
    }

    /// No fight running and the player on their feet.
    fn ensure_idle(&self) -> Result<()> {
        if self.encounter.is_some() {
            return Err(RuntimeError::EncounterInProgress);
        }
        if self.is_downed() {
            return Err(RuntimeError::Downed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new_game(OracleManager::bundled().unwrap(), "Ash", 7).unwrap()
    }

    #[test]
    fn new_game_starts_at_the_first_step() {
        let session = session();
        let player = session.player();
        assert!(player.quests.is_main_step("mq_01"));
        assert_eq!(player.health, 50);
        assert_eq!(player.position, Position::new(1, 3));
    }

    #[test]
    fn travel_outside_the_map_is_refused() {
        let mut session = session();
        let err = session.travel(Position::new(8, 0)).unwrap_err();
        assert!(matches!(err, RuntimeError::OutOfBounds(_)));
        assert!(err.is_recoverable());
        assert_eq!(session.player().position, Position::new(1, 3));
    }

    #[test]
    fn arriving_in_town_counts_as_a_visit() {
        let mut session = session();
        let events = session.travel(Position::new(2, 3)).unwrap();
        assert!(events.contains(&ProgressEvent::MainStepCompleted {
            title: "Auren's Call".into()
        }));
        assert!(session.player().quests.is_main_step("mq_02"));
    }

    #[test]
    fn quest_actions_wait_for_the_fight_to_end() {
        let mut session = session();
        session.start_combat("tutorial_dummy").unwrap();

        assert!(matches!(
            session.visit("town"),
            Err(RuntimeError::EncounterInProgress)
        ));
        assert!(matches!(
            session.equip("rusted_sword"),
            Err(RuntimeError::EncounterInProgress)
        ));

        session.submit(CombatAction::Flee).unwrap();
        assert!(session.encounter().is_none());
        assert!(session.visit("town").is_ok());
    }

    #[test]
    fn submit_without_a_fight_is_refused() {
        let mut session = session();
        assert!(matches!(
            session.submit(CombatAction::Attack),
            Err(RuntimeError::NoEncounter)
        ));
    }

    #[test]
    fn unknown_monster_fails_fast() {
        let mut session = session();
        let err = session.start_combat("chimera").unwrap_err();
        assert!(matches!(err, RuntimeError::Oracle(_)));
        assert!(session.encounter().is_none());
    }

    #[test]
    fn downed_player_must_respawn_first() {
        let mut session = session();
        session.player.health = 0;
        session.player.gold = 40;

        assert!(matches!(
            session.start_combat("goblin"),
            Err(RuntimeError::Downed)
        ));
        assert_eq!(
            session.respawn().unwrap(),
            Respawn::Revived {
                gold_lost: 20,
                health: 25
            }
        );
        assert!(session.start_combat("goblin").is_ok());
    }

    #[test]
    fn second_fall_ends_the_journey() {
        let mut session = session();
        session.player.respawned = true;
        session.player.health = 0;

        assert_eq!(session.respawn().unwrap(), Respawn::Fallen);
        assert!(session.is_journey_over());
        assert!(matches!(
            session.talk("lira"),
            Err(RuntimeError::JourneyOver)
        ));
    }

    #[test]
    fn downed_player_cannot_dodge_the_respawn() {
        let mut session = session();
        session.player.gold = 40;
        session.player.health = 0;

        assert!(matches!(session.equip("rusted_sword"), Err(RuntimeError::Downed)));
        assert!(matches!(
            session.unequip(EquipSlot::Weapon),
            Err(RuntimeError::Downed)
        ));
        assert!(matches!(session.travel(Position::new(2, 3)), Err(RuntimeError::Downed)));
        assert_eq!(session.player().health, 0);
        assert!(!session.player().respawned);
        assert_eq!(session.player().gold, 40);

        assert!(matches!(session.respawn(), Ok(Respawn::Revived { .. })));
        assert!(matches!(session.respawn(), Err(RuntimeError::NotDowned)));
        assert!(session.equip("rusted_sword").is_ok());
    }

    #[test]
    fn permanent_bonus_outlasts_loadout_changes() {
        let mut session = session();
        session
            .grant_permanent_bonus(PermanentBonus {
                attack: 2,
                defense: 1,
            })
            .unwrap();
        session.equip("rusted_sword").unwrap();
        session.unequip(EquipSlot::Weapon).unwrap();

        assert_eq!(session.player().stats.attack, 5);
        assert_eq!(session.player().stats.defense, 1);
    }
}
