//! Turn loop for one fight.
//!
//! A round is the player's action followed by the monster's. Each side ticks
//! its own effects at the start of its turn, so an action submitted while the
//! player is stunned is discarded and the monster acts alone.

use crate::effects::{apply_effect, cure, cure_first, cure_negative, tick_effects, wake_on_hit};
use crate::env::{
    Behavior, EffectKind, EquipSlot, GameEnv, MonsterTemplate, OnHitProc, OracleError, RngOracle,
    RollContext, RollStream, Special,
};
use crate::state::{CombatFlags, Combatant, ItemKind, Monster, Player, SkillId};
use crate::stats::{BattleStats, recompute_stats};

use super::damage;
use super::monster_ai::choose_behavior;
use super::rewards::{self, Rewards};
use super::skills::{self, SkillEffect, SkillSpec};
use super::{AttackKind, CombatError, CombatEvent};

/// What the player does with their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    Attack,
    UseSkill(SkillId),
    UseItem(ItemKind),
    Flee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    Ongoing,
    Victory,
    /// The player fell. `can_respawn` is false once the one respawn is spent.
    Defeat { can_respawn: bool },
    /// The player fled.
    Aborted,
}

impl CombatState {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Outcome of one submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub events: Vec<CombatEvent>,
    pub state: CombatState,
    /// Set only on victory.
    pub rewards: Option<Rewards>,
}

/// A validated action, ready to resolve.
enum Plan {
    Attack,
    Skill(SkillSpec),
    Item(ItemKind),
    Flee,
}

/// A fight between the player and one monster instance.
#[derive(Clone, Debug)]
pub struct Encounter {
    template: MonsterTemplate,
    monster: Monster,
    battle: BattleStats,
    rolls: RollStream,
    state: CombatState,
    /// The player loses the current turn (control effect or focus).
    player_skips: bool,
    round: u32,
}

impl Encounter {
    /// Spawns a fresh monster and opens the first player turn.
    ///
    /// Recomputes the player's stats, consumes the primed tonic, applies the
    /// focused echo's start-of-combat effect when it is not already active
    /// and ticks the player's effects once. A player who dies on that first
    /// tick leaves the encounter in [`CombatState::Defeat`].
    pub fn start(
        player: &mut Player,
        monster: &str,
        rolls: RollStream,
        env: &GameEnv<'_>,
    ) -> Result<(Self, Vec<CombatEvent>), OracleError> {
        let template = env
            .monsters()?
            .template(monster)
            .ok_or_else(|| OracleError::MonsterNotFound(monster.to_owned()))?
            .clone();
        let rules = env.rules()?;

        recompute_stats(player, env)?;
        let tonic = player.primed_tonic.take();
        let battle = BattleStats::for_encounter(player, tonic, &rules.consumables);
        player.guard = false;
        player.skip_next_turn = false;

        let monster = Monster::from_template(&template);
        let mut events = vec![CombatEvent::Started {
            monster: monster.name.clone(),
        }];

        if let Some(entry) = player
            .focused_echo
            .as_ref()
            .and_then(|id| env.codex_entry(id.as_str()))
            && let Some(start) = &entry.combat_effect
            && !player.effects.has(start.effect.as_str())
            && let Some(event) = apply_effect(player, &start.effect, start.turns, env)
        {
            events.push(event.into());
        }

        let mut encounter = Self {
            template,
            monster,
            battle,
            rolls,
            state: CombatState::Ongoing,
            player_skips: false,
            round: 1,
        };
        encounter.begin_player_turn(player, env, &mut events);
        Ok((encounter, events))
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn template(&self) -> &MonsterTemplate {
        &self.template
    }

    pub fn battle_stats(&self) -> BattleStats {
        self.battle
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// False when the coming turn is lost to a control effect or to
    /// Reflected Strike; the next submitted action is ignored.
    pub fn player_can_act(&self) -> bool {
        self.state == CombatState::Ongoing && !self.player_skips
    }

    /// Resolves one round.
    ///
    /// The action is validated first; on error nothing has changed and the
    /// same turn can be retried.
    pub fn submit(
        &mut self,
        player: &mut Player,
        action: CombatAction,
        env: &GameEnv<'_>,
    ) -> Result<RoundResult, CombatError> {
        if self.state.is_over() {
            return Err(CombatError::EncounterOver);
        }
        let rng = env.rng()?;
        let rules = env.rules()?;
        let mut events = Vec::new();

        if self.player_skips {
            self.player_skips = false;
        } else {
            let plan = self.validate(player, action)?;
            if matches!(plan, Plan::Flee) {
                player.guard = false;
                self.state = CombatState::Aborted;
                events.push(CombatEvent::Fled);
                return Ok(self.result(events, None));
            }
            // Any action the player gets to take rouses a sleeping monster.
            events.extend(
                wake_on_hit(&mut self.monster, env)
                    .into_iter()
                    .map(CombatEvent::from),
            );
            match plan {
                Plan::Flee => {}
                Plan::Attack => {
                    self.player_hit(None, 100, &mut events);
                    self.roll_player_procs(player, env, rng, &mut events);
                }
                Plan::Skill(spec) => self.use_skill(player, spec, env, rng, &mut events)?,
                Plan::Item(kind) => {
                    let consumables = &rules.consumables;
                    let healed = match kind {
                        ItemKind::Potion => {
                            player.consumables.potions -= 1;
                            player.heal(consumables.potion_heal)
                        }
                        ItemKind::Elixir => {
                            player.consumables.elixirs -= 1;
                            player.heal(consumables.elixir_heal)
                        }
                    };
                    events.push(CombatEvent::ItemUsed { item: kind, healed });
                    let cured = match kind {
                        ItemKind::Potion => cure(player, &consumables.potion_cures, env),
                        ItemKind::Elixir => cure_negative(player, env),
                    };
                    events.extend(cured.into_iter().map(CombatEvent::from));
                }
            }
        }

        if self.monster.is_defeated() {
            return self.win(player, env, events);
        }

        self.monster_turn(player, env, rng, &mut events);
        player.guard = false;

        if self.monster.is_defeated() {
            return self.win(player, env, events);
        }
        if player.is_defeated() {
            self.lose(player, &mut events);
            return Ok(self.result(events, None));
        }

        player.cooldowns.tick();
        self.round += 1;
        self.begin_player_turn(player, env, &mut events);
        Ok(self.result(events, None))
    }

    fn result(&self, events: Vec<CombatEvent>, rewards: Option<Rewards>) -> RoundResult {
        RoundResult {
            events,
            state: self.state,
            rewards,
        }
    }

    fn validate(&self, player: &Player, action: CombatAction) -> Result<Plan, CombatError> {
        match action {
            CombatAction::Attack => Ok(Plan::Attack),
            CombatAction::Flee => Ok(Plan::Flee),
            CombatAction::UseSkill(requested) => {
                let spec =
                    skills::resolve(player, requested).ok_or(CombatError::SkillLocked(requested))?;
                let turns = player.cooldowns.get(spec.id);
                if turns > 0 {
                    return Err(CombatError::OnCooldown {
                        skill: spec.id,
                        turns,
                    });
                }
                if spec.needs_low_health()
                    && !skills::is_desperate(player.health, player.max_health())
                {
                    return Err(CombatError::HealthTooHigh(spec.id));
                }
                Ok(Plan::Skill(spec))
            }
            CombatAction::UseItem(kind) => {
                let stock = match kind {
                    ItemKind::Potion => player.consumables.potions,
                    ItemKind::Elixir => player.consumables.elixirs,
                };
                if stock == 0 {
                    return Err(CombatError::OutOfStock(kind));
                }
                Ok(Plan::Item(kind))
            }
        }
    }

    fn begin_player_turn(
        &mut self,
        player: &mut Player,
        env: &GameEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) {
        let tick = tick_effects(player, env);
        events.extend(tick.events.into_iter().map(CombatEvent::from));
        if player.is_defeated() {
            self.lose(player, events);
            return;
        }
        let focusing = std::mem::take(&mut player.skip_next_turn);
        if focusing && !tick.incapacitated {
            events.push(CombatEvent::PlayerSkipsTurn);
        }
        self.player_skips = tick.incapacitated || focusing;
    }

    fn win(
        &mut self,
        player: &mut Player,
        env: &GameEnv<'_>,
        mut events: Vec<CombatEvent>,
    ) -> Result<RoundResult, CombatError> {
        player.guard = false;
        player.skip_next_turn = false;
        self.state = CombatState::Victory;
        events.push(CombatEvent::Victory {
            monster: self.monster.name.clone(),
        });
        let rewards = rewards::claim(player, &self.template, &mut self.rolls, env, &mut events)?;
        Ok(self.result(events, Some(rewards)))
    }

    fn lose(&mut self, player: &Player, events: &mut Vec<CombatEvent>) {
        events.push(CombatEvent::Defeated);
        self.state = CombatState::Defeat {
            can_respawn: !player.respawned,
        };
    }

    // ------------------------------------------------------------------
    // Player side
    // ------------------------------------------------------------------

    fn player_hit(
        &mut self,
        skill: Option<&'static str>,
        percent: u32,
        events: &mut Vec<CombatEvent>,
    ) {
        let raw = damage::scale(self.battle.attack, percent);
        let mut amount = damage::mitigate(raw, self.monster.defense);
        let hardened = self.monster.take_hardened();
        if hardened {
            amount = damage::hardened(amount);
        }
        let dealt = self.monster.take_damage(amount);
        events.push(CombatEvent::PlayerHit {
            skill,
            monster: self.monster.name.clone(),
            damage: dealt,
            hardened,
        });
    }

    /// Weapon, charm, then echo. Rolled after every damaging player action. Drain effects attach to monsters but never
    /// do anything.
    fn roll_player_procs(
        &mut self,
        player: &Player,
        env: &GameEnv<'_>,
        rng: &(impl RngOracle + ?Sized),
        events: &mut Vec<CombatEvent>,
    ) {
        if self.monster.is_defeated() {
            return;
        }
        let procs: Vec<OnHitProc> = [EquipSlot::Weapon, EquipSlot::Charm]
            .into_iter()
            .filter_map(|slot| player.equipment.get(slot))
            .filter_map(|id| env.item(id.as_str()))
            .filter_map(|item| item.on_hit.clone())
            .chain(
                player
                    .focused_echo
                    .iter()
                    .filter_map(|id| env.codex_entry(id.as_str()))
                    .filter_map(|entry| entry.on_hit.clone()),
            )
            .collect();

        for proc_ in procs {
            if self.rolls.chance(rng, RollContext::PlayerProc, proc_.chance)
                && let Some(event) = apply_effect(&mut self.monster, &proc_.effect, proc_.turns, env)
            {
                events.push(event.into());
            }
        }
    }

    fn use_skill(
        &mut self,
        player: &mut Player,
        spec: SkillSpec,
        env: &GameEnv<'_>,
        rng: &(impl RngOracle + ?Sized),
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), CombatError> {
        let rules = env.rules()?;
        player.cooldowns.set(spec.id, spec.cooldown);
        match spec.effect {
            SkillEffect::Strike { damage_percent } => {
                self.player_hit(Some(spec.name), damage_percent, events);
                self.roll_player_procs(player, env, rng, events);
            }
            SkillEffect::Guard => {
                player.guard = true;
                events.push(CombatEvent::Guarding);
            }
            SkillEffect::Meditate { heal_percent } => {
                let healed = player.heal(damage::percent_of(player.max_health(), heal_percent));
                events.push(CombatEvent::Meditated { healed });
            }
            SkillEffect::Purify => {
                match cure_first(player, &rules.consumables.purify_cures, env) {
                    Some(event) => events.push(event.into()),
                    None => events.push(CombatEvent::NothingToPurify),
                }
            }
            SkillEffect::ReflectedStrike { damage_percent } => {
                self.player_hit(Some(spec.name), damage_percent, events);
                self.roll_player_procs(player, env, rng, events);
                player.skip_next_turn = true;
                events.push(CombatEvent::GatheringFocus);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Monster side
    // ------------------------------------------------------------------

    /// Ticks the monster, then lets it act unless it is incapacitated or
    /// spending its exhausted token. On-hit procs follow any action.
    fn monster_turn(
        &mut self,
        player: &mut Player,
        env: &GameEnv<'_>,
        rng: &(impl RngOracle + ?Sized),
        events: &mut Vec<CombatEvent>,
    ) {
        let tick = tick_effects(&mut self.monster, env);
        events.extend(tick.events.into_iter().map(CombatEvent::from));
        if self.monster.is_defeated() || tick.incapacitated {
            return;
        }
        if self.monster.take_exhaustion() {
            events.push(CombatEvent::MonsterExhausted {
                monster: self.monster.name.clone(),
            });
            return;
        }

        match choose_behavior(&self.monster, &self.template, &mut self.rolls, rng) {
            Some(behavior) => self.special(behavior, player, env, rng, events),
            None => self.plain_attack(player, env, rng, events),
        }

        if player.is_defeated() {
            return;
        }
        for proc_ in self.template.on_hit.clone() {
            if !self.rolls.chance(rng, RollContext::MonsterProc, proc_.chance) {
                continue;
            }
            let drains = env
                .effect(proc_.effect.as_str())
                .is_some_and(|def| matches!(def.kind, EffectKind::Drain));
            if drains {
                self.sabotage(player, proc_.turns, rng, events);
            } else if let Some(event) = apply_effect(player, &proc_.effect, proc_.turns, env) {
                events.push(event.into());
            }
        }
    }

    fn plain_attack(
        &mut self,
        player: &mut Player,
        env: &GameEnv<'_>,
        rng: &(impl RngOracle + ?Sized),
        events: &mut Vec<CombatEvent>,
    ) {
        let evade = player.specials(*env).find_map(|(source, special)| match special {
            Special::EvadePhysical(percent) => Some((source.to_owned(), percent)),
            _ => None,
        });
        if let Some((source, percent)) = evade
            && self.rolls.chance(rng, RollContext::Evade, percent)
        {
            events.push(CombatEvent::Evaded {
                monster: self.monster.name.clone(),
                source,
            });
            return;
        }
        let raw = damage::scale(self.monster.attack, 100);
        self.hit_player(player, raw, AttackKind::Plain, env, events);
    }

    /// Defense, then guard. Returns the damage actually taken.
    fn hit_player(
        &self,
        player: &mut Player,
        raw: u32,
        kind: AttackKind,
        env: &GameEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> u32 {
        let amount = damage::guarded(damage::mitigate(raw, self.battle.defense), player.guard);
        let dealt = player.take_damage(amount);
        events.push(CombatEvent::MonsterHit {
            monster: self.monster.name.clone(),
            kind,
            damage: dealt,
            guarded: player.guard,
            resisted_by: None,
        });
        if dealt > 0 {
            events.extend(wake_on_hit(player, env).into_iter().map(CombatEvent::from));
        }
        dealt
    }

    fn special(
        &mut self,
        behavior: Behavior,
        player: &mut Player,
        env: &GameEnv<'_>,
        rng: &(impl RngOracle + ?Sized),
        events: &mut Vec<CombatEvent>,
    ) {
        let name = self.monster.name.clone();
        match behavior {
            Behavior::Harden => {
                self.monster.flags.insert(CombatFlags::HARDENED);
                events.push(CombatEvent::Hardened { monster: name });
            }
            Behavior::SabotageCooldown { turns } => self.sabotage(player, turns, rng, events),
            Behavior::LifeDrain {
                damage_percent,
                heal_percent,
            } => {
                let raw = damage::scale(self.monster.attack, damage_percent);
                let dealt = self.hit_player(player, raw, AttackKind::Siphon, env, events);
                let amount = self.monster.heal(damage::percent_of(dealt, heal_percent));
                events.push(CombatEvent::MonsterHealed {
                    monster: name,
                    amount,
                });
            }
            Behavior::Heal { amount } => {
                let amount = self.monster.heal(amount);
                events.push(CombatEvent::MonsterHealed {
                    monster: name,
                    amount,
                });
            }
            Behavior::Enrage { attack_bonus } => {
                self.monster.attack += attack_bonus;
                self.monster.flags.insert(CombatFlags::ENRAGED);
                events.push(CombatEvent::Enraged {
                    monster: name,
                    attack_bonus,
                });
            }
            Behavior::MultiHit {
                hits,
                damage_percent,
            } => {
                for _ in 0..hits {
                    let raw = damage::scale(self.monster.attack, damage_percent);
                    self.hit_player(player, raw, AttackKind::Swift, env, events);
                    if player.is_defeated() {
                        break;
                    }
                }
            }
            Behavior::HeavyStrike { damage_percent } => {
                let raw = damage::scale(self.monster.attack, damage_percent);
                self.hit_player(player, raw, AttackKind::Heavy, env, events);
                self.monster.flags.insert(CombatFlags::EXHAUSTED);
                events.push(CombatEvent::MonsterTired { monster: name });
            }
            Behavior::Breath { damage, element } => {
                let base = damage::guarded(damage, player.guard);
                let mut amount = damage::mitigate(base, self.battle.defense);
                let resistance = player.resistance(element, env);
                if let Some(resist) = &resistance {
                    amount = resist.reduce(amount);
                }
                let dealt = player.take_damage(amount);
                events.push(CombatEvent::MonsterHit {
                    monster: name,
                    kind: AttackKind::Breath,
                    damage: dealt,
                    guarded: player.guard,
                    resisted_by: resistance.map(|resist| resist.source),
                });
                events.extend(wake_on_hit(player, env).into_iter().map(CombatEvent::from));
            }
        }
    }

    /// Puts one of the player's skill lines on cooldown.
    ///
    /// Picks among recorded lines other than Focus Strike and Guard, or
    /// between Meditate and Limit Break when there are none. The new value
    /// overrides whatever was left.
    fn sabotage(
        &mut self,
        player: &mut Player,
        turns: u32,
        rng: &(impl RngOracle + ?Sized),
        events: &mut Vec<CombatEvent>,
    ) {
        let mut lines: Vec<SkillId> = player
            .cooldowns
            .lines()
            .filter(|line| !matches!(line, SkillId::FocusStrike | SkillId::Guard))
            .collect();
        if lines.is_empty() {
            lines = vec![SkillId::Meditate, SkillId::LimitBreak];
        }
        let Some(index) = self.rolls.pick(rng, RollContext::Sabotage, lines.len()) else {
            return;
        };
        let skill = lines[index];
        player.cooldowns.set(skill, turns);
        events.push(CombatEvent::CooldownSabotaged { skill, turns });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::state::{CodexId, EffectId, ItemId, Tonic};
    use crate::testkit;

    fn fight(
        player: &mut Player,
        monster: &str,
        env: &GameEnv<'_>,
    ) -> (Encounter, Vec<CombatEvent>) {
        Encounter::start(player, monster, RollStream::new(7), env).unwrap()
    }

    #[test]
    fn plain_exchange() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, events) = fight(&mut player, "dummy", &env);
        assert_eq!(
            events,
            vec![CombatEvent::Started {
                monster: "Training Dummy".into()
            }]
        );

        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        assert_eq!(round.state, CombatState::Ongoing);
        assert_eq!(encounter.monster().health, 22);
        assert_eq!(player.health, 49);
        assert_eq!(encounter.round(), 2);
    }

    #[test]
    fn unknown_monster_is_rejected() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);

        let err = Encounter::start(&mut player, "nope", RollStream::new(0), &env).unwrap_err();
        assert_eq!(err, OracleError::MonsterNotFound("nope".into()));
    }

    #[test]
    fn primed_tonic_is_consumed_for_this_fight_only() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.primed_tonic = Some(Tonic::Rage);

        let (encounter, _) = fight(&mut player, "dummy", &env);

        assert_eq!(encounter.battle_stats().attack, player.stats.attack + 5);
        assert_eq!(player.primed_tonic, None);
    }

    #[test]
    fn echo_combat_effect_applies_at_start() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.codex.push(CodexId::new("shrine_memory"));
        player.focused_echo = Some(CodexId::new("shrine_memory"));

        let (_, events) = fight(&mut player, "dummy", &env);

        assert!(player.effects.has("regen"));
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::Effect(crate::effects::EffectEvent::Applied { .. })
        )));
    }

    #[test]
    fn guard_halves_the_next_hit_then_clears() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.level = 4;
        recompute_stats(&mut player, &env).unwrap();
        player.health = player.max_health();
        let (mut encounter, _) = fight(&mut player, "goblin", &env);

        encounter
            .submit(&mut player, CombatAction::UseSkill(SkillId::Guard), &env)
            .unwrap();

        // Goblin hits for 3; guarded to 1.
        assert_eq!(player.health, player.max_health() - 1);
        assert!(!player.guard);
        assert_eq!(player.cooldowns.get(SkillId::Guard), 2);
    }

    #[test]
    fn guard_clears_when_the_monster_cannot_act() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.level = 4;
        recompute_stats(&mut player, &env).unwrap();
        player.health = player.max_health();
        let (mut encounter, _) = fight(&mut player, "dummy", &env);
        encounter.monster.effects.add(&EffectId::new("stun"), 2);

        let round = encounter
            .submit(&mut player, CombatAction::UseSkill(SkillId::Guard), &env)
            .unwrap();

        assert!(!round.events.iter().any(|e| matches!(e, CombatEvent::MonsterHit { .. })));
        assert!(!player.guard);
        assert_eq!(player.health, player.max_health());
    }

    #[test]
    fn pendant_evades_plain_attacks() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.equipment.charm = Some(ItemId::new("ghostly_pendant"));
        let (mut encounter, _) = fight(&mut player, "dummy", &env);

        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        assert!(round.events.contains(&CombatEvent::Evaded {
            monster: "Training Dummy".into(),
            source: "Ghostly Pendant".into(),
        }));
        assert_eq!(player.health, 50);

        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        assert_eq!(player.health, 49);
    }

    #[test]
    fn focus_strike_rolls_weapon_procs() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.level = 3;
        player.equipment.weapon = Some(ItemId::new("poison_dagger"));
        let (mut encounter, _) = fight(&mut player, "dummy", &env);

        let round = encounter
            .submit(&mut player, CombatAction::UseSkill(SkillId::FocusStrike), &env)
            .unwrap();

        assert!(round.events.contains(&CombatEvent::Effect(
            crate::effects::EffectEvent::Applied {
                target: "Training Dummy".into(),
                effect: "Poison".into(),
                turns: 3,
            }
        )));
        assert!(encounter.monster().effects.has("poison"));
    }

    #[test]
    fn any_action_wakes_a_sleeping_monster() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "dummy", &env);
        encounter.monster.effects.add(&EffectId::new("sleep"), 3);
        player.health = 20;

        let round = encounter
            .submit(&mut player, CombatAction::UseItem(ItemKind::Potion), &env)
            .unwrap();

        assert_eq!(
            round.events.first(),
            Some(&CombatEvent::Effect(crate::effects::EffectEvent::WokeUp {
                target: "Training Dummy".into(),
                effect: "Sleep".into(),
            }))
        );
        assert!(!encounter.monster().effects.has("sleep"));
        // Awake again, the dummy swings back for 1.
        assert_eq!(player.health, 44);
    }

    #[test]
    fn rejected_action_changes_nothing() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.level = 4;
        recompute_stats(&mut player, &env).unwrap();
        let (mut encounter, _) = fight(&mut player, "goblin", &env);
        encounter
            .submit(&mut player, CombatAction::UseSkill(SkillId::Guard), &env)
            .unwrap();
        player.effects.add(&EffectId::new("poison"), 3);
        let health = player.health;

        let err = encounter
            .submit(&mut player, CombatAction::UseSkill(SkillId::Guard), &env)
            .unwrap_err();

        assert_eq!(
            err,
            CombatError::OnCooldown {
                skill: SkillId::Guard,
                turns: 2
            }
        );
        assert_eq!(player.health, health);
        assert_eq!(player.effects.remaining("poison"), Some(3));
        assert_eq!(encounter.round(), 2);
    }

    #[test]
    fn locked_skills_and_empty_stock_are_refused() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "dummy", &env);

        assert_eq!(
            encounter.submit(&mut player, CombatAction::UseSkill(SkillId::FocusStrike), &env),
            Err(CombatError::SkillLocked(SkillId::FocusStrike))
        );
        assert_eq!(
            encounter.submit(&mut player, CombatAction::UseItem(ItemKind::Elixir), &env),
            Err(CombatError::OutOfStock(ItemKind::Elixir))
        );
    }

    #[test]
    fn limit_break_needs_low_health() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.level = 10;
        player.base_attack = 12;
        recompute_stats(&mut player, &env).unwrap();
        player.health = player.max_health();
        let (mut encounter, _) = fight(&mut player, "dummy", &env);

        assert_eq!(
            encounter.submit(&mut player, CombatAction::UseSkill(SkillId::LimitBreak), &env),
            Err(CombatError::HealthTooHigh(SkillId::LimitBreak))
        );

        player.health = 10;
        let round = encounter
            .submit(&mut player, CombatAction::UseSkill(SkillId::LimitBreak), &env)
            .unwrap();

        // 300% of 12 attack flattens the 25 HP dummy.
        assert_eq!(round.state, CombatState::Victory);
        assert_eq!(player.cooldowns.get(SkillId::LimitBreak), 6);
    }

    #[test]
    fn potion_heals_and_cures() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "dummy", &env);
        player.health = 20;
        player.effects.add(&EffectId::new("poison"), 3);

        encounter
            .submit(&mut player, CombatAction::UseItem(ItemKind::Potion), &env)
            .unwrap();

        // +25, then the dummy hits for 1.
        assert_eq!(player.health, 44);
        assert!(!player.effects.has("poison"));
        assert_eq!(player.consumables.potions, 0);
    }

    #[test]
    fn hardened_token_halves_one_hit() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "golem", &env);

        let first = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        assert!(first.events.contains(&CombatEvent::Hardened {
            monster: "Golem".into()
        }));
        assert_eq!(encounter.monster().health, 62);

        let second = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        assert!(second.events.contains(&CombatEvent::PlayerHit {
            skill: None,
            monster: "Golem".into(),
            damage: 1,
            hardened: true,
        }));
        assert_eq!(encounter.monster().health, 61);
    }

    #[test]
    fn breath_respects_defense_and_resistance() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.equipment.armor = Some(ItemId::new("acolyte_robe"));
        let (mut encounter, _) = fight(&mut player, "dragon", &env);

        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        // 15 - 2 defense = 13, halved by the robe.
        assert!(round.events.contains(&CombatEvent::MonsterHit {
            monster: "Dragon".into(),
            kind: AttackKind::Breath,
            damage: 6,
            guarded: false,
            resisted_by: Some("Acolyte's Robe".into()),
        }));
        // The burn proc lands and ticks once for a resisted 1.
        assert_eq!(player.health, 50 - 6 - 1);
    }

    #[test]
    fn ghost_sabotages_an_unused_line() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "ghost", &env);

        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        assert!(round.events.contains(&CombatEvent::CooldownSabotaged {
            skill: SkillId::Meditate,
            turns: 3
        }));
        assert_eq!(player.cooldowns.get(SkillId::Meditate), 2);
    }

    #[test]
    fn drain_proc_skips_focus_strike() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.cooldowns.set(SkillId::FocusStrike, 0);
        player.cooldowns.set(SkillId::Purify, 0);
        let (mut encounter, _) = fight(&mut player, "shade", &env);

        encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        assert_eq!(player.cooldowns.get(SkillId::Purify), 1);
        assert_eq!(player.cooldowns.get(SkillId::FocusStrike), 0);
        assert!(!player.effects.has("mana_drain"));
    }

    #[test]
    fn stun_costs_the_next_turn() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "wolf", &env);

        encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        // Two swift hits of 3.
        assert_eq!(player.health, 44);
        assert!(!encounter.player_can_act());
        assert_eq!(encounter.monster().health, 22);

        encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        assert_eq!(encounter.monster().health, 22);
    }

    #[test]
    fn reflected_strike_costs_the_following_turn() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.codex.push(CodexId::new(skills::MIRROR_ECHO));
        let (mut encounter, _) = fight(&mut player, "dummy", &env);

        let round = encounter
            .submit(
                &mut player,
                CombatAction::UseSkill(SkillId::ReflectedStrike),
                &env,
            )
            .unwrap();

        assert!(round.events.contains(&CombatEvent::PlayerSkipsTurn));
        assert!(!encounter.player_can_act());
        assert!(!player.skip_next_turn);
    }

    #[test]
    fn victory_pays_gold_bonus_and_xp() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.base_attack = 30;
        player.equipment.charm = Some(ItemId::new("lucky_coin"));
        let (mut encounter, _) = fight(&mut player, "stalker", &env);

        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        assert_eq!(round.state, CombatState::Victory);
        let rewards = round.rewards.unwrap();
        assert_eq!(rewards.gold, 10);
        assert_eq!(rewards.bonus_gold, 1);
        assert_eq!(player.gold, 11);
        assert_eq!(player.xp, 18);
        assert!(!rewards.potion_found);
        assert!(!rewards.game_won);
    }

    #[test]
    fn lucky_victory_drops_loot_and_a_potion() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.base_attack = 30;
        let (mut encounter, _) = fight(&mut player, "goblin", &env);

        let rewards = encounter
            .submit(&mut player, CombatAction::Attack, &env)
            .unwrap()
            .rewards
            .unwrap();

        assert_eq!(rewards.loot, vec![ItemId::new("rusted_sword")]);
        assert!(rewards.potion_found);
        assert_eq!(player.consumables.potions, 2);
        assert_eq!(
            encounter.submit(&mut player, CombatAction::Attack, &env),
            Err(CombatError::EncounterOver)
        );
    }

    #[test]
    fn damage_over_time_can_win_the_fight() {
        let content = testkit::content();
        let rng = FixedRng::ALWAYS;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        player.equipment.weapon = Some(ItemId::new("poison_dagger"));
        let (mut encounter, _) = fight(&mut player, "dummy", &env);
        encounter.monster.health = 6;

        // 4 damage leaves 2; the poison tick finishes it.
        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();

        assert_eq!(round.state, CombatState::Victory);
        assert!(round.rewards.is_some());
        assert_eq!(player.health, 50);
    }

    #[test]
    fn defeat_reports_whether_a_respawn_is_left() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);

        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "orc", &env);
        player.health = 1;
        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        assert_eq!(round.state, CombatState::Defeat { can_respawn: true });
        assert!(round.events.contains(&CombatEvent::Defeated));

        let mut player = testkit::player(&env);
        player.respawned = true;
        let (mut encounter, _) = fight(&mut player, "orc", &env);
        player.health = 1;
        let round = encounter.submit(&mut player, CombatAction::Attack, &env).unwrap();
        assert_eq!(round.state, CombatState::Defeat { can_respawn: false });
    }

    #[test]
    fn fleeing_ends_without_rewards() {
        let content = testkit::content();
        let rng = FixedRng::NEVER;
        let env = testkit::env(&content, &rng);
        let mut player = testkit::player(&env);
        let (mut encounter, _) = fight(&mut player, "orc", &env);

        let round = encounter.submit(&mut player, CombatAction::Flee, &env).unwrap();

        assert_eq!(round.state, CombatState::Aborted);
        assert_eq!(round.rewards, None);
        assert_eq!(player.health, 50);
    }
}
