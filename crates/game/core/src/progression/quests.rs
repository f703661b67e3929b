//! Main-quest chain and side-quest board.
//!
//! Progress counters live in [`QuestLog::progress`](crate::state::QuestLog).
//! A main step is complete once its counter reaches the objective's required
//! count; the counter stays behind as a completion marker. Side-quest
//! counters are created on accept and deleted on turn-in.

use crate::env::{
    GameEnv, MainQuestStep, NextStep, Objective, OracleError, RollContext, RollStream, SideQuest,
    StoryPath, WorldChange,
};
use crate::state::{Player, QuestId};

use super::{ProgressEvent, QuestError, grant_permanent_bonus, grant_reward};

/// Current main-quest step, if the player has one and it exists in content.
pub fn current_main_step<'a>(
    player: &Player,
    env: &GameEnv<'a>,
) -> Result<Option<&'a MainQuestStep>, OracleError> {
    let quests = env.quests()?;
    Ok(player
        .quests
        .main_quest
        .as_ref()
        .and_then(|id| quests.main_step(id.as_str())))
}

/// Story path of the current main step, if it belongs to one.
pub fn current_path(player: &Player, env: &GameEnv<'_>) -> Result<Option<StoryPath>, OracleError> {
    Ok(current_main_step(player, env)?.and_then(|step| step.path))
}

fn is_marked_complete(player: &Player, step: &MainQuestStep) -> bool {
    player
        .quests
        .progress(step.id.as_str())
        .is_some_and(|count| count >= step.objective.required())
}

fn apply_world_change(player: &mut Player, change: WorldChange, events: &mut Vec<ProgressEvent>) {
    match change {
        WorldChange::BreakSeal => {
            if player.seal_intact {
                player.seal_intact = false;
                events.push(ProgressEvent::SealBroken);
            }
        }
        WorldChange::GrantKey => {
            if !player.holds_key {
                player.holds_key = true;
                events.push(ProgressEvent::KeyGranted);
            }
        }
    }
}

/// Makes `id` the current step and runs its start-of-step world changes.
///
/// A collect step whose entry is already in the codex completes at once.
fn advance_to(
    player: &mut Player,
    id: &QuestId,
    env: &GameEnv<'_>,
    events: &mut Vec<ProgressEvent>,
) -> Result<(), QuestError> {
    let step = env
        .quests()?
        .main_step(id.as_str())
        .ok_or_else(|| QuestError::MainStepMissing(id.to_string()))?;

    player.quests.main_quest = Some(step.id.clone());
    player.quests.progress.entry(step.id.clone()).or_insert(0);
    events.push(ProgressEvent::MainQuestAdvanced {
        title: step.title.clone(),
    });
    for change in &step.on_start {
        apply_world_change(player, *change, events);
    }

    if let Objective::CollectEcho { entry } = &step.objective
        && player.has_codex_entry(entry.as_str())
    {
        complete_main_step(player, step, env, events)?;
    }
    Ok(())
}

/// Marks a step complete, pays its reward and moves along the chain.
fn complete_main_step(
    player: &mut Player,
    step: &MainQuestStep,
    env: &GameEnv<'_>,
    events: &mut Vec<ProgressEvent>,
) -> Result<(), QuestError> {
    player
        .quests
        .progress
        .insert(step.id.clone(), step.objective.required());
    events.push(ProgressEvent::MainStepCompleted {
        title: step.title.clone(),
    });
    events.extend(grant_reward(player, step.reward, env)?);
    for change in &step.on_complete {
        apply_world_change(player, *change, events);
    }

    match &step.next {
        NextStep::Step(next) => advance_to(player, next, env, events)?,
        NextStep::Branch { .. } => events.push(ProgressEvent::PathChoiceAvailable),
        NextStep::End => events.push(ProgressEvent::MainQuestFinished),
    }
    Ok(())
}

/// Counts a monster kill toward the current main step and every matching
/// active side quest.
pub fn record_kill(
    player: &mut Player,
    monster: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let mut events = Vec::new();
    let quests = env.quests()?;

    if let Some(step) = current_main_step(player, env)?
        && let Objective::Kill {
            monster: target, ..
        } = &step.objective
        && target == monster
        && !is_marked_complete(player, step)
    {
        let required = step.objective.required();
        let count = player.quests.progress.entry(step.id.clone()).or_insert(0);
        *count += 1;
        let count = *count;
        events.push(ProgressEvent::QuestProgress {
            quest: step.title.clone(),
            count,
            required,
        });
        if count >= required {
            complete_main_step(player, step, env, &mut events)?;
        }
    }

    for id in player.quests.active_side_quests.clone() {
        let Some(quest) = quests.side_quest(id.as_str()) else {
            continue;
        };
        let Objective::Kill {
            monster: target, ..
        } = &quest.objective
        else {
            continue;
        };
        if target != monster {
            continue;
        }
        let required = quest.objective.required();
        let count = player.quests.progress.entry(id).or_insert(0);
        if *count >= required {
            continue;
        }
        *count += 1;
        let count = *count;
        events.push(ProgressEvent::QuestProgress {
            quest: quest.title.clone(),
            count,
            required,
        });
        if count >= required {
            events.push(ProgressEvent::SideQuestReady {
                title: quest.title.clone(),
            });
        }
    }
    Ok(events)
}

/// Adds a codex entry, grants its permanent bonus and runs the collect
/// checks.
///
/// Unknown or already collected entries are a no-op.
pub fn collect_codex(
    player: &mut Player,
    entry: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let Some(definition) = env.codex_entry(entry) else {
        return Ok(Vec::new());
    };
    if player.has_codex_entry(entry) {
        return Ok(Vec::new());
    }
    player.codex.push(definition.id.clone());

    let mut events = vec![ProgressEvent::CodexEntryAdded {
        title: definition.title.clone(),
    }];
    events.extend(grant_permanent_bonus(player, definition.collect_bonus, env)?);
    events.extend(on_codex_entry_added(player, entry, env)?);
    Ok(events)
}

/// Completes collect objectives naming `entry`.
pub fn on_codex_entry_added(
    player: &mut Player,
    entry: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let mut events = Vec::new();
    let quests = env.quests()?;

    if let Some(step) = current_main_step(player, env)?
        && matches!(&step.objective, Objective::CollectEcho { entry: target } if target == entry)
        && !is_marked_complete(player, step)
    {
        complete_main_step(player, step, env, &mut events)?;
    }

    for id in &player.quests.active_side_quests {
        let Some(quest) = quests.side_quest(id.as_str()) else {
            continue;
        };
        if matches!(&quest.objective, Objective::CollectEcho { entry: target } if target == entry)
            && player.quests.progress(id.as_str()).unwrap_or(0) == 0
        {
            player.quests.progress.insert(id.clone(), 1);
            events.push(ProgressEvent::SideQuestReady {
                title: quest.title.clone(),
            });
        }
    }
    Ok(events)
}

/// Completes a visit step for `location`.
pub fn on_location_visited(
    player: &mut Player,
    location: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let mut events = Vec::new();
    if let Some(step) = current_main_step(player, env)?
        && matches!(&step.objective, Objective::Visit { location: target } if target == location)
        && !is_marked_complete(player, step)
    {
        complete_main_step(player, step, env, &mut events)?;
    }
    Ok(events)
}

/// Completes a talk step for `npc` once its gates hold.
///
/// A missing focused echo or a too-low attack is reported as an event and
/// leaves the step open.
pub fn on_npc_talked(
    player: &mut Player,
    npc: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let mut events = Vec::new();
    let Some(step) = current_main_step(player, env)? else {
        return Ok(events);
    };
    if !matches!(&step.objective, Objective::Talk { npc: target } if target == npc) {
        return Ok(events);
    }
    if is_marked_complete(player, step) {
        if matches!(step.next, NextStep::Branch { .. }) {
            events.push(ProgressEvent::PathChoiceAvailable);
        }
        return Ok(events);
    }

    if let Some(entry) = &step.requires_focused_echo
        && !player.is_focused_on(entry.as_str())
    {
        // The NPC hands the echo over when the player does not have it yet.
        if !player.has_codex_entry(entry.as_str()) {
            events.extend(collect_codex(player, entry.as_str(), env)?);
        }
        events.push(ProgressEvent::EchoNotFocused {
            entry: entry.to_string(),
        });
        return Ok(events);
    }
    if let Some(required) = step.min_attack
        && player.stats.attack < required
    {
        events.push(ProgressEvent::AttackGateNotMet {
            required,
            attack: player.stats.attack,
        });
        return Ok(events);
    }

    complete_main_step(player, step, env, &mut events)?;
    Ok(events)
}

/// Picks a story branch at a completed branch step.
///
/// # Errors
///
/// `QuestError::NoChoicePending` unless the current step is complete and
/// ends in a branch.
pub fn choose_path(
    player: &mut Player,
    path: StoryPath,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let step = current_main_step(player, env)?.ok_or(QuestError::NoChoicePending)?;
    let NextStep::Branch { hero, reckless } = &step.next else {
        return Err(QuestError::NoChoicePending);
    };
    if !is_marked_complete(player, step) {
        return Err(QuestError::NoChoicePending);
    }

    let next = match path {
        StoryPath::Hero => hero,
        StoryPath::Reckless => reckless,
    };
    // Validate before mutating.
    env.quests()?
        .main_step(next.as_str())
        .ok_or_else(|| QuestError::MainStepMissing(next.to_string()))?;

    let mut events = Vec::new();
    advance_to(player, next, env, &mut events)?;
    Ok(events)
}

/// Whether a side quest may appear on the board for this player.
pub fn is_offerable(
    player: &Player,
    quest: &SideQuest,
    path: Option<StoryPath>,
    env: &GameEnv<'_>,
) -> Result<bool, OracleError> {
    let window = env.rules()?.quests.side_quest_level_window;
    let in_window = player.level >= quest.min_level
        && player.level <= quest.min_level.saturating_add(window);
    let path_ok = quest.exclusive_path.is_none_or(|required| path == Some(required));
    Ok(quest.board && in_window && path_ok && !player.quests.is_active_side(quest.id.as_str()))
}

/// Samples up to the configured number of eligible board quests.
///
/// Empty when the active limit is reached.
pub fn board_offers(
    player: &Player,
    rolls: &mut RollStream,
    env: &GameEnv<'_>,
) -> Result<Vec<QuestId>, OracleError> {
    let rules = &env.rules()?.quests;
    if player.quests.active_side_quests.len() >= rules.max_active_side_quests {
        return Ok(Vec::new());
    }

    let path = current_path(player, env)?;
    let mut pool = Vec::new();
    for quest in env.quests()?.side_quests() {
        if is_offerable(player, quest, path, env)? {
            pool.push(quest.id.clone());
        }
    }

    let rng = env.rng()?;
    let mut offers = Vec::with_capacity(rules.board_offer_count);
    while offers.len() < rules.board_offer_count {
        let Some(index) = rolls.pick(rng, RollContext::BoardOffer, pool.len()) else {
            break;
        };
        offers.push(pool.swap_remove(index));
    }
    Ok(offers)
}

/// Starts a side quest.
///
/// Board quests must pass the board filter; quests handed out by an NPC
/// (`board == false`) skip it. A collect quest whose entry is already in the
/// codex starts complete.
pub fn accept_side_quest(
    player: &mut Player,
    id: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    let quest = env
        .quests()?
        .side_quest(id)
        .ok_or_else(|| QuestError::UnknownQuest(id.to_owned()))?;
    if player.quests.is_active_side(id) {
        return Err(QuestError::AlreadyActive(id.to_owned()));
    }
    let max = env.rules()?.quests.max_active_side_quests;
    if player.quests.active_side_quests.len() >= max {
        return Err(QuestError::TooManyActive { max });
    }
    if quest.board && !is_offerable(player, quest, current_path(player, env)?, env)? {
        return Err(QuestError::NotEligible(id.to_owned()));
    }

    player.quests.active_side_quests.push(quest.id.clone());
    let mut events = vec![ProgressEvent::SideQuestAccepted {
        title: quest.title.clone(),
    }];

    let already_met = matches!(
        &quest.objective,
        Objective::CollectEcho { entry } if player.has_codex_entry(entry.as_str())
    );
    player
        .quests
        .progress
        .insert(quest.id.clone(), u32::from(already_met));
    if already_met {
        events.push(ProgressEvent::SideQuestReady {
            title: quest.title.clone(),
        });
    }
    Ok(events)
}

/// Hands in a finished side quest: pays the reward, frees the slot, records
/// the completion and deletes its progress counter.
pub fn turn_in_side_quest(
    player: &mut Player,
    id: &str,
    env: &GameEnv<'_>,
) -> Result<Vec<ProgressEvent>, QuestError> {
    if !player.quests.is_active_side(id) {
        return Err(QuestError::NotActive(id.to_owned()));
    }
    let quest = env
        .quests()?
        .side_quest(id)
        .ok_or_else(|| QuestError::UnknownQuest(id.to_owned()))?;
    let progress = player.quests.progress(id).unwrap_or(0);
    if progress < quest.objective.required() {
        return Err(QuestError::NotComplete(id.to_owned()));
    }

    player.quests.active_side_quests.retain(|active| active != id);
    if !player.quests.is_completed_side(id) {
        player.quests.completed_side_quests.push(quest.id.clone());
    }
    player.quests.progress.remove(id);

    let mut events = vec![ProgressEvent::SideQuestTurnedIn {
        title: quest.title.clone(),
        reward: quest.reward,
    }];
    events.extend(grant_reward(player, quest.reward, env)?);
    Ok(events)
}

/// Active side quests whose objective is met.
pub fn ready_side_quests<'a>(
    player: &Player,
    env: &GameEnv<'a>,
) -> Result<Vec<&'a SideQuest>, OracleError> {
    let quests = env.quests()?;
    Ok(player
        .quests
        .active_side_quests
        .iter()
        .filter_map(|id| quests.side_quest(id.as_str()))
        .filter(|quest| {
            player.quests.progress(quest.id.as_str()).unwrap_or(0) >= quest.objective.required()
        })
        .collect())
}

/// Drops progress counters that belong to neither an active side quest nor a
/// known main step, and starts the main chain when it has no current step.
pub fn prune_stale_progress(player: &mut Player, env: &GameEnv<'_>) -> Result<(), OracleError> {
    let quests = env.quests()?;
    if player
        .quests
        .main_quest
        .as_ref()
        .is_none_or(|id| quests.main_step(id.as_str()).is_none())
    {
        player.quests.main_quest = quests.first_main_step().cloned();
    }

    let log = &mut player.quests;
    log.active_side_quests
        .retain(|id| quests.side_quest(id.as_str()).is_some());
    let active = log.active_side_quests.clone();
    log.progress.retain(|id, _| {
        active.contains(id) || quests.main_step(id.as_str()).is_some()
    });
    Ok(())
}
