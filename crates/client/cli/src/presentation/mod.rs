//! Plain-text rendering of session state and rule events.

use std::fmt::Display;
use std::io::{self, Write};

use auren_core::progression::{self, Respawn};
use auren_core::{Encounter, GameEnv, Player};

/// One event per line, in the order the rules reported them.
pub fn events<W: Write, E: Display>(out: &mut W, events: &[E]) -> io::Result<()> {
    for event in events {
        writeln!(out, "  {event}")?;
    }
    Ok(())
}

pub fn status<W: Write>(out: &mut W, player: &Player, env: &GameEnv<'_>) -> io::Result<()> {
    let stats = &player.stats;
    writeln!(
        out,
        "{} | Lv {} ({}/{} XP) | HP {}/{} | ATK {} DEF {} | {} gold | at {}",
        player.name,
        player.level,
        player.xp,
        player.xp_to_next,
        player.health,
        stats.max_health,
        stats.attack,
        stats.defense,
        player.gold,
        player.position,
    )?;

    let consumables = &player.consumables;
    writeln!(
        out,
        "  potions {} | elixirs {} | rage tonics {} | stone tonics {}",
        consumables.potions, consumables.elixirs, consumables.rage_tonics, consumables.stone_tonics
    )?;

    let equipped: Vec<String> = player
        .equipment
        .iter()
        .map(|id| env.item(id.as_str()).map_or_else(|| id.to_string(), |item| item.name.clone()))
        .collect();
    if !equipped.is_empty() {
        writeln!(out, "  equipped: {}", equipped.join(", "))?;
    }
    if let Some(entry) = player
        .focused_echo
        .as_ref()
        .and_then(|id| env.codex_entry(id.as_str()))
    {
        writeln!(out, "  focused echo: {}", entry.title)?;
    }
    if !player.effects.is_empty() {
        let active: Vec<String> = player
            .effects
            .iter()
            .map(|effect| format!("{} ({})", effect.id, effect.turns))
            .collect();
        writeln!(out, "  effects: {}", active.join(", "))?;
    }
    Ok(())
}

pub fn quests<W: Write>(out: &mut W, player: &Player, env: &GameEnv<'_>) -> io::Result<()> {
    match progression::current_main_step(player, env) {
        Ok(Some(step)) => {
            let count = player.quests.progress(step.id.as_str()).unwrap_or(0);
            writeln!(
                out,
                "main: {} [{}/{}]",
                step.title,
                count,
                step.objective.required()
            )?;
        }
        _ => writeln!(out, "main: none")?,
    }

    for id in &player.quests.active_side_quests {
        let Ok(quests) = env.quests() else { break };
        let Some(quest) = quests.side_quest(id.as_str()) else {
            continue;
        };
        let count = player.quests.progress(id.as_str()).unwrap_or(0);
        writeln!(
            out,
            "side: {} ({}) [{}/{}]",
            quest.title,
            quest.id,
            count,
            quest.objective.required()
        )?;
    }
    Ok(())
}

pub fn encounter<W: Write>(out: &mut W, encounter: &Encounter) -> io::Result<()> {
    let monster = encounter.monster();
    writeln!(
        out,
        "round {} | {} HP {}/{}",
        encounter.round(),
        monster.name,
        monster.health,
        monster.max_health
    )?;
    if !encounter.player_can_act() {
        writeln!(out, "  you cannot act this turn; any command passes it")?;
    }
    Ok(())
}

pub fn respawn<W: Write>(out: &mut W, outcome: &Respawn) -> io::Result<()> {
    match outcome {
        Respawn::Revived { gold_lost, health } => writeln!(
            out,
            "You wake up in town with {health} HP. {gold_lost} gold is gone."
        ),
        Respawn::Fallen => writeln!(out, "Your journey ends here."),
    }
}
