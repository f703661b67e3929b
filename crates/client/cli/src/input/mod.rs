//! Input processing for the CLI client.
//!
//! This module owns the text-to-command mapping so the rest of the
//! application can stay agnostic about concrete command words.

use std::str::FromStr;

use auren_core::env::{EquipSlot, StoryPath};
use auren_core::{CombatAction, ItemKind, Position, Tonic};
use auren_runtime::SaveSlot;

/// One line typed by the player, decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Status,
    Quests,
    NewGame(String),
    Load(SaveSlot),
    Save(SaveSlot),
    Travel(Position),
    Visit(String),
    Talk(String),
    Collect(String),
    ChoosePath(StoryPath),
    Board,
    Accept(String),
    TurnIn(String),
    Fight(String),
    Act(CombatAction),
    Respawn,
    Equip(String),
    Unequip(EquipSlot),
    Focus(String),
    Unfocus,
    Tonic(Tonic),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' is not a valid {kind}")]
    InvalidArgument { kind: &'static str, value: String },
}

pub const HELP: &str = "\
commands:
  new <name> | load <slot> | save <slot> | status | quests | quit
  go <x> <y> | visit <place> | talk <npc> | collect <entry> | path <hero|reckless>
  board | accept <quest> | turnin <quest>
  fight <monster> | attack | skill <skill> | use <potion|elixir> | flee | respawn
  equip <item> | unequip <slot> | focus <entry> | unfocus | tonic <rage|stone>";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Command::Status);
        };
        let mut arg = |command: &'static str, expected: &'static str| {
            words
                .next()
                .map(str::to_owned)
                .ok_or(ParseError::MissingArgument { command, expected })
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "status" => Command::Status,
            "quests" => Command::Quests,
            "new" => Command::NewGame(arg("new", "a name")?),
            "load" => Command::Load(parse("slot", &arg("load", "a slot number")?)?),
            "save" => Command::Save(parse("slot", &arg("save", "a slot number")?)?),
            "go" => {
                let x = parse("coordinate", &arg("go", "x and y")?)?;
                let y = parse("coordinate", &arg("go", "x and y")?)?;
                Command::Travel(Position::new(x, y))
            }
            "visit" => Command::Visit(arg("visit", "a place")?),
            "talk" => Command::Talk(arg("talk", "someone to talk to")?),
            "collect" => Command::Collect(arg("collect", "a codex entry")?),
            "path" => Command::ChoosePath(parse("path", &arg("path", "hero or reckless")?)?),
            "board" => Command::Board,
            "accept" => Command::Accept(arg("accept", "a quest id")?),
            "turnin" => Command::TurnIn(arg("turnin", "a quest id")?),
            "fight" => Command::Fight(arg("fight", "a monster")?),
            "attack" | "a" => Command::Act(CombatAction::Attack),
            "skill" => Command::Act(CombatAction::UseSkill(parse(
                "skill",
                &arg("skill", "a skill name")?,
            )?)),
            "use" => Command::Act(CombatAction::UseItem(parse::<ItemKind>(
                "item",
                &arg("use", "potion or elixir")?,
            )?)),
            "flee" => Command::Act(CombatAction::Flee),
            "respawn" => Command::Respawn,
            "equip" => Command::Equip(arg("equip", "an item id")?),
            "unequip" => Command::Unequip(parse("slot", &arg("unequip", "a slot")?)?),
            "focus" => Command::Focus(arg("focus", "a codex entry")?),
            "unfocus" => Command::Unfocus,
            "tonic" => Command::Tonic(parse("tonic", &arg("tonic", "rage or stone")?)?),
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }
}

fn parse<T: FromStr>(kind: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidArgument {
        kind,
        value: value.to_owned(),
    })
}
