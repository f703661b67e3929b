//! Glue code tying the runtime session to the text prompt.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use auren_core::CombatState;
use auren_runtime::{
    FileSaveRepository, OracleManager, RuntimeConfig, RuntimeError, SaveRepository, Session,
};

use crate::input::{Command, HELP};
use crate::presentation;

/// Whether the prompt loop keeps going.
enum Flow {
    Continue,
    Quit,
}

pub struct CliApp {
    config: RuntimeConfig,
    oracles: OracleManager,
    saves: FileSaveRepository,
    session: Option<Session>,
}

impl CliApp {
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let oracles = OracleManager::from_config(&config).context("loading game content")?;
        let saves = FileSaveRepository::new(&config.save_dir)
            .with_context(|| format!("opening save directory {}", config.save_dir.display()))?;
        Ok(Self {
            config,
            oracles,
            saves,
            session: None,
        })
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        tracing::info!("CLI client starting...");
        writeln!(out, "Echoes of Auren")?;
        let slots = self.saves.list_slots()?;
        if !slots.is_empty() {
            let slots: Vec<String> = slots.iter().map(ToString::to_string).collect();
            writeln!(out, "saved games in slots: {}", slots.join(", "))?;
        }
        writeln!(out, "{HELP}")?;

        for line in input.lines() {
            let line = line?;
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };

            match self.execute(command, &mut out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => match err.downcast_ref::<RuntimeError>() {
                    Some(runtime) if runtime.is_recoverable() => writeln!(out, "{runtime}")?,
                    Some(runtime) => {
                        tracing::error!(error = %runtime, "command failed");
                        writeln!(out, "error: {runtime}")?;
                    }
                    None => return Err(err),
                },
            }
        }

        tracing::info!("CLI client exiting");
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::NewGame(name) => {
                let seed = self.config.session_seed();
                self.session = Some(Session::new_game(self.oracles.clone(), name, seed)?);
                self.show_status(out)?;
            }
            Command::Load(slot) => {
                let seed = self.config.session_seed();
                let (session, adjustments) =
                    Session::load(self.oracles.clone(), &self.saves, slot, seed)?;
                if !adjustments.is_empty() {
                    writeln!(out, "save adjusted to the current content:")?;
                    for adjustment in &adjustments {
                        writeln!(out, "  {adjustment:?}")?;
                    }
                }
                self.session = Some(session);
                self.show_status(out)?;
            }
            command => {
                let Some(session) = self.session.as_mut() else {
                    writeln!(out, "start a game first: new <name> or load <slot>")?;
                    return Ok(Flow::Continue);
                };
                Self::play(session, &self.saves, command, out)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn play<W: Write>(
        session: &mut Session,
        saves: &dyn SaveRepository,
        command: Command,
        out: &mut W,
    ) -> Result<()> {
        match command {
            Command::Status => {
                presentation::status(out, session.player(), &session.env())?;
                if let Some(encounter) = session.encounter() {
                    presentation::encounter(out, encounter)?;
                }
            }
            Command::Quests => presentation::quests(out, session.player(), &session.env())?,
            Command::Save(slot) => {
                session.save(saves, slot)?;
                writeln!(out, "saved to slot {slot}")?;
            }
            Command::Travel(to) => presentation::events(out, &session.travel(to)?)?,
            Command::Visit(place) => presentation::events(out, &session.visit(&place)?)?,
            Command::Talk(npc) => presentation::events(out, &session.talk(&npc)?)?,
            Command::Collect(entry) => presentation::events(out, &session.collect_codex(&entry)?)?,
            Command::ChoosePath(path) => presentation::events(out, &session.choose_path(path)?)?,
            Command::Board => {
                let offers = session.board_offers()?;
                if offers.is_empty() {
                    writeln!(out, "nothing on the board for you")?;
                }
                let env = session.env();
                for id in offers {
                    let title = env
                        .quests()?
                        .side_quest(id.as_str())
                        .map_or_else(String::new, |quest| quest.title.clone());
                    writeln!(out, "  {id}: {title}")?;
                }
            }
            Command::Accept(id) => presentation::events(out, &session.accept_side_quest(&id)?)?,
            Command::TurnIn(id) => presentation::events(out, &session.turn_in_side_quest(&id)?)?,
            Command::Fight(monster) => {
                presentation::events(out, &session.start_combat(&monster)?)?;
                match session.encounter() {
                    Some(encounter) => presentation::encounter(out, encounter)?,
                    None => writeln!(out, "the fight is over before it began")?,
                }
            }
            Command::Act(action) => {
                let round = session.submit(action)?;
                presentation::events(out, &round.events)?;
                match round.state {
                    CombatState::Ongoing => {
                        if let Some(encounter) = session.encounter() {
                            presentation::encounter(out, encounter)?;
                        }
                    }
                    CombatState::Victory => {
                        let won = round.rewards.is_some_and(|rewards| rewards.game_won);
                        writeln!(out, "{}", if won { "The world is saved." } else { "Victory!" })?;
                    }
                    CombatState::Defeat { can_respawn: true } => {
                        writeln!(out, "You fell. Type 'respawn' to return to town.")?;
                    }
                    CombatState::Defeat { can_respawn: false } => {
                        writeln!(out, "You fell, and no one is coming.")?;
                    }
                    CombatState::Aborted => writeln!(out, "You got away.")?,
                }
            }
            Command::Respawn => presentation::respawn(out, &session.respawn()?)?,
            Command::Equip(item) => match session.equip(&item)? {
                Some(previous) => writeln!(out, "equipped {item}, {previous} back in the pack")?,
                None => writeln!(out, "equipped {item}")?,
            },
            Command::Unequip(slot) => match session.unequip(slot)? {
                Some(item) => writeln!(out, "took off {item}")?,
                None => writeln!(out, "nothing in the {slot} slot")?,
            },
            Command::Focus(entry) => {
                session.focus_echo(&entry)?;
                writeln!(out, "focused on {entry}")?;
            }
            Command::Unfocus => {
                session.unfocus_echo()?;
                writeln!(out, "no echo focused")?;
            }
            Command::Tonic(tonic) => {
                session.prime_tonic(tonic)?;
                writeln!(out, "the {tonic} tonic will kick in at the next fight")?;
            }
            Command::Help | Command::Quit | Command::NewGame(_) | Command::Load(_) => {}
        }
        Ok(())
    }

    fn show_status<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(session) = &self.session {
            presentation::status(out, session.player(), &session.env())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn app(save_dir: &std::path::Path) -> CliApp {
        CliApp::new(RuntimeConfig {
            save_dir: save_dir.to_path_buf(),
            content_dir: None,
            seed: Some(21),
        })
        .unwrap()
    }

    fn run(app: &mut CliApp, script: &str) -> String {
        let mut out = Vec::new();
        app.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_session_saves_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut cli = app(dir.path());

        let output = run(&mut cli, "new Ash\ngo 2 3\ntalk lira\nsave 1\nquit\n");

        assert!(output.contains("Ash | Lv 1"));
        assert!(output.contains("  Main quest updated: The Mayor's Plea"));
        assert!(output.contains("  You must focus on the echo 'echo_gift_01'"));
        assert!(output.contains("saved to slot 1"));
        assert!(dir.path().join("save_1.json").exists());

        let output = run(&mut app(dir.path()), "load 1\nquests\n");
        assert!(output.contains("saved games in slots: 1"));
        assert!(output.contains("main: The Mayor's Plea [0/1]"));
    }

    #[test]
    fn player_mistakes_do_not_end_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut cli = app(dir.path());

        let output = run(
            &mut cli,
            "attack\nnew Ash\nattack\ngo 9 9\ndance\nfight tutorial_dummy\nflee\n",
        );

        assert!(output.contains("start a game first"));
        assert!(output.contains("no encounter in progress"));
        assert!(output.contains("position (9, 9) is outside the map"));
        assert!(output.contains("unknown command 'dance'"));
        assert!(output.contains("You got away."));
    }
}
