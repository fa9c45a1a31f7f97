//! Glue code tying the session, its event bus and the terminal together.
use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{Receiver, error::TryRecvError};
use valley_content::ContentFactory;
use valley_core::NodeId;
use valley_runtime::{FileStateRepository, GameEvent, GameSession, Topic};

use crate::config::CliConfig;
use crate::input::{Command, HELP};
use crate::presentation;

/// Whether the loop keeps reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct CliApp {
    session: GameSession,
    events: Vec<Receiver<GameEvent>>,
}

impl CliApp {
    /// Builds (or resumes) a session from `config`.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let save_dir = config.save_dir();
        let repository = FileStateRepository::new(&save_dir, config.save_format)
            .with_context(|| format!("cannot open save directory {}", save_dir.display()))?;

        let mut builder = GameSession::builder().repository(Arc::new(repository));
        builder = match config.resume {
            Some(nonce) => builder.resume(nonce),
            None => {
                let factory = ContentFactory::new(config.data_dir());
                let builder = builder.content(&factory)?.players(config.players());
                match config.seed {
                    Some(seed) => builder.seed(seed),
                    None => builder,
                }
            }
        };

        Ok(Self::new(builder.build()?))
    }

    pub fn new(session: GameSession) -> Self {
        let bus = session.events();
        let events = [Topic::Turn, Topic::Economy, Topic::Session]
            .into_iter()
            .map(|topic| bus.subscribe(topic))
            .collect();
        Self { session, events }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Reads commands line by line until `quit`, end of input or game over.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        presentation::status(out, &self.session)?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(Some(command)) => self.handle(command, out)?,
                Ok(None) => Flow::Continue,
                Err(error) => {
                    writeln!(out, "! {error}")?;
                    Flow::Continue
                }
            };
            self.drain_events(out)?;

            if flow == Flow::Quit {
                break;
            }
            if let Some(outcome) = self.session.outcome() {
                tracing::info!(player = %outcome.player, "leaving after game over");
                presentation::players(out, &self.session)?;
                break;
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }

    fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        tracing::debug!(?command, "input");
        let here = self.session.current_node().unwrap_or(NodeId::HUB);
        let result = match command {
            Command::Roll => self.session.roll_dice().map(drop),
            Command::Move(to) => self.session.move_to(to).map(drop),
            Command::Select => self.session.select_task(here).map(drop),
            Command::Start => self.session.start_task(here).map(drop),
            Command::Chance => self.session.open_chance(here).map(drop),
            Command::Transfer(target) => self.session.request_transfer(here, target).map(drop),
            Command::Resolve(decision) => self.session.resolve_pending(decision).map(drop),
            Command::End => self.session.end_turn().map(drop),
            Command::Preview => match self.session.preview_selection(here) {
                Ok(preview) => {
                    presentation::preview(out, &preview)?;
                    Ok(())
                }
                Err(error) => Err(error),
            },
            Command::Save => self.session.save().map(drop),
            Command::Load(nonce) => self.session.load(nonce),
            Command::Saves => match self.session.saves() {
                Ok(saves) if saves.is_empty() => {
                    writeln!(out, "no saves")?;
                    Ok(())
                }
                Ok(saves) => {
                    let list: Vec<String> = saves.iter().map(u64::to_string).collect();
                    writeln!(out, "saves: {}", list.join(", "))?;
                    Ok(())
                }
                Err(error) => Err(error),
            },
            Command::Moves => {
                presentation::moves(out, &self.session)?;
                Ok(())
            }
            Command::Targets => {
                let targets = self.session.eligible_transfer_targets(here);
                if targets.is_empty() {
                    writeln!(out, "nobody can take this task")?;
                }
                for target in targets {
                    if let Some(player) = self.session.player(target) {
                        writeln!(out, "{} {}", u16::from(target.0) + 1, player.name)?;
                    }
                }
                return Ok(Flow::Continue);
            }
            Command::Status => {
                presentation::status(out, &self.session)?;
                Ok(())
            }
            Command::Weather => {
                presentation::weather(out, &self.session)?;
                Ok(())
            }
            Command::Tasks => {
                presentation::tasks(out, &self.session)?;
                Ok(())
            }
            Command::Steps => {
                presentation::steps(out, &self.session)?;
                Ok(())
            }
            Command::Players => {
                presentation::players(out, &self.session)?;
                Ok(())
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(()) => {
                if command == Command::End || matches!(command, Command::Load(_)) {
                    self.drain_events(out)?;
                    presentation::status(out, &self.session)?;
                }
            }
            Err(error) => writeln!(out, "! {error}")?,
        }
        Ok(Flow::Continue)
    }

    /// Prints every event published since the last call.
    fn drain_events(&mut self, out: &mut impl Write) -> Result<()> {
        let state = self.session.state();
        for receiver in &mut self.events {
            loop {
                match receiver.try_recv() {
                    Ok(event) => {
                        if let Some(line) = presentation::event_line(&event, state) {
                            writeln!(out, "  {line}")?;
                        }
                    }
                    Err(TryRecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "event receiver lagged");
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valley_core::{LoadedDice, ResourceCost, TaskCategory, TaskDefinition};
    use valley_runtime::{SaveFormat, StateRepository};

    fn catalog() -> Vec<TaskDefinition> {
        (0..4)
            .map(|i| {
                TaskDefinition::new(
                    format!("Clinic {i}"),
                    TaskCategory::Community,
                    ResourceCost::new(50_000, 20),
                )
            })
            .collect()
    }

    fn session(repository: Option<Arc<dyn StateRepository>>) -> GameSession {
        let mut builder = GameSession::builder()
            .config(valley_core::GameConfig::with_dimensions(2, 2))
            .players(["Ada", "Ben"])
            .catalog(catalog())
            .seed(11)
            .dice(LoadedDice::new(1));
        if let Some(repository) = repository {
            builder = builder.repository(repository);
        }
        builder.build().unwrap()
    }

    fn run(app: &mut CliApp, script: &str) -> String {
        let mut out = Vec::new();
        app.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_turn_reports_events_and_errors() {
        let mut app = CliApp::new(session(None));
        let output = run(&mut app, "roll\nroll\nfly\nmoves\nquit\nroll\n");

        assert!(output.contains("Ada rolled 1"), "{output}");
        assert!(output.contains("! "), "{output}");
        assert!(output.contains("unknown command 'fly'"), "{output}");
        assert!(output.contains("reachable: "), "{output}");
        assert_eq!(output.matches("Ada rolled").count(), 1);
    }

    #[test]
    fn save_then_load_through_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileStateRepository::new(dir.path(), SaveFormat::Json).unwrap();
        let mut app = CliApp::new(session(Some(Arc::new(repository))));

        let output = run(&mut app, "save\nsaves\nroll\nload 0\nstatus\n");
        assert!(output.contains("saved as 0"), "{output}");
        assert!(output.contains("saves: 0"), "{output}");
        assert!(output.contains("loaded save 0"), "{output}");
        assert!(app.session().state().turn.last_roll.is_none());
    }

    #[test]
    fn persistence_commands_without_repository_are_reported() {
        let mut app = CliApp::new(session(None));
        let output = run(&mut app, "save\n");
        assert!(output.contains("no state repository"), "{output}");
    }
}
