//! Plain-text rendering of session state and events.

use std::io::{self, Write};

use valley_core::state::format_amount;
use valley_core::{
    GameState, NodeId, PlayerState, ResourceCost, SelectionPreview, TaskCategory, TurnPhase,
};
use valley_runtime::{GameEvent, GameSession};

fn cost(cost: &ResourceCost) -> String {
    format!(
        "{} money / {} people",
        format_amount(cost.money),
        format_amount(cost.people)
    )
}

fn name(state: &GameState, player: valley_core::PlayerId) -> String {
    state
        .player(player)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| player.to_string())
}

/// What the active player should do next.
fn prompt_hint(phase: TurnPhase) -> &'static str {
    match phase {
        TurnPhase::AwaitingPendingDecision => "accept or decline the delegated task",
        TurnPhase::AwaitingRoll => "roll the dice",
        TurnPhase::AwaitingMove => "move",
        TurnPhase::AwaitingEndTurn => "take a task decision or end the turn",
        TurnPhase::GameOver => "the game is over",
    }
}

pub fn status(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    let state = session.state();
    let Some(player) = session.active_player() else {
        return writeln!(out, "no players seated");
    };
    writeln!(
        out,
        "{} ({}) on {} | {} | year {} | {}",
        player.name,
        player.id,
        player.node,
        state.turn.season,
        state.turn.years,
        prompt_hint(session.phase())
    )?;
    if let Some(face) = state.turn.last_roll {
        writeln!(
            out,
            "rolled {} | moves left {}",
            face,
            session.moves_remaining()
        )?;
    }
    node_summary(out, state, player.node)?;
    balances(out, player)
}

fn balances(out: &mut impl Write, player: &PlayerState) -> io::Result<()> {
    writeln!(
        out,
        "  money {} | people {} | morale {:.1}",
        format_amount(player.resources.money),
        format_amount(player.resources.people),
        player.morale
    )?;
    if let Some(category) = player.category {
        writeln!(out, "  working on {category}")?;
    }
    if let Some(node) = player.active_task {
        writeln!(out, "  task on {node}: {} turn(s) left", player.progress_ticks)?;
    }
    if !player.pending.is_empty() {
        writeln!(out, "  {} delegated task(s) waiting", player.pending.len())?;
    }
    Ok(())
}

fn node_summary(out: &mut impl Write, state: &GameState, node: NodeId) -> io::Result<()> {
    let Some(task) = state.board.task(node) else {
        return writeln!(out, "  nothing to do here");
    };
    let mut flags = Vec::new();
    if let Some(owner) = task.owner {
        flags.push(format!("owned by {}", name(state, owner)));
    }
    if task.is_completed() {
        flags.push("completed".to_owned());
    }
    if task.is_opened() {
        flags.push("opened".to_owned());
    }
    writeln!(
        out,
        "  [{}] {} ({}){}",
        task.category(),
        task.definition.name,
        cost(task.cost()),
        if flags.is_empty() {
            String::new()
        } else {
            format!(" - {}", flags.join(", "))
        }
    )?;
    if !task.definition.description.is_empty() {
        writeln!(out, "  {}", task.definition.description)?;
    }
    Ok(())
}

pub fn moves(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    let moves = session.legal_moves();
    if moves.is_empty() {
        return writeln!(out, "no moves available");
    }
    let list: Vec<String> = moves.iter().map(|node| format!("{}", node.0)).collect();
    writeln!(out, "reachable: {}", list.join(", "))
}

pub fn weather(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    match session.weather() {
        Some(weather) => writeln!(
            out,
            "{} in {} (moves {:+})",
            weather,
            session.season(),
            weather.modifier()
        ),
        None => writeln!(out, "{}: roll to see the weather", session.season()),
    }
}

pub fn preview(out: &mut impl Write, preview: &SelectionPreview) -> io::Result<()> {
    writeln!(
        out,
        "fee {} | balance after {} money / {} people{}",
        cost(&preview.fee),
        format_amount(preview.balance_after.money),
        format_amount(preview.balance_after.people),
        if preview.claims_category {
            format!(" | claims {}", preview.category)
        } else {
            String::new()
        }
    )
}

pub fn tasks(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    let state = session.state();
    let Some(player) = session.active_player() else {
        return Ok(());
    };
    let mut owned = state.owned_tasks(player.id).peekable();
    if owned.peek().is_none() {
        return writeln!(out, "no tasks yet");
    }
    for (node, task) in owned {
        let done = if task.is_completed() { "done" } else { "open" };
        writeln!(
            out,
            "{:>4}  [{}] {} ({}, {} turn(s)) {}",
            node.to_string(),
            task.category(),
            task.definition.name,
            cost(task.cost()),
            task.definition.duration,
            done
        )?;
    }
    Ok(())
}

pub fn steps(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    let task = session
        .current_node()
        .and_then(|node| session.state().board.task(node));
    let Some(task) = task else {
        return writeln!(out, "no task here");
    };
    if task.definition.steps.is_empty() {
        return writeln!(out, "{} has no sub-steps", task.definition.name);
    }
    for (i, step) in task.definition.steps.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, step.name)?;
    }
    Ok(())
}

pub fn players(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    let state = session.state();
    for player in session.players() {
        let marker = if player.id == state.turn.active { '>' } else { ' ' };
        writeln!(
            out,
            "{marker} {} {} on {} | {} tasks",
            player.id,
            player.name,
            player.node,
            player.tasks.len()
        )?;
        balances(out, player)?;
    }
    for category in TaskCategory::OBJECTIVES {
        if let Some(owner) = session.objective_owner(category) {
            let ready = if session.objective_ready(category) { " (ready)" } else { "" };
            writeln!(out, "  {category}: {}{ready}", name(state, owner))?;
        }
    }
    Ok(())
}

/// One line describing `event`, or `None` for events the table need not see.
pub fn event_line(event: &GameEvent, state: &GameState) -> Option<String> {
    let line = match event {
        GameEvent::DiceRolled {
            player,
            face,
            weather,
            max_moves,
        } => format!(
            "{} rolled {face}, {weather}: {max_moves} move(s)",
            name(state, *player)
        ),
        GameEvent::PlayerMoved {
            to,
            moves_remaining,
            ..
        } => format!("moved to {to} ({moves_remaining} left)"),
        GameEvent::TurnEnded {
            next,
            season,
            new_round,
            ..
        } => {
            if *new_round {
                format!("new round: {season}. {}'s turn", name(state, *next))
            } else {
                format!("{}'s turn", name(state, *next))
            }
        }
        GameEvent::TaskCompleted {
            player,
            node,
            morale_delta,
        } => format!(
            "{} completed the task on {node} (morale {morale_delta:+.1})",
            name(state, *player)
        ),
        GameEvent::CategoryReleased { player, category } => {
            format!("{} finished every {category} task", name(state, *player))
        }
        GameEvent::TaskSelected { node, fee, .. } => {
            format!("selected the task on {node}, paid {}", cost(fee))
        }
        GameEvent::CategoryClaimed { player, category } => {
            format!("{} claimed {category}", name(state, *player))
        }
        GameEvent::ObjectiveReady { player, category } => {
            format!("{}'s {category} objective is ready", name(state, *player))
        }
        GameEvent::TaskStarted { node, ticks, .. } => {
            format!("started the task on {node}: {ticks} turn(s)")
        }
        GameEvent::ChanceOpened { grant, .. } => match grant {
            Some(grant) => format!("chance! gained {}", cost(grant)),
            None => "this chance square was already opened".to_owned(),
        },
        GameEvent::TransferRequested { node, target, .. } => {
            format!("offered the task on {node} to {}", name(state, *target))
        }
        GameEvent::PendingResolved { node, decision, .. } => {
            format!("{decision} the task on {node}")
        }
        GameEvent::GameOver(outcome) => format!(
            "game over: {} ran out of {}",
            name(state, outcome.player),
            outcome.depleted
        ),
        GameEvent::SessionSaved { nonce } => format!("saved as {nonce}"),
        GameEvent::SessionLoaded { nonce } => format!("loaded save {nonce}"),
        GameEvent::CommandRejected { .. } => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valley_core::board::BoardGraph;
    use valley_core::{GameOutcome, PendingDecision, PlayerId, ResourceKind, ResourcePool};

    fn state() -> GameState {
        let mut state = GameState::new(1, "standard", BoardGraph::unlinked(1, 1));
        state.players.push(PlayerState::new(
            PlayerId(0),
            "Ada",
            NodeId::HUB,
            ResourcePool::new(10, 10),
            100.0,
        ));
        state
    }

    #[test]
    fn events_use_player_names() {
        let state = state();
        let line = event_line(
            &GameEvent::GameOver(GameOutcome {
                player: PlayerId(0),
                depleted: ResourceKind::Money,
            }),
            &state,
        );
        assert_eq!(line.as_deref(), Some("game over: Ada ran out of Money"));

        let line = event_line(
            &GameEvent::PendingResolved {
                player: PlayerId(0),
                node: NodeId(1),
                decision: PendingDecision::Decline,
            },
            &state,
        );
        assert_eq!(line.as_deref(), Some("decline the task on #1"));
    }

    #[test]
    fn rejections_are_not_echoed_as_events() {
        let event = GameEvent::CommandRejected {
            player: PlayerId(0),
            action: "roll_dice".into(),
            code: "X".into(),
        };
        assert_eq!(event_line(&event, &state()), None);
    }
}
