//! Event extraction from committed commands.

use valley_core::{
    ActionResult, ChanceOutcome, ExecutionOutcome, GameState, PlayerId, SelectionOutcome,
};

use super::game_event::GameEvent;

/// Extract high-level events from the outcome of a committed command.
///
/// `state` is the state after the command. Events are ordered by cause:
/// the command's own event first, then derived ones (claims, completions),
/// with game over last.
pub fn extract_events(
    actor: PlayerId,
    outcome: &ExecutionOutcome,
    state: &GameState,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match &outcome.result {
        ActionResult::Rolled(roll) => events.push(GameEvent::DiceRolled {
            player: actor,
            face: roll.face,
            weather: roll.weather,
            max_moves: roll.max_moves,
        }),
        ActionResult::Moved { from, to } => events.push(GameEvent::PlayerMoved {
            player: actor,
            from: *from,
            to: *to,
            moves_remaining: state.moves_remaining(),
        }),
        ActionResult::Selected(selection) => {
            push_selection(&mut events, actor, selection, false);
        }
        ActionResult::Started { node, ticks } => events.push(GameEvent::TaskStarted {
            player: actor,
            node: *node,
            ticks: *ticks,
        }),
        ActionResult::Chance(chance) => {
            let (node, grant) = match chance {
                ChanceOutcome::Granted { node, grant } => (*node, Some(*grant)),
                ChanceOutcome::AlreadyOpened { node } => (*node, None),
            };
            events.push(GameEvent::ChanceOpened {
                player: actor,
                node,
                grant,
            });
        }
        ActionResult::TransferRequested { node, target } => {
            events.push(GameEvent::TransferRequested {
                from: actor,
                node: *node,
                target: *target,
            });
        }
        ActionResult::PendingResolved {
            node,
            decision,
            selection,
        } => {
            events.push(GameEvent::PendingResolved {
                player: actor,
                node: *node,
                decision: *decision,
            });
            if let Some(selection) = selection {
                push_selection(&mut events, actor, selection, true);
            }
        }
        ActionResult::TurnEnded(ended) => {
            if let Some(node) = ended.progress.completed {
                events.push(GameEvent::TaskCompleted {
                    player: ended.ended,
                    node,
                    morale_delta: ended.progress.morale_delta,
                });
            }
            if let Some(category) = ended.progress.released {
                events.push(GameEvent::CategoryReleased {
                    player: ended.ended,
                    category,
                });
            }
            events.push(GameEvent::TurnEnded {
                ended: ended.ended,
                next: ended.next,
                season: state.turn.season,
                years: state.turn.years,
                new_round: ended.new_round,
            });
        }
    }

    if let Some(outcome) = outcome.game_over {
        tracing::info!(
            target: "runtime::events",
            player = ?outcome.player,
            depleted = %outcome.depleted,
            "game over"
        );
        events.push(GameEvent::GameOver(outcome));
    }

    events
}

fn push_selection(
    events: &mut Vec<GameEvent>,
    actor: PlayerId,
    selection: &SelectionOutcome,
    delegated: bool,
) {
    events.push(GameEvent::TaskSelected {
        player: actor,
        node: selection.node,
        category: selection.category,
        fee: selection.fee,
        delegated,
    });
    if selection.claimed_category {
        events.push(GameEvent::CategoryClaimed {
            player: actor,
            category: selection.category,
        });
    }
    if selection.objective_ready {
        events.push(GameEvent::ObjectiveReady {
            player: actor,
            category: selection.category,
        });
    }
}
