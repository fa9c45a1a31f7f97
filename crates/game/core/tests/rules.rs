mod common;

use common::{Harness, NEUTRAL_DRAW, path_board, seat, spend_all_moves, task, teleport};
use valley_core::action::{Action, ActionResult, ChanceOutcome, MoveError, TurnError};
use valley_core::board;
use valley_core::weather::move_budget;
use valley_core::{
    BoardGraph, ExecuteError, GameConfig, GameOutcome, GameState, NodeId, PcgRng, PlayerId,
    ResourceCost, ResourceKind, ResourcePool, Season, TaskCategory, TaskError, TurnPhase, Weather,
};

const ADA: PlayerId = PlayerId(0);
const BEN: PlayerId = PlayerId(1);

#[test]
fn generated_boards_leave_no_node_isolated() {
    let catalog = vec![task("Food bank", TaskCategory::Community, 20_000, 30)];
    for rows in 1..=6 {
        for cols in 1..=6 {
            for seed in 0..10 {
                let board = board::generate(rows, cols, &catalog, seed, &PcgRng);
                assert!(board.is_connected(), "{rows}x{cols} seed {seed}");
                for node in board.nodes().iter().filter(|node| !node.is_hub) {
                    assert!(node.degree() >= 1, "{rows}x{cols} seed {seed} {}", node.id);
                }
            }
        }
    }
}

#[test]
fn move_budget_never_drops_below_one() {
    for face in 1..=6u8 {
        for weather in Weather::ALL {
            let expected = (i16::from(face) + i16::from(weather.modifier())).max(1);
            assert_eq!(i16::from(move_budget(face, weather)), expected);
        }
    }
}

#[test]
fn moves_cannot_backtrack_within_a_turn() {
    let harness = Harness::new(3, NEUTRAL_DRAW);
    let mut state = seat(path_board(3), &["Ada"], NodeId::HUB, ResourcePool::new(1_000, 100));
    harness.run(&mut state, Action::roll_dice(ADA));
    assert_eq!(state.turn.max_moves, Some(3));

    harness.run(&mut state, Action::move_to(ADA, NodeId::HUB, NodeId(1)));
    let err = harness
        .execute(&mut state, Action::move_to(ADA, NodeId(1), NodeId::HUB))
        .unwrap_err();
    assert_eq!(
        err.move_error(),
        Some(&MoveError::AlreadyVisited { node: NodeId::HUB })
    );

    harness.run(&mut state, Action::move_to(ADA, NodeId(1), NodeId(2)));
    assert_eq!(state.legal_moves(), vec![NodeId(3)]);
    harness.run(&mut state, Action::move_to(ADA, NodeId(2), NodeId(3)));

    assert_eq!(state.turn.moves_spent, 3);
    let err = harness
        .execute(&mut state, Action::move_to(ADA, NodeId(3), NodeId(2)))
        .unwrap_err();
    assert_eq!(err.move_error(), Some(&MoveError::NoMovesLeft));
    assert_eq!(state.turn.moves_spent, 3);
    assert_eq!(state.phase(), TurnPhase::AwaitingEndTurn);
}

#[test]
fn rejected_moves_report_their_reason() {
    let harness = Harness::new(2, NEUTRAL_DRAW);
    let mut state = seat(path_board(3), &["Ada"], NodeId::HUB, ResourcePool::new(1_000, 100));

    let err = harness
        .execute(&mut state, Action::move_to(ADA, NodeId::HUB, NodeId(1)))
        .unwrap_err();
    assert_eq!(err.move_error(), Some(&MoveError::NoMovesLeft));

    harness.run(&mut state, Action::roll_dice(ADA));
    let before = state.clone();

    let err = harness
        .execute(&mut state, Action::move_to(ADA, NodeId::HUB, NodeId(2)))
        .unwrap_err();
    assert_eq!(
        err.move_error(),
        Some(&MoveError::NotAdjacent {
            from: NodeId::HUB,
            to: NodeId(2),
        })
    );

    let err = harness
        .execute(&mut state, Action::move_to(ADA, NodeId(1), NodeId(2)))
        .unwrap_err();
    assert_eq!(
        err.move_error(),
        Some(&MoveError::WrongOccupant {
            player: ADA,
            node: NodeId(1),
        })
    );

    let err = harness
        .execute(&mut state, Action::move_to(ADA, NodeId::HUB, NodeId(99)))
        .unwrap_err();
    assert_eq!(err.move_error(), Some(&MoveError::UnknownNode(NodeId(99))));
    assert_eq!(state, before);
}

#[test]
fn roll_is_rejected_twice_and_while_rolling() {
    let harness = Harness::new(4, NEUTRAL_DRAW);
    let mut state = seat(path_board(2), &["Ada"], NodeId::HUB, ResourcePool::new(1_000, 100));

    let mut rolling = Harness::new(4, NEUTRAL_DRAW);
    rolling.dice = rolling.dice.rolling();
    let err = rolling
        .execute(&mut state, Action::roll_dice(ADA))
        .unwrap_err();
    assert_eq!(err.turn_error(), Some(&TurnError::RollInProgress));
    assert!(!state.turn.has_rolled());

    harness.run(&mut state, Action::roll_dice(ADA));
    let err = harness
        .execute(&mut state, Action::roll_dice(ADA))
        .unwrap_err();
    assert_eq!(err.turn_error(), Some(&TurnError::AlreadyRolled));
}

#[test]
fn ending_a_turn_requires_every_move_spent() {
    let harness = Harness::new(2, NEUTRAL_DRAW);
    let mut state = seat(path_board(3), &["Ada", "Ben"], NodeId::HUB, ResourcePool::new(1_000, 100));

    let err = harness
        .execute(&mut state, Action::end_turn(ADA))
        .unwrap_err();
    assert_eq!(err.turn_error(), Some(&TurnError::NotRolled));

    harness.run(&mut state, Action::roll_dice(ADA));
    let err = harness
        .execute(&mut state, Action::end_turn(ADA))
        .unwrap_err();
    assert_eq!(err.turn_error(), Some(&TurnError::MovesRemaining { remaining: 2 }));

    harness.run(&mut state, Action::move_to(ADA, NodeId::HUB, NodeId(1)));
    harness.run(&mut state, Action::move_to(ADA, NodeId(1), NodeId(2)));
    let ActionResult::TurnEnded(ended) = harness.run(&mut state, Action::end_turn(ADA)) else {
        panic!("expected the turn to end");
    };
    assert_eq!(ended.next, BEN);
    assert!(!ended.new_round);
    assert!(state.player(ADA).expect("ada").visited.is_empty());
    assert!(state.player(BEN).expect("ben").has_visited(NodeId::HUB));
    assert_eq!(state.turn.max_moves, None);
    assert_eq!(state.turn.moves_spent, 0);
}

#[test]
fn completed_rounds_advance_season_and_years() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let mut state = seat(path_board(1), &["Ada", "Ben"], NodeId::HUB, ResourcePool::new(1_000, 100));

    for round in 1..=5u32 {
        for player in [ADA, BEN] {
            spend_all_moves(&mut state);
            harness.run(&mut state, Action::end_turn(player));
        }
        assert_eq!(state.turn.global_turn, round);
        assert_eq!(state.turn.years, round / 4);
        assert_eq!(state.season(), Season::ALL[(round % 4) as usize]);
    }
    assert_eq!(state.turn.active, ADA);
}

#[test]
fn only_the_active_player_may_act() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let mut state = seat(path_board(2), &["Ada", "Ben"], NodeId::HUB, ResourcePool::new(1_000, 100));

    let err = harness
        .execute(&mut state, Action::roll_dice(BEN))
        .unwrap_err();
    assert_eq!(err, ExecuteError::not_your_turn(BEN, ADA));
}

#[test]
fn selection_fee_is_charged_once() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let costs = [(0, 0), (4, 4), (5, 5), (99, 1), (125_000, 333), (1_999_999, 999)];

    for (money, people) in costs {
        let mut board = path_board(1);
        board.place_task(NodeId(1), task("Town fair", TaskCategory::Business, money, people));
        let mut state = seat(board, &["Ada", "Ben"], NodeId(1), ResourcePool::new(2_000_000, 1_000));
        spend_all_moves(&mut state);

        harness.run(&mut state, Action::select_task(ADA, NodeId(1)));
        let expected = ResourcePool::new(2_000_000 - money * 20 / 100, 1_000 - people * 20 / 100);
        assert_eq!(state.player(ADA).expect("ada").resources, expected);

        let err = harness
            .execute(&mut state, Action::select_task(ADA, NodeId(1)))
            .unwrap_err();
        assert_eq!(err.task_error(), Some(&TaskError::AlreadyTaken(NodeId(1))));
        assert_eq!(state.player(ADA).expect("ada").resources, expected);
    }
}

#[test]
fn insufficient_balance_blocks_selection() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let mut board = path_board(1);
    board.place_task(NodeId(1), task("Startup hub", TaskCategory::Business, 1_000, 1_000));
    let mut state = seat(board, &["Ada"], NodeId(1), ResourcePool::new(5_000, 150));
    spend_all_moves(&mut state);
    let before = state.clone();

    let err = harness
        .execute(&mut state, Action::select_task(ADA, NodeId(1)))
        .unwrap_err();
    assert_eq!(
        err.task_error(),
        Some(&TaskError::InsufficientResources {
            resource: ResourceKind::People,
            required: 200,
            available: 150,
        })
    );
    assert_eq!(state, before);
}

#[test]
fn task_decisions_require_spent_moves() {
    let harness = Harness::new(2, NEUTRAL_DRAW);
    let mut board = path_board(2);
    board.place_task(NodeId(1), task("Library", TaskCategory::Educational, 1_000, 1));
    let mut state = seat(board, &["Ada"], NodeId::HUB, ResourcePool::new(5_000, 150));

    harness.run(&mut state, Action::roll_dice(ADA));
    harness.run(&mut state, Action::move_to(ADA, NodeId::HUB, NodeId(1)));
    let err = harness
        .execute(&mut state, Action::select_task(ADA, NodeId(1)))
        .unwrap_err();
    assert_eq!(
        err,
        ExecuteError::WrongPhase {
            action: "select_task",
            phase: TurnPhase::AwaitingMove,
        }
    );
}

#[test]
fn chance_square_grants_once() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let mut board = path_board(1);
    board.place_task(NodeId(1), task("Lucky donation", TaskCategory::Chance, 5_000, 10));
    let mut state = seat(board, &["Ada"], NodeId(1), ResourcePool::new(1_000, 100));
    spend_all_moves(&mut state);

    let err = harness
        .execute(&mut state, Action::select_task(ADA, NodeId(1)))
        .unwrap_err();
    assert_eq!(err.task_error(), Some(&TaskError::ChanceSquare(NodeId(1))));

    let result = harness.run(&mut state, Action::open_chance(ADA, NodeId(1)));
    assert_eq!(
        result,
        ActionResult::Chance(ChanceOutcome::Granted {
            node: NodeId(1),
            grant: ResourceCost::new(5_000, 10),
        })
    );
    let granted = state.player(ADA).expect("ada").resources;
    assert_eq!(granted, ResourcePool::new(6_000, 110));

    for _ in 0..3 {
        let result = harness.run(&mut state, Action::open_chance(ADA, NodeId(1)));
        assert_eq!(
            result,
            ActionResult::Chance(ChanceOutcome::AlreadyOpened { node: NodeId(1) })
        );
        assert_eq!(state.player(ADA).expect("ada").resources, granted);
    }
    let task = state.board.task(NodeId(1)).expect("chance");
    assert_eq!(task.owner, None);
    assert!(!task.is_taken());
}

#[test]
fn started_task_completes_and_releases_the_lock() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let mut board = path_board(1);
    board.place_task(
        NodeId(1),
        task("Job fair", TaskCategory::Business, 1_000, 10)
            .with_duration(2)
            .with_morale_impact(-150.0),
    );
    let mut state = seat(board, &["Ada"], NodeId(1), ResourcePool::new(5_000, 150));
    spend_all_moves(&mut state);

    harness.run(&mut state, Action::select_task(ADA, NodeId(1)));
    let result = harness.run(&mut state, Action::start_task(ADA, NodeId(1)));
    assert_eq!(
        result,
        ActionResult::Started {
            node: NodeId(1),
            ticks: 2,
        }
    );
    let err = harness
        .execute(&mut state, Action::start_task(ADA, NodeId(1)))
        .unwrap_err();
    assert_eq!(err.task_error(), Some(&TaskError::TaskInProgress(ADA)));

    let ActionResult::TurnEnded(first) = harness.run(&mut state, Action::end_turn(ADA)) else {
        panic!("expected the turn to end");
    };
    assert_eq!(first.progress.completed, None);
    assert_eq!(state.player(ADA).expect("ada").progress_ticks, 1);

    spend_all_moves(&mut state);
    let ActionResult::TurnEnded(second) = harness.run(&mut state, Action::end_turn(ADA)) else {
        panic!("expected the turn to end");
    };
    assert_eq!(second.progress.completed, Some(NodeId(1)));
    assert_eq!(second.progress.released, Some(TaskCategory::Business));

    let ada = state.player(ADA).expect("ada");
    assert_eq!(ada.morale, 0.0);
    assert_eq!(ada.category, None);
    assert_eq!(ada.active_task, None);
    assert!(state.board.task(NodeId(1)).expect("task").is_completed());
}

#[test]
fn objective_gate_blocks_starting_until_the_category_is_ready() {
    let mut harness = Harness::new(1, NEUTRAL_DRAW);
    harness.config.require_objective_ready = true;
    harness.config.objective_threshold = 2;

    let mut board = path_board(2);
    board.place_task(NodeId(1), task("Workshop", TaskCategory::Business, 1_000, 10));
    board.place_task(NodeId(2), task("Market", TaskCategory::Business, 1_000, 10));
    let mut state = seat(board, &["Ada"], NodeId(1), ResourcePool::new(5_000, 150));
    spend_all_moves(&mut state);

    harness.run(&mut state, Action::select_task(ADA, NodeId(1)));
    let before = state.clone();
    let err = harness
        .execute(&mut state, Action::start_task(ADA, NodeId(1)))
        .unwrap_err();
    assert_eq!(
        err.task_error(),
        Some(&TaskError::ObjectiveNotReady {
            category: TaskCategory::Business,
        })
    );
    assert_eq!(state, before);

    teleport(&mut state, ADA, NodeId(2));
    harness.run(&mut state, Action::select_task(ADA, NodeId(2)));
    assert!(state.objectives.is_ready(TaskCategory::Business));
    harness.run(&mut state, Action::start_task(ADA, NodeId(2)));
    assert_eq!(state.player(ADA).expect("ada").active_task, Some(NodeId(2)));
}

#[test]
fn depleting_a_resource_ends_the_game() {
    let harness = Harness::new(1, NEUTRAL_DRAW);
    let mut board = path_board(1);
    board.place_task(NodeId(1), task("Harbor", TaskCategory::Business, 500, 10));
    let mut state = seat(board, &["Ada", "Ben"], NodeId(1), ResourcePool::new(100, 100));
    spend_all_moves(&mut state);

    let outcome = harness
        .execute(&mut state, Action::select_task(ADA, NodeId(1)))
        .expect("selection");
    let expected = GameOutcome {
        player: ADA,
        depleted: ResourceKind::Money,
    };
    assert_eq!(outcome.game_over, Some(expected));
    assert_eq!(state.phase(), TurnPhase::GameOver);

    let err = harness
        .execute(&mut state, Action::end_turn(ADA))
        .unwrap_err();
    assert_eq!(err, ExecuteError::GameOver(expected));
    assert_eq!(state.player(ADA).expect("ada").resources.money, 0);
}

#[test]
fn new_session_seats_everyone_on_the_hub() {
    let config = GameConfig::default();
    let catalog = vec![task("Food bank", TaskCategory::Community, 20_000, 30)];
    let state =
        GameState::new_session(&config, &["Ada", "Ben", "Cy"], &catalog, 42, &PcgRng).expect("session");

    assert_eq!(state.players.len(), 3);
    assert_eq!(state.board.hub().occupants, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    for player in &state.players {
        assert_eq!(player.node, NodeId::HUB);
        assert_eq!(player.resources, ResourcePool::new(2_000_000, 1_000));
    }
    assert_eq!(state.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(state.board.task_nodes().count(), 1);

    let replay =
        GameState::new_session(&config, &["Ada", "Ben", "Cy"], &catalog, 42, &PcgRng).expect("session");
    assert_eq!(state, replay);
}

#[test]
fn hand_built_boards_keep_edges_undirected() {
    let mut board = BoardGraph::unlinked(2, 2);
    assert!(board.link(NodeId::HUB, NodeId(1)));
    assert!(board.link(NodeId(1), NodeId(2)));
    assert!(!board.link(NodeId(2), NodeId(2)));

    for node in board.nodes() {
        for neighbor in &node.neighbors {
            assert!(board.are_adjacent(*neighbor, node.id));
        }
    }
}
