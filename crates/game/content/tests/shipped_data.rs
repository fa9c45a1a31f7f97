use std::path::PathBuf;

use valley_content::ContentFactory;
use valley_core::{GameConfig, GameState, PcgRng, ResourceCost, TaskCategory};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_catalog_fills_the_default_board() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().expect("config");
    let tasks = factory.load_tasks().expect("tasks");

    assert_eq!(tasks.len(), config.task_capacity());
    assert_eq!(config.objective_threshold, GameConfig::DEFAULT_OBJECTIVE_THRESHOLD);
    assert!(tasks.iter().any(|task| task.category.is_chance()));
    assert!(tasks.iter().all(|task| !task.description.contains("{m}")));
}

#[test]
fn shipped_content_builds_a_session() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().expect("config");
    let tasks = factory.load_tasks().expect("tasks");

    let state = GameState::new_session(&config, &["Ada", "Ben"], &tasks, 1, &PcgRng)
        .expect("session");
    assert!(state.board.is_connected());
    assert_eq!(state.board.task_nodes().count(), tasks.len());
}

#[test]
fn one_player_can_make_an_objective_ready_with_shipped_content() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().expect("config");
    let tasks = factory.load_tasks().expect("tasks");

    let reachable: Vec<TaskCategory> = TaskCategory::OBJECTIVES
        .into_iter()
        .filter(|&category| {
            let owned: Vec<_> = tasks.iter().filter(|task| task.category == category).collect();
            let fees = owned.iter().fold(ResourceCost::default(), |total, task| {
                let fee = task.resources.fee(config.selection_fee_percent);
                ResourceCost::new(total.money + fee.money, total.people + fee.people)
            });
            owned.len() >= config.objective_threshold
                && fees.money < config.starting_money
                && fees.people < config.starting_people
        })
        .collect();
    assert_eq!(reachable, [TaskCategory::Community]);

    // Every catalog entry lands on the board, so all of them can be selected.
    let state = GameState::new_session(&config, &["Ada"], &tasks, 3, &PcgRng).expect("session");
    let on_board = state
        .board
        .task_nodes()
        .filter_map(|node| state.board.task(node))
        .filter(|task| task.category() == TaskCategory::Community)
        .count();
    assert_eq!(on_board, 10);
}
