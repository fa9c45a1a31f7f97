mod common;

use std::sync::Arc;

use common::{builder, roll_and_step};
use valley_core::{NodeId, PlayerId};
use valley_runtime::{
    FileStateRepository, GameEvent, InMemoryStateRepo, RuntimeError, SaveFormat, StateRepository,
    Topic,
};

#[test]
fn save_and_load_restore_the_exact_state() {
    let repository = Arc::new(InMemoryStateRepo::new());
    let mut session = builder(1).repository(repository.clone()).build().unwrap();
    let mut session_rx = session.events().subscribe(Topic::Session);

    roll_and_step(&mut session);
    let nonce = session.save().unwrap();
    assert_eq!(nonce, 2);
    let saved = session.state().clone();

    session.select_task(NodeId(1)).unwrap();
    session.end_turn().unwrap();
    assert_ne!(session.state(), &saved);

    session.load(nonce).unwrap();
    assert_eq!(session.state(), &saved);
    assert_eq!(session.saves().unwrap(), vec![2]);

    assert_eq!(session_rx.try_recv().unwrap(), GameEvent::SessionSaved { nonce: 2 });
    assert_eq!(session_rx.try_recv().unwrap(), GameEvent::SessionLoaded { nonce: 2 });
}

#[test]
fn resume_from_disk_in_both_formats() {
    for format in [SaveFormat::Json, SaveFormat::Bincode] {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(FileStateRepository::new(dir.path(), format).unwrap());

        let mut session = builder(1).repository(repository.clone()).build().unwrap();
        roll_and_step(&mut session);
        session.select_task(NodeId(1)).unwrap();
        let nonce = session.save().unwrap();

        let resumed = builder(1)
            .repository(repository.clone())
            .resume(nonce)
            .build()
            .unwrap();
        assert_eq!(resumed.state(), session.state(), "{format}");
        assert_eq!(resumed.config(), session.config());
        assert!(repository.exists(nonce));
    }
}

#[test]
fn persistence_needs_a_repository() {
    let mut session = builder(1).build().unwrap();
    assert!(matches!(session.save(), Err(RuntimeError::NoRepository)));
    assert!(matches!(session.load(0), Err(RuntimeError::NoRepository)));

    let repository = Arc::new(InMemoryStateRepo::new());
    let result = builder(1).repository(repository).resume(9).build();
    assert!(matches!(result, Err(RuntimeError::SaveNotFound(9))));
}

#[test]
fn commands_after_load_continue_from_the_saved_turn() {
    let repository = Arc::new(InMemoryStateRepo::new());
    let mut session = builder(1).repository(repository).build().unwrap();
    let nonce = session.save().unwrap();

    roll_and_step(&mut session);
    session.end_turn().unwrap();
    assert_eq!(session.active_player().unwrap().id, PlayerId(1));

    session.load(nonce).unwrap();
    assert_eq!(session.active_player().unwrap().id, PlayerId(0));
    roll_and_step(&mut session);
}
