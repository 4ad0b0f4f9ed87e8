// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_mission, create_test_passenger, register, sbco};
use crate::{Persistence, PersistenceError};
use airlift::{
    Command, ExecuteError, Executed, StateChange, StationState, StationStore, TransitionResult,
    apply, execute,
};
use airlift_domain::{ManifestSource, Mission, RankTable, WaitlistEntry};

fn allocate(entry_id: i64, mission_id: i64) -> Command {
    Command::AllocatePassenger {
        entry_id,
        mission_id,
    }
}

#[test]
fn test_allocation_writes_both_records() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let passenger = create_test_passenger("Ana Souza", "CAP", "SBRF", 4);
    let entry_id: i64 = register(&mut persistence, &sbco(), passenger.clone());
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBSM, SBRF");

    let executed: Executed =
        execute(&mut persistence, &sbco(), allocate(entry_id, mission_id)).unwrap();
    let manifest_entry_id: i64 = executed.assigned_id.unwrap();

    let state: StationState = persistence.load_state(&sbco()).unwrap();
    let entry: &WaitlistEntry = state.waitlist_entry(entry_id).unwrap();
    assert!(entry.is_allocated());
    assert_eq!(entry.allocated_mission_id(), Some(mission_id));

    let mission: &Mission = state.mission(mission_id).unwrap();
    assert_eq!(mission.manifest.len(), 1);
    assert_eq!(mission.manifest[0].manifest_entry_id, Some(manifest_entry_id));
    assert_eq!(
        mission.manifest[0].source,
        ManifestSource::FromWaitlist {
            waitlist_entry_id: entry_id
        }
    );
    assert_eq!(mission.manifest[0].passenger, passenger);
    assert_eq!(mission.totals().passenger_count, 1);
    assert!((mission.totals().total() - 112.5).abs() < f64::EPSILON);
}

#[test]
fn test_allocated_entry_leaves_views_but_is_retained() {
    let ranks: RankTable = RankTable::default();
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let second: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Bruno Lima", "MAJ", "SBRF", 6),
    );
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");

    execute(&mut persistence, &sbco(), allocate(first, mission_id)).unwrap();

    let state: StationState = persistence.load_state(&sbco()).unwrap();
    let compatible: Vec<Option<i64>> = state
        .compatible_entries(mission_id, &ranks)
        .unwrap()
        .iter()
        .map(|e| e.entry_id)
        .collect();
    assert_eq!(compatible, [Some(second)]);
    assert_eq!(state.active_waitlist(&ranks).len(), 1);
    assert_eq!(state.waitlist.len(), 2);
    assert_eq!(persistence.count_waiting(&sbco()).unwrap(), 1);
}

#[test]
fn test_second_allocation_is_rejected_before_storage() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let first: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    let second: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");

    execute(&mut persistence, &sbco(), allocate(entry_id, first)).unwrap();
    let result: Result<Executed, ExecuteError<PersistenceError>> =
        execute(&mut persistence, &sbco(), allocate(entry_id, second));

    assert!(matches!(result, Err(ExecuteError::Rejected(_))));
    let state: StationState = persistence.load_state(&sbco()).unwrap();
    assert!(state.mission(second).unwrap().manifest.is_empty());
    assert_eq!(
        state.waitlist_entry(entry_id).unwrap().allocated_mission_id(),
        Some(first)
    );
}

#[test]
fn test_stale_allocation_conflicts_and_writes_nothing() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let first: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    let second: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");

    // Two writers both read the entry while it was still waiting.
    let stale: StationState = persistence.load_state(&sbco()).unwrap();
    let winner: TransitionResult = apply(&stale, allocate(entry_id, first)).unwrap();
    let loser: TransitionResult = apply(&stale, allocate(entry_id, second)).unwrap();

    assert!(persistence.commit(&winner.change).is_ok());
    let result: Result<Option<i64>, PersistenceError> = persistence.commit(&loser.change);

    assert_eq!(result, Err(PersistenceError::AllocationConflict { entry_id }));
    let state: StationState = persistence.load_state(&sbco()).unwrap();
    assert_eq!(state.mission(first).unwrap().manifest.len(), 1);
    assert!(state.mission(second).unwrap().manifest.is_empty());
    assert_eq!(
        state.waitlist_entry(entry_id).unwrap().allocated_mission_id(),
        Some(first)
    );
}

#[test]
fn test_allocation_of_pruned_entry_conflicts() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    let stale: StationState = persistence.load_state(&sbco()).unwrap();

    persistence
        .commit(&StateChange::WaitlistEntryRemoved { entry_id })
        .unwrap();
    let transition: TransitionResult = apply(&stale, allocate(entry_id, mission_id)).unwrap();

    assert_eq!(
        persistence.commit(&transition.change),
        Err(PersistenceError::AllocationConflict { entry_id })
    );
    let state: StationState = persistence.load_state(&sbco()).unwrap();
    assert!(state.mission(mission_id).unwrap().manifest.is_empty());
}

#[test]
fn test_pruning_allocated_entry_keeps_manifest_back_reference() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    execute(&mut persistence, &sbco(), allocate(entry_id, mission_id)).unwrap();

    execute(
        &mut persistence,
        &sbco(),
        Command::RemoveWaitlistEntry { entry_id },
    )
    .unwrap();

    let state: StationState = persistence.load_state(&sbco()).unwrap();
    assert!(state.waitlist.is_empty());
    assert_eq!(
        state.mission(mission_id).unwrap().manifest[0].waitlist_entry_id(),
        Some(entry_id)
    );
}

#[test]
fn test_first_allocation_issues_manifest_id_distinct_from_entry_id() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");

    let executed: Executed =
        execute(&mut persistence, &sbco(), allocate(entry_id, mission_id)).unwrap();
    let manifest_entry_id: i64 = executed.assigned_id.unwrap();

    assert_ne!(manifest_entry_id, entry_id);
    let StateChange::PassengerAllocated(result) = &executed.change else {
        panic!("Expected PassengerAllocated, got {:?}", executed.change);
    };
    assert_eq!(result.manifest_entry.manifest_entry_id, Some(manifest_entry_id));
    assert_eq!(result.updated_entry.entry_id, Some(entry_id));
}

#[test]
fn test_waitlist_and_manifest_ids_are_never_reused_across_tables() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    let manifest_entry_id: i64 = execute(&mut persistence, &sbco(), allocate(first, mission_id))
        .unwrap()
        .assigned_id
        .unwrap();

    // Pruning the allocated entry must not free its id for the next one.
    execute(
        &mut persistence,
        &sbco(),
        Command::RemoveWaitlistEntry { entry_id: first },
    )
    .unwrap();
    let second: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Bruno Lima", "MAJ", "SBRF", 4),
    );
    let direct: i64 = execute(
        &mut persistence,
        &sbco(),
        Command::AddManifestEntry {
            mission_id,
            passenger: create_test_passenger("Eva Prado", "CIV", "SBRF", 9),
        },
    )
    .unwrap()
    .assigned_id
    .unwrap();

    let ids: std::collections::BTreeSet<i64> =
        [first, manifest_entry_id, second, direct].into_iter().collect();
    assert_eq!(ids.len(), 4);
    assert!(second > manifest_entry_id);
    assert!(direct > second);
}

#[test]
fn test_failed_manifest_insert_rolls_back_waitlist_claim() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");

    let state: StationState = persistence.load_state(&sbco()).unwrap();
    let mut transition: TransitionResult = apply(&state, allocate(entry_id, mission_id)).unwrap();
    let StateChange::PassengerAllocated(result) = &mut transition.change else {
        panic!("Expected PassengerAllocated, got {:?}", transition.change);
    };
    // The waitlist claim succeeds; the manifest row then breaks a CHECK constraint.
    result.manifest_entry.passenger.weights.person = -1.0;

    let committed: Result<Option<i64>, PersistenceError> = persistence.commit(&transition.change);

    assert!(
        matches!(committed, Err(PersistenceError::DatabaseError(_))),
        "Expected a database error, got {committed:?}"
    );
    let state: StationState = persistence.load_state(&sbco()).unwrap();
    assert!(!state.waitlist_entry(entry_id).unwrap().is_allocated());
    assert!(state.mission(mission_id).unwrap().manifest.is_empty());
    assert_eq!(persistence.count_waiting(&sbco()).unwrap(), 1);
}
