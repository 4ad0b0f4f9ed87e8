// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_state;
use crate::{Command, CoreError, StateChange, StationState, TransitionResult, apply};
use airlift_domain::{DomainError, ManifestSource, Mission, RankTable, WaitlistEntry};

fn allocate_command(entry_id: i64, mission_id: i64) -> Command {
    Command::AllocatePassenger {
        entry_id,
        mission_id,
    }
}

#[test]
fn test_allocation_updates_entry_and_manifest_together() {
    let state: StationState = create_test_state();

    let transition: TransitionResult = apply(&state, allocate_command(1, 10)).unwrap();

    let entry: &WaitlistEntry = transition.new_state.waitlist_entry(1).unwrap();
    assert!(entry.is_allocated());
    assert_eq!(entry.allocated_mission_id(), Some(10));

    let mission: &Mission = transition.new_state.mission(10).unwrap();
    assert_eq!(mission.manifest.len(), 1);
    assert_eq!(
        mission.manifest[0].source,
        ManifestSource::FromWaitlist {
            waitlist_entry_id: 1
        }
    );
    assert_eq!(mission.manifest[0].passenger.name, "Ana Souza");

    let StateChange::PassengerAllocated(result) = transition.change else {
        panic!("expected PassengerAllocated");
    };
    assert_eq!(result.waitlist_entry_id, 1);
    assert_eq!(result.mission_id, 10);
}

#[test]
fn test_allocated_entry_leaves_active_and_compatible_views() {
    let ranks: RankTable = RankTable::default();
    let state: StationState = create_test_state();
    assert_eq!(state.compatible_entries(10, &ranks).unwrap().len(), 2);

    let transition: TransitionResult = apply(&state, allocate_command(1, 10)).unwrap();
    let new_state: StationState = transition.new_state;

    let compatible: Vec<Option<i64>> = new_state
        .compatible_entries(10, &ranks)
        .unwrap()
        .iter()
        .map(|e| e.entry_id)
        .collect();
    assert_eq!(compatible, [Some(2)]);
    assert!(
        new_state
            .active_waitlist(&ranks)
            .iter()
            .all(|e| e.entry_id != Some(1))
    );
    // Retained for traceability.
    assert_eq!(new_state.waitlist.len(), 3);
}

#[test]
fn test_double_allocation_is_rejected_and_state_unchanged() {
    let state: StationState = create_test_state();
    let first: StationState = apply(&state, allocate_command(1, 10)).unwrap().new_state;

    let result: Result<TransitionResult, CoreError> = apply(&first, allocate_command(1, 11));

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::EntryAlreadyAllocated {
                entry_id: 1,
                mission_id: 10,
            }
        ))
    );
    assert!(first.mission(11).unwrap().manifest.is_empty());
    assert_eq!(first.mission(10).unwrap().manifest.len(), 1);
}

#[test]
fn test_allocation_allows_incompatible_destination() {
    let state: StationState = create_test_state();

    // Entry 3 wants SBGL, which mission 10 does not reach.
    let transition: TransitionResult = apply(&state, allocate_command(3, 10)).unwrap();
    assert_eq!(
        transition
            .new_state
            .waitlist_entry(3)
            .unwrap()
            .allocated_mission_id(),
        Some(10)
    );
}

#[test]
fn test_allocation_with_unknown_entry_fails() {
    let state: StationState = create_test_state();

    assert_eq!(
        apply(&state, allocate_command(42, 10)),
        Err(CoreError::DomainViolation(
            DomainError::WaitlistEntryNotFound {
                station: String::from("SBCO"),
                entry_id: 42,
            }
        ))
    );
}

#[test]
fn test_allocation_with_unknown_mission_fails() {
    let state: StationState = create_test_state();

    assert_eq!(
        apply(&state, allocate_command(1, 42)),
        Err(CoreError::DomainViolation(DomainError::MissionNotFound {
            station: String::from("SBCO"),
            mission_id: 42,
        }))
    );
}
