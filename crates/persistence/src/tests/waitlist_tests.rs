// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{REGISTERED_AT, create_test_passenger, register, sbco};
use crate::{Persistence, PersistenceError};
use airlift::{Command, ExecuteError, Executed, StationStore, execute};
use airlift_domain::{Station, WaitlistEntry};

#[test]
fn test_registered_entry_round_trips() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let passenger = create_test_passenger("Ana Souza", "CAP", "SBRF", 4);

    let entry_id: i64 = register(&mut persistence, &sbco(), passenger.clone());

    let waitlist: Vec<WaitlistEntry> = persistence.load_waitlist(&sbco()).unwrap();
    assert_eq!(waitlist.len(), 1);
    let entry: &WaitlistEntry = &waitlist[0];
    assert_eq!(entry.entry_id, Some(entry_id));
    assert_eq!(entry.station, sbco());
    assert_eq!(entry.passenger, passenger);
    assert_eq!(entry.registered_at, REGISTERED_AT);
    assert!(!entry.is_allocated());
}

#[test]
fn test_missing_identity_document_is_stored_as_null() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut passenger = create_test_passenger("Ana Souza", "CAP", "SBRF", 4);
    passenger.identity_document = None;

    register(&mut persistence, &sbco(), passenger);

    let waitlist: Vec<WaitlistEntry> = persistence.load_waitlist(&sbco()).unwrap();
    assert_eq!(waitlist[0].passenger.identity_document, None);
}

#[test]
fn test_waitlist_is_station_scoped() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let sbsm: Station = Station::new("SBSM");

    register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );
    register(
        &mut persistence,
        &sbsm,
        create_test_passenger("Bruno Lima", "MAJ", "SBRF", 4),
    );

    let sbco_waitlist: Vec<WaitlistEntry> = persistence.load_waitlist(&sbco()).unwrap();
    assert_eq!(sbco_waitlist.len(), 1);
    assert_eq!(sbco_waitlist[0].passenger.name, "Ana Souza");
    assert_eq!(persistence.count_waiting(&sbsm).unwrap(), 1);
}

#[test]
fn test_remove_waitlist_entry() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );

    let executed: Executed = execute(
        &mut persistence,
        &sbco(),
        Command::RemoveWaitlistEntry { entry_id },
    )
    .unwrap();

    assert_eq!(executed.assigned_id, None);
    assert!(persistence.load_waitlist(&sbco()).unwrap().is_empty());
}

#[test]
fn test_remove_entry_of_other_station_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let entry_id: i64 = register(
        &mut persistence,
        &sbco(),
        create_test_passenger("Ana Souza", "CAP", "SBRF", 4),
    );

    let result: Result<Executed, ExecuteError<PersistenceError>> = execute(
        &mut persistence,
        &Station::new("SBSM"),
        Command::RemoveWaitlistEntry { entry_id },
    );

    assert!(matches!(result, Err(ExecuteError::Rejected(_))));
    assert_eq!(persistence.load_waitlist(&sbco()).unwrap().len(), 1);
}

#[test]
fn test_invalid_passenger_is_never_written() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut passenger = create_test_passenger("Ana Souza", "CAP", "SBRF", 4);
    passenger.weights.carry_on = -2.0;

    let result: Result<Executed, ExecuteError<PersistenceError>> = execute(
        &mut persistence,
        &sbco(),
        Command::RegisterWaitlistEntry {
            passenger,
            registered_at: REGISTERED_AT,
        },
    );

    assert!(matches!(result, Err(ExecuteError::Rejected(_))));
    assert_eq!(persistence.count_waiting(&sbco()).unwrap(), 0);
}
