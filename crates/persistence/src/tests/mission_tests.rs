// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_mission, create_test_passenger, sbco};
use crate::{Persistence, PersistenceError};
use airlift::{Command, ExecuteError, Executed, StateChange, StationStore, execute};
use airlift_domain::{ManifestSource, Mission, Route, Station};
use time::macros::date;

#[test]
fn test_created_mission_round_trips() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let executed: Executed = execute(
        &mut persistence,
        &sbco(),
        Command::CreateMission {
            mission_number: String::from("FAB-2230"),
            aircraft: Some(String::from("C-130")),
            departure_date: Some(date!(2026 - 03 - 10)),
            route: Route::from_stops(["SBCO", "SBSM", "SBRF"]),
        },
    )
    .unwrap();
    let mission_id: i64 = executed.assigned_id.unwrap();

    let missions: Vec<Mission> = persistence.load_missions(&sbco()).unwrap();
    assert_eq!(missions.len(), 1);
    let mission: &Mission = &missions[0];
    assert_eq!(mission.mission_id, Some(mission_id));
    assert_eq!(mission.mission_number, "FAB-2230");
    assert_eq!(mission.aircraft.as_deref(), Some("C-130"));
    assert_eq!(mission.departure_date, Some(date!(2026 - 03 - 10)));
    assert_eq!(mission.route.stops(), ["SBCO", "SBSM", "SBRF"]);
    assert!(mission.manifest.is_empty());
}

#[test]
fn test_mission_station_lookup() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mission_id: i64 = create_mission(&mut persistence, &Station::new("sbsm"), "SBSM, SBRF");

    assert_eq!(
        persistence.mission_station(mission_id).unwrap(),
        Station::new("SBSM")
    );
    assert!(matches!(
        persistence.mission_station(mission_id + 1),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_missions_are_station_scoped() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    create_mission(&mut persistence, &Station::new("SBSM"), "SBSM, SBRF");

    assert_eq!(persistence.load_missions(&sbco()).unwrap().len(), 1);
}

#[test]
fn test_direct_manifest_add_and_remove() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");
    let second: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBGL");

    let executed: Executed = execute(
        &mut persistence,
        &sbco(),
        Command::AddManifestEntry {
            mission_id: second,
            passenger: create_test_passenger("Eva Prado", "CIV", "SBGL", 12),
        },
    )
    .unwrap();
    let manifest_entry_id: i64 = executed.assigned_id.unwrap();
    let StateChange::ManifestEntryAdded(entry) = executed.change else {
        panic!("expected ManifestEntryAdded");
    };
    assert_eq!(entry.manifest_entry_id, Some(manifest_entry_id));

    let missions: Vec<Mission> = persistence.load_missions(&sbco()).unwrap();
    assert!(missions[0].manifest.is_empty());
    assert_eq!(missions[1].manifest.len(), 1);
    assert_eq!(missions[1].manifest[0].source, ManifestSource::Direct);
    assert_eq!(missions[1].manifest[0].passenger.name, "Eva Prado");
    assert_eq!(missions[1].mission_id, Some(second));
    assert_ne!(first, second);

    execute(
        &mut persistence,
        &sbco(),
        Command::RemoveManifestEntry {
            mission_id: second,
            manifest_entry_id,
        },
    )
    .unwrap();

    let missions: Vec<Mission> = persistence.load_missions(&sbco()).unwrap();
    assert!(missions[1].manifest.is_empty());
}

#[test]
fn test_manifest_change_on_foreign_mission_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mission_id: i64 = create_mission(&mut persistence, &Station::new("SBSM"), "SBSM, SBRF");

    let result: Result<Executed, ExecuteError<PersistenceError>> = execute(
        &mut persistence,
        &sbco(),
        Command::AddManifestEntry {
            mission_id,
            passenger: create_test_passenger("Eva Prado", "CIV", "SBRF", 12),
        },
    );

    assert!(matches!(result, Err(ExecuteError::Rejected(_))));
}

#[test]
fn test_commit_remove_unknown_manifest_entry_fails() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mission_id: i64 = create_mission(&mut persistence, &sbco(), "SBCO, SBRF");

    let result: Result<Option<i64>, PersistenceError> =
        persistence.commit(&StateChange::ManifestEntryRemoved {
            mission_id,
            manifest_entry_id: 999,
        });

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
