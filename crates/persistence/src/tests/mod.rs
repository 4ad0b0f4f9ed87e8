// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod allocation_tests;
mod mission_tests;
mod waitlist_tests;

use crate::Persistence;
use airlift::{Command, Executed, execute};
use airlift_domain::{PassengerDetails, PriorityTier, Route, Station, Weights};
use time::OffsetDateTime;
use time::macros::datetime;

pub const REGISTERED_AT: OffsetDateTime = datetime!(2026-03-02 09:30:15.5 -3);

pub fn sbco() -> Station {
    Station::new("SBCO")
}

pub fn create_test_passenger(
    name: &str,
    rank: &str,
    destination: &str,
    tier: i64,
) -> PassengerDetails {
    PassengerDetails {
        rank: rank.to_string(),
        name: name.to_string(),
        identity_document: Some(String::from("123.456.789-00")),
        destination: destination.to_string(),
        weights: Weights::new(82.5, 23.0, 7.0),
        priority: PriorityTier::new(tier).unwrap(),
        registered_by: String::from("Sgt Duty"),
        relationship: String::from("Self"),
    }
}

/// Registers a passenger at a station and returns the new entry id.
pub fn register(
    persistence: &mut Persistence,
    station: &Station,
    passenger: PassengerDetails,
) -> i64 {
    let executed: Executed = execute(
        persistence,
        station,
        Command::RegisterWaitlistEntry {
            passenger,
            registered_at: REGISTERED_AT,
        },
    )
    .unwrap();
    executed.assigned_id.unwrap()
}

/// Creates a mission at a station and returns the new mission id.
pub fn create_mission(persistence: &mut Persistence, station: &Station, route: &str) -> i64 {
    let executed: Executed = execute(
        persistence,
        station,
        Command::CreateMission {
            mission_number: String::from("FAB-2101"),
            aircraft: Some(String::from("C-105 Amazonas")),
            departure_date: None,
            route: Route::parse_delimited(route),
        },
    )
    .unwrap();
    executed.assigned_id.unwrap()
}
