// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use airlift_persistence::Persistence;
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{CreateMissionRequest, PassengerRequest, create_mission, register_waitlist_entry};

pub const NOW: OffsetDateTime = datetime!(2026-03-02 08:00 UTC);

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_passenger_request(
    name: &str,
    rank: &str,
    destination: &str,
    tier: i64,
) -> PassengerRequest {
    PassengerRequest {
        rank: rank.to_string(),
        name: name.to_string(),
        identity_document: None,
        destination: destination.to_string(),
        weight_person: 80.0,
        weight_checked_baggage: 20.0,
        weight_carry_on: 5.0,
        priority_tier: tier,
        registered_by: String::from("Sgt Duty"),
        relationship: String::from("Self"),
    }
}

pub fn create_mission_request(route: serde_json::Value) -> CreateMissionRequest {
    CreateMissionRequest {
        mission_number: String::from("FAB-2101"),
        aircraft: Some(String::from("C-105 Amazonas")),
        departure_date: Some(String::from("2026-03-10")),
        route,
    }
}

/// Registers a passenger and returns the entry id.
pub fn register(
    persistence: &mut Persistence,
    station: &str,
    name: &str,
    rank: &str,
    destination: &str,
    tier: i64,
) -> i64 {
    register_waitlist_entry(
        persistence,
        station,
        &create_passenger_request(name, rank, destination, tier),
        NOW,
    )
    .unwrap()
    .entry
    .entry_id
}

/// Creates a mission with the given route string and returns its id.
pub fn mission(persistence: &mut Persistence, station: &str, route: &str) -> i64 {
    create_mission(persistence, station, &create_mission_request(json!(route)))
        .unwrap()
        .mission
        .mission_id
}
