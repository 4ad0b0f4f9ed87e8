// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Mission, PassengerDetails, PriorityTier, Route, Station, WaitlistEntry, Weights};
use time::OffsetDateTime;
use time::macros::datetime;

pub const REGISTERED_AT: OffsetDateTime = datetime!(2026-03-02 09:30 UTC);

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
        weights: Weights::new(80.0, 23.0, 7.5),
        priority: PriorityTier::new(tier).unwrap(),
        registered_by: String::from("Sgt Duty"),
        relationship: String::from("Self"),
    }
}

pub fn create_test_entry(
    entry_id: i64,
    station: &str,
    name: &str,
    rank: &str,
    destination: &str,
    tier: i64,
) -> WaitlistEntry {
    WaitlistEntry::with_id(
        entry_id,
        Station::new(station),
        create_test_passenger(name, rank, destination, tier),
        REGISTERED_AT,
        None,
    )
}

pub fn create_test_mission(mission_id: i64, station: &str, route: &str) -> Mission {
    let mut mission: Mission = Mission::new(
        Station::new(station),
        format!("FAB-{mission_id}"),
        Route::parse_delimited(route),
    );
    mission.mission_id = Some(mission_id);
    mission
}
