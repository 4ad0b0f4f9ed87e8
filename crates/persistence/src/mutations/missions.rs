// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::{Mission, PassengerDetails};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::sqlite::{get_last_insert_rowid, next_passenger_id};
use crate::diesel_schema::{manifest_entries, missions};
use crate::error::PersistenceError;

/// Inserts a new mission.
///
/// The manifest of a new mission is expected to be empty and is not
/// written.
///
/// # Returns
///
/// The storage-assigned mission id.
///
/// # Errors
///
/// Returns an error if the mission already has an id or the insert fails.
pub fn insert_mission(
    conn: &mut SqliteConnection,
    mission: &Mission,
) -> Result<i64, PersistenceError> {
    if mission.mission_id.is_some() {
        return Err(PersistenceError::ReconstructionError(
            "New mission should not have mission_id".to_string(),
        ));
    }

    let route_json: String = serde_json::to_string(mission.route.stops())?;
    let departure_date: Option<String> = mission.departure_date.map(|d| d.to_string());

    diesel::insert_into(missions::table)
        .values((
            missions::station.eq(mission.station.code()),
            missions::mission_number.eq(&mission.mission_number),
            missions::aircraft.eq(mission.aircraft.as_deref()),
            missions::departure_date.eq(departure_date.as_deref()),
            missions::route_json.eq(&route_json),
        ))
        .execute(conn)?;

    let mission_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        mission_id,
        station = mission.station.code(),
        mission_number = %mission.mission_number,
        route = %route_json,
        "Inserted mission"
    );

    Ok(mission_id)
}

/// Inserts a manifest entry for a mission.
///
/// `source_waitlist_entry_id` is set only for entries moved from the
/// waitlist.
///
/// # Returns
///
/// The storage-assigned manifest entry id, drawn from the id space shared
/// with waitlist entries.
///
/// # Errors
///
/// Returns an error if the insert fails (including an unknown mission).
pub fn insert_manifest_entry(
    conn: &mut SqliteConnection,
    mission_id: i64,
    passenger: &PassengerDetails,
    source_waitlist_entry_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let manifest_entry_id: i64 = conn.transaction::<i64, PersistenceError, _>(|conn| {
        let manifest_entry_id: i64 = next_passenger_id(conn)?;

        diesel::insert_into(manifest_entries::table)
            .values((
                manifest_entries::manifest_entry_id.eq(manifest_entry_id),
                manifest_entries::mission_id.eq(mission_id),
                manifest_entries::rank.eq(&passenger.rank),
                manifest_entries::name.eq(&passenger.name),
                manifest_entries::identity_document.eq(passenger.identity_document.as_deref()),
                manifest_entries::destination.eq(&passenger.destination),
                manifest_entries::weight_person.eq(passenger.weights.person),
                manifest_entries::weight_checked_baggage.eq(passenger.weights.checked_baggage),
                manifest_entries::weight_carry_on.eq(passenger.weights.carry_on),
                manifest_entries::priority_tier.eq(i32::from(passenger.priority.value())),
                manifest_entries::registered_by.eq(&passenger.registered_by),
                manifest_entries::relationship.eq(&passenger.relationship),
                manifest_entries::source_waitlist_entry_id.eq(source_waitlist_entry_id),
            ))
            .execute(conn)?;

        Ok(manifest_entry_id)
    })?;

    debug!(
        mission_id,
        manifest_entry_id,
        ?source_waitlist_entry_id,
        "Inserted manifest entry"
    );

    Ok(manifest_entry_id)
}

/// Deletes a manifest entry from a mission.
///
/// The originating waitlist entry, if any, is left as it is.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the mission has no such entry.
pub fn delete_manifest_entry(
    conn: &mut SqliteConnection,
    mission_id: i64,
    manifest_entry_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        manifest_entries::table
            .filter(manifest_entries::mission_id.eq(mission_id))
            .filter(manifest_entries::manifest_entry_id.eq(manifest_entry_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Manifest entry {manifest_entry_id} does not exist on mission {mission_id}"
        )));
    }

    debug!(mission_id, manifest_entry_id, "Deleted manifest entry");
    Ok(())
}
