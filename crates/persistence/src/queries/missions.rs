// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::{ManifestEntry, Mission, Station};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ManifestRow, MissionRow, manifest_entry_from_row, mission_from_row};
use crate::diesel_schema::{manifest_entries, missions};
use crate::error::PersistenceError;

/// Loads every mission of a station with its manifest.
///
/// Missions are in creation order; manifests are in insertion order.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be rebuilt.
pub fn load_missions(
    conn: &mut SqliteConnection,
    station: &Station,
) -> Result<Vec<Mission>, PersistenceError> {
    let rows: Vec<MissionRow> = missions::table
        .filter(missions::station.eq(station.code()))
        .order(missions::mission_id.asc())
        .select((
            missions::mission_id,
            missions::station,
            missions::mission_number,
            missions::aircraft,
            missions::departure_date,
            missions::route_json,
        ))
        .load::<MissionRow>(conn)?;

    let mut result: Vec<Mission> = rows
        .into_iter()
        .map(mission_from_row)
        .collect::<Result<_, _>>()?;

    let mission_ids: Vec<i64> = result.iter().filter_map(|m| m.mission_id).collect();
    let mut manifest: Vec<ManifestEntry> = load_manifest_entries(conn, &mission_ids)?;

    for mission in &mut result {
        let (own, rest): (Vec<ManifestEntry>, Vec<ManifestEntry>) = manifest
            .into_iter()
            .partition(|e| e.mission_id == mission.mission_id);
        mission.manifest = own;
        manifest = rest;
    }

    Ok(result)
}

/// Returns the station that owns a mission.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the mission does not exist.
pub fn lookup_mission_station(
    conn: &mut SqliteConnection,
    mission_id: i64,
) -> Result<Station, PersistenceError> {
    let result = missions::table
        .filter(missions::mission_id.eq(mission_id))
        .select(missions::station)
        .first::<String>(conn);

    match result {
        Ok(code) => Ok(Station::new(&code)),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Mission {mission_id} does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

fn load_manifest_entries(
    conn: &mut SqliteConnection,
    mission_ids: &[i64],
) -> Result<Vec<ManifestEntry>, PersistenceError> {
    if mission_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<ManifestRow> = manifest_entries::table
        .filter(manifest_entries::mission_id.eq_any(mission_ids))
        .order(manifest_entries::manifest_entry_id.asc())
        .select((
            manifest_entries::manifest_entry_id,
            manifest_entries::mission_id,
            manifest_entries::rank,
            manifest_entries::name,
            manifest_entries::identity_document,
            manifest_entries::destination,
            manifest_entries::weight_person,
            manifest_entries::weight_checked_baggage,
            manifest_entries::weight_carry_on,
            manifest_entries::priority_tier,
            manifest_entries::registered_by,
            manifest_entries::relationship,
            manifest_entries::source_waitlist_entry_id,
        ))
        .load::<ManifestRow>(conn)?;

    rows.into_iter().map(manifest_entry_from_row).collect()
}
