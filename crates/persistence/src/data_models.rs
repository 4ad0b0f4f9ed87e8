// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and their conversion back into domain values.

use airlift_domain::{
    ManifestEntry, ManifestSource, Mission, PassengerDetails, PriorityTier, Route, Station,
    WaitlistEntry, Weights,
};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{Date, OffsetDateTime};

use crate::error::PersistenceError;

/// Type alias for a `waitlist_entries` row.
pub type WaitlistRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    String,
    f64,
    f64,
    f64,
    i32,
    String,
    String,
    String,
    Option<i64>,
);

/// Type alias for a `missions` row (manifest loaded separately).
pub type MissionRow = (
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
);

/// Type alias for a `manifest_entries` row.
pub type ManifestRow = (
    i64,
    i64,
    String,
    String,
    Option<String>,
    String,
    f64,
    f64,
    f64,
    i32,
    String,
    String,
    Option<i64>,
);

fn priority_from_column(value: i32) -> Result<PriorityTier, PersistenceError> {
    PriorityTier::new(i64::from(value)).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Stored priority tier is invalid: {e}"))
    })
}

/// Formats a registration timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented as RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Rebuilds a waitlist entry from its row.
///
/// # Errors
///
/// Returns an error if the stored tier or timestamp is invalid.
pub fn waitlist_entry_from_row(row: WaitlistRow) -> Result<WaitlistEntry, PersistenceError> {
    let (
        entry_id,
        station,
        rank,
        name,
        identity_document,
        destination,
        weight_person,
        weight_checked_baggage,
        weight_carry_on,
        priority_tier,
        registered_by,
        relationship,
        registered_at,
        allocated_mission_id,
    ) = row;

    let registered_at: OffsetDateTime =
        OffsetDateTime::parse(&registered_at, &Rfc3339).map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Failed to parse registered_at '{registered_at}': {e}"
            ))
        })?;

    let passenger: PassengerDetails = PassengerDetails {
        rank,
        name,
        identity_document,
        destination,
        weights: Weights::new(weight_person, weight_checked_baggage, weight_carry_on),
        priority: priority_from_column(priority_tier)?,
        registered_by,
        relationship,
    };

    Ok(WaitlistEntry::with_id(
        entry_id,
        Station::new(&station),
        passenger,
        registered_at,
        allocated_mission_id,
    ))
}

/// Rebuilds a manifest entry from its row.
///
/// # Errors
///
/// Returns an error if the stored tier is invalid.
pub fn manifest_entry_from_row(row: ManifestRow) -> Result<ManifestEntry, PersistenceError> {
    let (
        manifest_entry_id,
        mission_id,
        rank,
        name,
        identity_document,
        destination,
        weight_person,
        weight_checked_baggage,
        weight_carry_on,
        priority_tier,
        registered_by,
        relationship,
        source_waitlist_entry_id,
    ) = row;

    let source: ManifestSource = source_waitlist_entry_id.map_or(
        ManifestSource::Direct,
        |waitlist_entry_id| ManifestSource::FromWaitlist { waitlist_entry_id },
    );

    Ok(ManifestEntry {
        manifest_entry_id: Some(manifest_entry_id),
        mission_id: Some(mission_id),
        passenger: PassengerDetails {
            rank,
            name,
            identity_document,
            destination,
            weights: Weights::new(weight_person, weight_checked_baggage, weight_carry_on),
            priority: priority_from_column(priority_tier)?,
            registered_by,
            relationship,
        },
        source,
    })
}

/// Rebuilds a mission from its row, with an empty manifest.
///
/// # Errors
///
/// Returns an error if the stored departure date is invalid.
pub fn mission_from_row(row: MissionRow) -> Result<Mission, PersistenceError> {
    let (mission_id, station, mission_number, aircraft, departure_date, route_json) = row;

    let departure_date: Option<Date> = departure_date
        .map(|raw| {
            Date::parse(&raw, &Iso8601::DEFAULT).map_err(|e| {
                PersistenceError::ReconstructionError(format!(
                    "Failed to parse departure_date '{raw}': {e}"
                ))
            })
        })
        .transpose()?;

    let mut mission: Mission = Mission::new(
        Station::new(&station),
        mission_number,
        Route::from_stored(&route_json),
    );
    mission.mission_id = Some(mission_id);
    mission.aircraft = aircraft;
    mission.departure_date = departure_date;
    Ok(mission)
}
