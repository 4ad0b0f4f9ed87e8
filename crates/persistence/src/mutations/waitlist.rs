// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::{PassengerDetails, WaitlistEntry};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::sqlite::next_passenger_id;
use crate::data_models::format_timestamp;
use crate::diesel_schema::waitlist_entries;
use crate::error::PersistenceError;

/// Inserts a new, unallocated waitlist entry.
///
/// # Returns
///
/// The storage-assigned entry id, drawn from the id space shared with
/// manifest entries.
///
/// # Errors
///
/// Returns an error if the entry already has an id, is already allocated,
/// or the insert fails.
pub fn insert_waitlist_entry(
    conn: &mut SqliteConnection,
    entry: &WaitlistEntry,
) -> Result<i64, PersistenceError> {
    if entry.entry_id.is_some() || entry.is_allocated() {
        return Err(PersistenceError::ReconstructionError(
            "New waitlist entry must be unpersisted and unallocated".to_string(),
        ));
    }

    let passenger: &PassengerDetails = &entry.passenger;
    let registered_at: String = format_timestamp(entry.registered_at)?;

    let entry_id: i64 = conn.transaction::<i64, PersistenceError, _>(|conn| {
        let entry_id: i64 = next_passenger_id(conn)?;

        diesel::insert_into(waitlist_entries::table)
            .values((
                waitlist_entries::waitlist_entry_id.eq(entry_id),
                waitlist_entries::station.eq(entry.station.code()),
                waitlist_entries::rank.eq(&passenger.rank),
                waitlist_entries::name.eq(&passenger.name),
                waitlist_entries::identity_document.eq(passenger.identity_document.as_deref()),
                waitlist_entries::destination.eq(&passenger.destination),
                waitlist_entries::weight_person.eq(passenger.weights.person),
                waitlist_entries::weight_checked_baggage.eq(passenger.weights.checked_baggage),
                waitlist_entries::weight_carry_on.eq(passenger.weights.carry_on),
                waitlist_entries::priority_tier.eq(i32::from(passenger.priority.value())),
                waitlist_entries::registered_by.eq(&passenger.registered_by),
                waitlist_entries::relationship.eq(&passenger.relationship),
                waitlist_entries::registered_at.eq(&registered_at),
            ))
            .execute(conn)?;

        Ok(entry_id)
    })?;

    debug!(
        entry_id,
        station = entry.station.code(),
        priority_tier = passenger.priority.value(),
        "Inserted waitlist entry"
    );

    Ok(entry_id)
}

/// Deletes a waitlist entry, allocated or not.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was deleted.
pub fn delete_waitlist_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        waitlist_entries::table.filter(waitlist_entries::waitlist_entry_id.eq(entry_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Waitlist entry {entry_id} does not exist"
        )));
    }

    debug!(entry_id, "Deleted waitlist entry");
    Ok(())
}
