// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::{Station, WaitlistEntry};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::data_models::{WaitlistRow, waitlist_entry_from_row};
use crate::diesel_schema::waitlist_entries;
use crate::error::PersistenceError;

/// Loads every waitlist entry of a station in registration order.
///
/// Allocated entries are included.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn load_waitlist(
    conn: &mut SqliteConnection,
    station: &Station,
) -> Result<Vec<WaitlistEntry>, PersistenceError> {
    let rows: Vec<WaitlistRow> = waitlist_entries::table
        .filter(waitlist_entries::station.eq(station.code()))
        .order(waitlist_entries::waitlist_entry_id.asc())
        .select((
            waitlist_entries::waitlist_entry_id,
            waitlist_entries::station,
            waitlist_entries::rank,
            waitlist_entries::name,
            waitlist_entries::identity_document,
            waitlist_entries::destination,
            waitlist_entries::weight_person,
            waitlist_entries::weight_checked_baggage,
            waitlist_entries::weight_carry_on,
            waitlist_entries::priority_tier,
            waitlist_entries::registered_by,
            waitlist_entries::relationship,
            waitlist_entries::registered_at,
            waitlist_entries::allocated_mission_id,
        ))
        .load::<WaitlistRow>(conn)?;

    rows.into_iter().map(waitlist_entry_from_row).collect()
}

/// Counts the unallocated entries of a station.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_waiting(
    conn: &mut SqliteConnection,
    station: &Station,
) -> Result<usize, PersistenceError> {
    let count: i64 = waitlist_entries::table
        .filter(waitlist_entries::station.eq(station.code()))
        .filter(waitlist_entries::allocated_mission_id.is_null())
        .count()
        .get_result(conn)?;

    count
        .to_usize()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Invalid row count: {count}")))
}
