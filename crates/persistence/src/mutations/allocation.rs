// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The atomic allocation write.
//!
//! Both halves of an allocation are written in one transaction:
//! 1. the waitlist row gains its mission reference, guarded by
//!    `allocated_mission_id IS NULL`
//! 2. the manifest row is inserted with its back-reference
//!
//! If the guard matches no row, another writer got there first and the
//! whole transaction is rolled back.

use airlift_domain::AllocationResult;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::waitlist_entries;
use crate::error::PersistenceError;
use crate::mutations::missions::insert_manifest_entry;

/// Persists an allocation.
///
/// # Returns
///
/// The id of the new manifest entry.
///
/// # Errors
///
/// Returns `PersistenceError::AllocationConflict` if the entry is missing
/// or already allocated in storage, or any database error. Nothing is
/// written on error.
pub fn persist_allocation(
    conn: &mut SqliteConnection,
    result: &AllocationResult,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let claimed: usize = diesel::update(
            waitlist_entries::table
                .filter(waitlist_entries::waitlist_entry_id.eq(result.waitlist_entry_id))
                .filter(waitlist_entries::allocated_mission_id.is_null()),
        )
        .set(waitlist_entries::allocated_mission_id.eq(Some(result.mission_id)))
        .execute(conn)?;

        if claimed == 0 {
            debug!(
                entry_id = result.waitlist_entry_id,
                mission_id = result.mission_id,
                "Allocation guard matched no row"
            );
            return Err(PersistenceError::AllocationConflict {
                entry_id: result.waitlist_entry_id,
            });
        }

        let manifest_entry_id: i64 = insert_manifest_entry(
            conn,
            result.mission_id,
            &result.manifest_entry.passenger,
            Some(result.waitlist_entry_id),
        )?;

        info!(
            entry_id = result.waitlist_entry_id,
            mission_id = result.mission_id,
            manifest_entry_id,
            "Allocated waitlist entry to mission"
        );

        Ok(manifest_entry_id)
    })
}
