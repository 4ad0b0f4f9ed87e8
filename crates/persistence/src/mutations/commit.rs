// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift::StateChange;
use diesel::SqliteConnection;

use crate::error::PersistenceError;
use crate::mutations::allocation::persist_allocation;
use crate::mutations::missions::{delete_manifest_entry, insert_manifest_entry, insert_mission};
use crate::mutations::waitlist::{delete_waitlist_entry, insert_waitlist_entry};

/// Writes a core state change.
///
/// # Returns
///
/// The id assigned to the created record, if the change created one.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn commit_change(
    conn: &mut SqliteConnection,
    change: &StateChange,
) -> Result<Option<i64>, PersistenceError> {
    match change {
        StateChange::WaitlistEntryRegistered(entry) => insert_waitlist_entry(conn, entry).map(Some),
        StateChange::WaitlistEntryRemoved { entry_id } => {
            delete_waitlist_entry(conn, *entry_id).map(|()| None)
        }
        StateChange::MissionCreated(mission) => insert_mission(conn, mission).map(Some),
        StateChange::ManifestEntryAdded(entry) => {
            let mission_id: i64 = entry.mission_id.ok_or_else(|| {
                PersistenceError::ReconstructionError(
                    "Manifest entry has no mission_id".to_string(),
                )
            })?;
            insert_manifest_entry(conn, mission_id, &entry.passenger, entry.waitlist_entry_id())
                .map(Some)
        }
        StateChange::ManifestEntryRemoved {
            mission_id,
            manifest_entry_id,
        } => delete_manifest_entry(conn, *mission_id, *manifest_entry_id).map(|()| None),
        StateChange::PassengerAllocated(result) => persist_allocation(conn, result).map(Some),
    }
}
