// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The allocation transaction.
//!
//! Allocation is the only way a waitlist entry leaves the waiting state.
//! It produces both halves of the change together: the updated waitlist
//! entry (now referencing the mission) and the manifest entry created for
//! the mission. Callers persist the two as a single unit.
//!
//! Destination compatibility is not checked here. Operators may place a
//! passenger on any mission of the station.

use crate::error::DomainError;
use crate::types::{ManifestEntry, ManifestSource, Mission, WaitlistEntry};
use serde::Serialize;

/// The outcome of a successful allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    /// The source waitlist entry id.
    pub waitlist_entry_id: i64,
    /// The target mission id.
    pub mission_id: i64,
    /// The waitlist entry with its mission reference set.
    pub updated_entry: WaitlistEntry,
    /// The manifest entry to add to the mission.
    /// Its id is assigned by storage.
    pub manifest_entry: ManifestEntry,
}

/// Allocates a waitlisted passenger to a mission.
///
/// The inputs are not modified; the result carries the new values.
///
/// # Errors
///
/// Returns an error if:
/// - The entry has no storage id
/// - The entry is already allocated
/// - The mission has no storage id
pub fn allocate(entry: &WaitlistEntry, mission: &Mission) -> Result<AllocationResult, DomainError> {
    let waitlist_entry_id: i64 = entry
        .entry_id
        .ok_or(DomainError::WaitlistEntryNotPersisted)?;

    if let Some(existing) = entry.allocated_mission_id() {
        return Err(DomainError::EntryAlreadyAllocated {
            entry_id: waitlist_entry_id,
            mission_id: existing,
        });
    }

    let mission_id: i64 = mission.mission_id.ok_or(DomainError::MissionNotPersisted)?;

    let mut updated_entry: WaitlistEntry = entry.clone();
    updated_entry.assign_to_mission(mission_id);

    let manifest_entry: ManifestEntry = ManifestEntry {
        manifest_entry_id: None,
        mission_id: Some(mission_id),
        passenger: entry.passenger.clone(),
        source: ManifestSource::FromWaitlist { waitlist_entry_id },
    };

    Ok(AllocationResult {
        waitlist_entry_id,
        mission_id,
        updated_entry,
        manifest_entry,
    })
}
