// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::{
    AllocationResult, DomainError, ManifestEntry, Mission, RankTable, Station, WaitlistEntry,
    active_waitlist, compatible_entries, ordered,
};

/// The complete allocation state scoped to a single station.
///
/// Waitlist entries and missions of other stations are never part of a
/// `StationState`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationState {
    /// The station this state is scoped to.
    pub station: Station,
    /// Every waitlist entry of the station, allocated or not.
    pub waitlist: Vec<WaitlistEntry>,
    /// Every mission of the station, with manifests.
    pub missions: Vec<Mission>,
}

impl StationState {
    /// Creates a new empty state for a station.
    #[must_use]
    pub const fn new(station: Station) -> Self {
        Self {
            station,
            waitlist: Vec::new(),
            missions: Vec::new(),
        }
    }

    /// Finds a waitlist entry by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WaitlistEntryNotFound` if no entry of this
    /// station has the id.
    pub fn waitlist_entry(&self, entry_id: i64) -> Result<&WaitlistEntry, DomainError> {
        self.waitlist
            .iter()
            .find(|e| e.entry_id == Some(entry_id))
            .ok_or_else(|| DomainError::WaitlistEntryNotFound {
                station: self.station.code().to_string(),
                entry_id,
            })
    }

    /// Finds a mission by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissionNotFound` if no mission of this station
    /// has the id.
    pub fn mission(&self, mission_id: i64) -> Result<&Mission, DomainError> {
        self.missions
            .iter()
            .find(|m| m.mission_id == Some(mission_id))
            .ok_or_else(|| DomainError::MissionNotFound {
                station: self.station.code().to_string(),
                mission_id,
            })
    }

    /// Returns the unallocated waitlist in passenger order.
    #[must_use]
    pub fn active_waitlist(&self, ranks: &RankTable) -> Vec<&WaitlistEntry> {
        active_waitlist(&self.station, &self.waitlist, ranks)
    }

    /// Returns the waitlist entries that can be placed on a mission, in
    /// passenger order.
    ///
    /// # Errors
    ///
    /// Returns an error if the mission is not part of this station.
    pub fn compatible_entries(
        &self,
        mission_id: i64,
        ranks: &RankTable,
    ) -> Result<Vec<&WaitlistEntry>, DomainError> {
        let mission: &Mission = self.mission(mission_id)?;
        Ok(compatible_entries(mission, &self.waitlist, ranks))
    }

    /// Returns a mission manifest in passenger order.
    ///
    /// # Errors
    ///
    /// Returns an error if the mission is not part of this station.
    pub fn ordered_manifest(
        &self,
        mission_id: i64,
        ranks: &RankTable,
    ) -> Result<Vec<&ManifestEntry>, DomainError> {
        let mission: &Mission = self.mission(mission_id)?;
        Ok(ordered(&mission.manifest, ranks))
    }
}

/// The change a transition produced.
///
/// Storage persists exactly this change. Records created by the change
/// carry no id until storage assigns one.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// A passenger was added to the waitlist.
    WaitlistEntryRegistered(WaitlistEntry),
    /// A waitlist entry was removed.
    WaitlistEntryRemoved {
        /// The removed entry.
        entry_id: i64,
    },
    /// A mission was registered.
    MissionCreated(Mission),
    /// A passenger was added directly to a manifest.
    ManifestEntryAdded(ManifestEntry),
    /// A manifest entry was removed.
    ManifestEntryRemoved {
        /// The mission that held the entry.
        mission_id: i64,
        /// The removed manifest entry.
        manifest_entry_id: i64,
    },
    /// A waitlisted passenger was moved onto a manifest.
    ///
    /// Both halves must be committed together.
    PassengerAllocated(AllocationResult),
}

impl StateChange {
    /// Records the id storage assigned to the record this change created.
    ///
    /// Changes that create nothing are returned unchanged.
    #[must_use]
    pub fn with_assigned_id(mut self, id: i64) -> Self {
        match &mut self {
            Self::WaitlistEntryRegistered(entry) => entry.entry_id = Some(id),
            Self::MissionCreated(mission) => mission.mission_id = Some(id),
            Self::ManifestEntryAdded(entry) => entry.manifest_entry_id = Some(id),
            Self::PassengerAllocated(result) => {
                result.manifest_entry.manifest_entry_id = Some(id);
            }
            Self::WaitlistEntryRemoved { .. } | Self::ManifestEntryRemoved { .. } => {}
        }
        self
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: StationState,
    /// The change to persist.
    pub change: StateChange,
}
