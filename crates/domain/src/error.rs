// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Station code is empty or invalid.
    InvalidStation(String),
    /// Passenger name is empty or invalid.
    InvalidName(String),
    /// Rank code is empty or invalid.
    InvalidRank(String),
    /// A weight field is negative or not a finite number.
    InvalidWeight {
        /// The weight field that failed validation.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// Priority tier is outside the 1-13 range.
    InvalidPriorityTier {
        /// The rejected value.
        value: i64,
    },
    /// Mission number is empty or invalid.
    InvalidMissionNumber(String),
    /// Waitlist entry does not exist in the station.
    WaitlistEntryNotFound {
        /// The station that was searched.
        station: String,
        /// The requested entry id.
        entry_id: i64,
    },
    /// Mission does not exist in the station.
    MissionNotFound {
        /// The station that was searched.
        station: String,
        /// The requested mission id.
        mission_id: i64,
    },
    /// Manifest entry does not exist on the mission.
    ManifestEntryNotFound {
        /// The mission that was searched.
        mission_id: i64,
        /// The requested manifest entry id.
        manifest_entry_id: i64,
    },
    /// The waitlist entry has already been placed on a mission.
    EntryAlreadyAllocated {
        /// The waitlist entry id.
        entry_id: i64,
        /// The mission the entry is already allocated to.
        mission_id: i64,
    },
    /// The waitlist entry has no storage-assigned id yet.
    WaitlistEntryNotPersisted,
    /// The mission has no storage-assigned id yet.
    MissionNotPersisted,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStation(msg) => write!(f, "Invalid station: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidRank(msg) => write!(f, "Invalid rank: {msg}"),
            Self::InvalidWeight { field, reason } => {
                write!(f, "Invalid weight for '{field}': {reason}")
            }
            Self::InvalidPriorityTier { value } => {
                write!(
                    f,
                    "Invalid priority tier: {value}. Must be between 1 and 13"
                )
            }
            Self::InvalidMissionNumber(msg) => write!(f, "Invalid mission number: {msg}"),
            Self::WaitlistEntryNotFound { station, entry_id } => {
                write!(
                    f,
                    "Waitlist entry {entry_id} not found at station '{station}'"
                )
            }
            Self::MissionNotFound {
                station,
                mission_id,
            } => {
                write!(f, "Mission {mission_id} not found at station '{station}'")
            }
            Self::ManifestEntryNotFound {
                mission_id,
                manifest_entry_id,
            } => {
                write!(
                    f,
                    "Manifest entry {manifest_entry_id} not found on mission {mission_id}"
                )
            }
            Self::EntryAlreadyAllocated {
                entry_id,
                mission_id,
            } => {
                write!(
                    f,
                    "Waitlist entry {entry_id} is already allocated to mission {mission_id}"
                )
            }
            Self::WaitlistEntryNotPersisted => {
                write!(f, "Waitlist entry has not been persisted yet")
            }
            Self::MissionNotPersisted => write!(f, "Mission has not been persisted yet"),
        }
    }
}

impl std::error::Error for DomainError {}
