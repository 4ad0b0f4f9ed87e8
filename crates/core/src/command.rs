// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::{PassengerDetails, Route};
use time::{Date, OffsetDateTime};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes. Every command is
/// applied within the scope of a single station.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Register a passenger on the station waitlist.
    RegisterWaitlistEntry {
        /// The passenger details.
        passenger: PassengerDetails,
        /// Registration timestamp.
        registered_at: OffsetDateTime,
    },
    /// Remove a waitlist entry, allocated or not.
    RemoveWaitlistEntry {
        /// The entry to remove.
        entry_id: i64,
    },
    /// Register a new mission at the station.
    CreateMission {
        /// Human-readable mission number.
        mission_number: String,
        /// Aircraft designation.
        aircraft: Option<String>,
        /// Scheduled departure date.
        departure_date: Option<Date>,
        /// The normalized route.
        route: Route,
    },
    /// Add a passenger straight to a mission manifest.
    AddManifestEntry {
        /// The target mission.
        mission_id: i64,
        /// The passenger details.
        passenger: PassengerDetails,
    },
    /// Remove a passenger from a mission manifest.
    ///
    /// This does not return the passenger to the waitlist.
    RemoveManifestEntry {
        /// The mission holding the entry.
        mission_id: i64,
        /// The manifest entry to remove.
        manifest_entry_id: i64,
    },
    /// Move a waitlisted passenger onto a mission manifest.
    AllocatePassenger {
        /// The waitlist entry to allocate.
        entry_id: i64,
        /// The target mission.
        mission_id: i64,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RegisterWaitlistEntry { .. } => "RegisterWaitlistEntry",
            Self::RemoveWaitlistEntry { .. } => "RemoveWaitlistEntry",
            Self::CreateMission { .. } => "CreateMission",
            Self::AddManifestEntry { .. } => "AddManifestEntry",
            Self::RemoveManifestEntry { .. } => "RemoveManifestEntry",
            Self::AllocatePassenger { .. } => "AllocatePassenger",
        }
    }
}
