// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::priority::PriorityTier;
use crate::route::Route;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Represents the home station an entry or mission belongs to.
///
/// Station codes scope all visibility: waitlists and missions of one
/// station are never visible from another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Station {
    /// The station code (e.g., "SBCO"), trimmed and uppercased.
    code: String,
}

impl Station {
    /// Creates a new `Station`.
    ///
    /// Station codes are trimmed and normalized to uppercase so that
    /// "sbco" and "SBCO " scope to the same station.
    ///
    /// # Arguments
    ///
    /// * `code` - The station code
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            code: code.trim().to_uppercase(),
        }
    }

    /// Returns the station code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Passenger weights in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Weights {
    /// Body weight of the passenger.
    pub person: f64,
    /// Checked baggage weight.
    pub checked_baggage: f64,
    /// Carry-on baggage weight.
    pub carry_on: f64,
}

impl Weights {
    /// Creates a new set of weights.
    #[must_use]
    pub const fn new(person: f64, checked_baggage: f64, carry_on: f64) -> Self {
        Self {
            person,
            checked_baggage,
            carry_on,
        }
    }

    /// Returns the sum of all three weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.person + self.checked_baggage + self.carry_on
    }
}

/// The passenger fields shared by waitlist entries and manifest entries.
///
/// A manifest entry created from the waitlist carries an exact copy of
/// these details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerDetails {
    /// Military rank code (ordered through the rank table).
    pub rank: String,
    /// Full name.
    pub name: String,
    /// CPF or other identity document, if recorded.
    pub identity_document: Option<String>,
    /// Location code the passenger wants to reach.
    pub destination: String,
    /// Passenger and baggage weights.
    pub weights: Weights,
    /// Priority tier (1 is highest).
    pub priority: PriorityTier,
    /// Who registered the passenger.
    pub registered_by: String,
    /// Relationship of the passenger to the registrant.
    pub relationship: String,
}

/// A passenger waiting for a seat.
///
/// The allocation state is a single mission reference: an entry is
/// allocated exactly when it references a mission. Only the allocation
/// transaction sets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitlistEntry {
    /// Canonical identifier assigned by storage.
    /// `None` indicates the entry has not been persisted yet.
    pub entry_id: Option<i64>,
    /// The station this entry belongs to.
    pub station: Station,
    /// The passenger details.
    pub passenger: PassengerDetails,
    /// When the entry was registered.
    pub registered_at: OffsetDateTime,
    /// The mission this entry was placed on, if any.
    allocated_mission_id: Option<i64>,
}

impl WaitlistEntry {
    /// Creates a new, unallocated `WaitlistEntry` without a persisted id.
    #[must_use]
    pub const fn new(
        station: Station,
        passenger: PassengerDetails,
        registered_at: OffsetDateTime,
    ) -> Self {
        Self {
            entry_id: None,
            station,
            passenger,
            registered_at,
            allocated_mission_id: None,
        }
    }

    /// Reconstructs a persisted `WaitlistEntry`.
    ///
    /// Used by storage when loading records, including entries that were
    /// allocated in an earlier transaction.
    #[must_use]
    pub const fn with_id(
        entry_id: i64,
        station: Station,
        passenger: PassengerDetails,
        registered_at: OffsetDateTime,
        allocated_mission_id: Option<i64>,
    ) -> Self {
        Self {
            entry_id: Some(entry_id),
            station,
            passenger,
            registered_at,
            allocated_mission_id,
        }
    }

    /// Returns whether this entry has been placed on a mission.
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        self.allocated_mission_id.is_some()
    }

    /// Returns the mission this entry was placed on.
    #[must_use]
    pub const fn allocated_mission_id(&self) -> Option<i64> {
        self.allocated_mission_id
    }

    pub(crate) const fn assign_to_mission(&mut self, mission_id: i64) {
        self.allocated_mission_id = Some(mission_id);
    }
}

/// Where a manifest entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestSource {
    /// Added straight to the manifest.
    Direct,
    /// Moved from the waitlist by the allocation transaction.
    FromWaitlist {
        /// The originating waitlist entry.
        waitlist_entry_id: i64,
    },
}

/// A passenger on a mission manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    /// Manifest-scoped identifier assigned by storage.
    /// Distinct from any waitlist entry id.
    pub manifest_entry_id: Option<i64>,
    /// The mission this entry belongs to.
    pub mission_id: Option<i64>,
    /// The passenger details.
    pub passenger: PassengerDetails,
    /// Where this entry came from.
    pub source: ManifestSource,
}

impl ManifestEntry {
    /// Creates a manifest entry added directly to a mission.
    #[must_use]
    pub const fn direct(mission_id: i64, passenger: PassengerDetails) -> Self {
        Self {
            manifest_entry_id: None,
            mission_id: Some(mission_id),
            passenger,
            source: ManifestSource::Direct,
        }
    }

    /// Returns whether this entry was moved from the waitlist.
    #[must_use]
    pub const fn from_waitlist(&self) -> bool {
        matches!(self.source, ManifestSource::FromWaitlist { .. })
    }

    /// Returns the originating waitlist entry id, if any.
    #[must_use]
    pub const fn waitlist_entry_id(&self) -> Option<i64> {
        match self.source {
            ManifestSource::FromWaitlist { waitlist_entry_id } => Some(waitlist_entry_id),
            ManifestSource::Direct => None,
        }
    }
}

/// A flight mission and its manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mission {
    /// Canonical identifier assigned by storage.
    pub mission_id: Option<i64>,
    /// The station that owns this mission.
    pub station: Station,
    /// Human-readable mission number.
    pub mission_number: String,
    /// Aircraft designation, if known.
    pub aircraft: Option<String>,
    /// Scheduled departure date, if known.
    pub departure_date: Option<Date>,
    /// The stop sequence, origin first.
    pub route: Route,
    /// Passengers assigned to this mission, in insertion order.
    pub manifest: Vec<ManifestEntry>,
}

impl Mission {
    /// Creates a new mission without a persisted id and with an empty manifest.
    #[must_use]
    pub const fn new(station: Station, mission_number: String, route: Route) -> Self {
        Self {
            mission_id: None,
            station,
            mission_number,
            aircraft: None,
            departure_date: None,
            route,
            manifest: Vec::new(),
        }
    }

    /// Returns the weight totals for the current manifest.
    #[must_use]
    pub fn totals(&self) -> ManifestTotals {
        ManifestTotals::from_entries(&self.manifest)
    }

    /// Finds a manifest entry by its id.
    #[must_use]
    pub fn manifest_entry(&self, manifest_entry_id: i64) -> Option<&ManifestEntry> {
        self.manifest
            .iter()
            .find(|e| e.manifest_entry_id == Some(manifest_entry_id))
    }
}

/// Weight totals for a manifest.
///
/// Always derived from the manifest entries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ManifestTotals {
    /// Number of passengers.
    pub passenger_count: usize,
    /// Sum of passenger body weights.
    pub person: f64,
    /// Sum of checked baggage weights.
    pub checked_baggage: f64,
    /// Sum of carry-on weights.
    pub carry_on: f64,
}

impl ManifestTotals {
    /// Sums the weights of the given manifest entries.
    #[must_use]
    pub fn from_entries(entries: &[ManifestEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, entry| {
            let w: &Weights = &entry.passenger.weights;
            Self {
                passenger_count: acc.passenger_count + 1,
                person: acc.person + w.person,
                checked_baggage: acc.checked_baggage + w.checked_baggage,
                carry_on: acc.carry_on + w.carry_on,
            }
        })
    }

    /// Returns the combined weight of passengers and baggage.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.person + self.checked_baggage + self.carry_on
    }
}
