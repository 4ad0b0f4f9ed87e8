// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{StateChange, StationState, StationStore};
use airlift_domain::{
    ManifestEntry, Mission, PassengerDetails, PriorityTier, Route, Station, WaitlistEntry, Weights,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const REGISTERED_AT: OffsetDateTime = datetime!(2026-03-02 09:30 UTC);

pub fn create_test_passenger(
    name: &str,
    rank: &str,
    destination: &str,
    tier: i64,
) -> PassengerDetails {
    PassengerDetails {
        rank: rank.to_string(),
        name: name.to_string(),
        identity_document: None,
        destination: destination.to_string(),
        weights: Weights::new(75.0, 20.0, 5.0),
        priority: PriorityTier::new(tier).unwrap(),
        registered_by: String::from("Sgt Duty"),
        relationship: String::from("Self"),
    }
}

pub fn create_test_entry(
    entry_id: i64,
    name: &str,
    rank: &str,
    destination: &str,
    tier: i64,
) -> WaitlistEntry {
    WaitlistEntry::with_id(
        entry_id,
        Station::new("SBCO"),
        create_test_passenger(name, rank, destination, tier),
        REGISTERED_AT,
        None,
    )
}

pub fn create_test_mission(mission_id: i64, route: &str) -> Mission {
    let mut mission: Mission = Mission::new(
        Station::new("SBCO"),
        format!("FAB-{mission_id}"),
        Route::parse_delimited(route),
    );
    mission.mission_id = Some(mission_id);
    mission
}

/// A station with two missions and a mixed waitlist.
pub fn create_test_state() -> StationState {
    let mut state: StationState = StationState::new(Station::new("SBCO"));
    state.waitlist = vec![
        create_test_entry(1, "Ana Souza", "CAP", "SBRF", 5),
        create_test_entry(2, "Bruno Lima", "MAJ", "SBSM", 5),
        create_test_entry(3, "Carla Dias", "DEP", "SBGL", 3),
    ];
    state.missions = vec![
        create_test_mission(10, "SBCO, SBSM, SBRF"),
        create_test_mission(11, "SBCO, SBGL"),
    ];
    state
}

/// Failure reported by the in-memory stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure(pub &'static str);

impl std::fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store failure: {}", self.0)
    }
}

impl std::error::Error for StoreFailure {}

/// An in-memory store holding one station.
///
/// Ids are assigned from a single counter, so manifest ids never collide
/// with waitlist ids.
#[derive(Debug)]
pub struct MemoryStore {
    pub state: StationState,
    pub next_id: i64,
    pub commits: usize,
    pub fail_commit: bool,
}

impl MemoryStore {
    pub const fn new(state: StationState) -> Self {
        Self {
            state,
            next_id: 100,
            commits: 0,
            fail_commit: false,
        }
    }

    fn take_id(&mut self) -> i64 {
        let id: i64 = self.next_id;
        self.next_id += 1;
        id
    }

    fn mission_mut(&mut self, mission_id: i64) -> Option<&mut Mission> {
        self.state
            .missions
            .iter_mut()
            .find(|m| m.mission_id == Some(mission_id))
    }
}

impl StationStore for MemoryStore {
    type Error = StoreFailure;

    fn load_waitlist(&mut self, station: &Station) -> Result<Vec<WaitlistEntry>, StoreFailure> {
        Ok(self
            .state
            .waitlist
            .iter()
            .filter(|e| &e.station == station)
            .cloned()
            .collect())
    }

    fn load_missions(&mut self, station: &Station) -> Result<Vec<Mission>, StoreFailure> {
        Ok(self
            .state
            .missions
            .iter()
            .filter(|m| &m.station == station)
            .cloned()
            .collect())
    }

    fn commit(&mut self, change: &StateChange) -> Result<Option<i64>, StoreFailure> {
        if self.fail_commit {
            return Err(StoreFailure("commit refused"));
        }
        self.commits += 1;

        match change {
            StateChange::WaitlistEntryRegistered(entry) => {
                let id: i64 = self.take_id();
                let mut entry: WaitlistEntry = entry.clone();
                entry.entry_id = Some(id);
                self.state.waitlist.push(entry);
                Ok(Some(id))
            }
            StateChange::WaitlistEntryRemoved { entry_id } => {
                self.state.waitlist.retain(|e| e.entry_id != Some(*entry_id));
                Ok(None)
            }
            StateChange::MissionCreated(mission) => {
                let id: i64 = self.take_id();
                let mut mission: Mission = mission.clone();
                mission.mission_id = Some(id);
                self.state.missions.push(mission);
                Ok(Some(id))
            }
            StateChange::ManifestEntryAdded(entry) => {
                let id: i64 = self.take_id();
                let mut entry: ManifestEntry = entry.clone();
                entry.manifest_entry_id = Some(id);
                let mission_id: i64 = entry.mission_id.unwrap();
                self.mission_mut(mission_id).unwrap().manifest.push(entry);
                Ok(Some(id))
            }
            StateChange::ManifestEntryRemoved {
                mission_id,
                manifest_entry_id,
            } => {
                self.mission_mut(*mission_id)
                    .unwrap()
                    .manifest
                    .retain(|e| e.manifest_entry_id != Some(*manifest_entry_id));
                Ok(None)
            }
            StateChange::PassengerAllocated(result) => {
                let id: i64 = self.take_id();
                let mut manifest_entry: ManifestEntry = result.manifest_entry.clone();
                manifest_entry.manifest_entry_id = Some(id);
                for entry in &mut self.state.waitlist {
                    if entry.entry_id == Some(result.waitlist_entry_id) {
                        *entry = result.updated_entry.clone();
                    }
                }
                self.mission_mut(result.mission_id)
                    .unwrap()
                    .manifest
                    .push(manifest_entry);
                Ok(Some(id))
            }
        }
    }
}

/// A store whose reads always fail.
#[derive(Debug, Default)]
pub struct UnreadableStore;

impl StationStore for UnreadableStore {
    type Error = StoreFailure;

    fn load_waitlist(&mut self, _station: &Station) -> Result<Vec<WaitlistEntry>, StoreFailure> {
        Err(StoreFailure("waitlist unavailable"))
    }

    fn load_missions(&mut self, _station: &Station) -> Result<Vec<Mission>, StoreFailure> {
        Err(StoreFailure("missions unavailable"))
    }

    fn commit(&mut self, _change: &StateChange) -> Result<Option<i64>, StoreFailure> {
        Err(StoreFailure("commit unavailable"))
    }
}
