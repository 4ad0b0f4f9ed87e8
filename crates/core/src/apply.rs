// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{StateChange, StationState, TransitionResult};
use airlift_domain::{
    AllocationResult, DomainError, ManifestEntry, Mission, WaitlistEntry, allocate,
    validate_mission_number, validate_passenger_details, validate_station,
};

/// Applies a command to the current state, producing a new state and the
/// change to persist.
///
/// This function is pure: the input state is never modified.
///
/// # Arguments
///
/// * `state` - The current station state
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and the change
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The station code is empty
/// - Passenger or mission fields fail validation
/// - A referenced entry, mission or manifest entry does not exist in the station
/// - The waitlist entry to allocate is already allocated
#[allow(clippy::too_many_lines)]
pub fn apply(state: &StationState, command: Command) -> Result<TransitionResult, CoreError> {
    validate_station(&state.station)?;

    match command {
        Command::RegisterWaitlistEntry {
            passenger,
            registered_at,
        } => {
            validate_passenger_details(&passenger)?;

            let entry: WaitlistEntry =
                WaitlistEntry::new(state.station.clone(), passenger, registered_at);

            let mut new_state: StationState = state.clone();
            new_state.waitlist.push(entry.clone());

            Ok(TransitionResult {
                new_state,
                change: StateChange::WaitlistEntryRegistered(entry),
            })
        }
        Command::RemoveWaitlistEntry { entry_id } => {
            state.waitlist_entry(entry_id)?;

            let mut new_state: StationState = state.clone();
            new_state.waitlist.retain(|e| e.entry_id != Some(entry_id));

            Ok(TransitionResult {
                new_state,
                change: StateChange::WaitlistEntryRemoved { entry_id },
            })
        }
        Command::CreateMission {
            mission_number,
            aircraft,
            departure_date,
            route,
        } => {
            validate_mission_number(&mission_number)?;

            let mut mission: Mission =
                Mission::new(state.station.clone(), mission_number.trim().to_string(), route);
            mission.aircraft = aircraft
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty());
            mission.departure_date = departure_date;

            let mut new_state: StationState = state.clone();
            new_state.missions.push(mission.clone());

            Ok(TransitionResult {
                new_state,
                change: StateChange::MissionCreated(mission),
            })
        }
        Command::AddManifestEntry {
            mission_id,
            passenger,
        } => {
            state.mission(mission_id)?;
            validate_passenger_details(&passenger)?;

            let entry: ManifestEntry = ManifestEntry::direct(mission_id, passenger);
            let new_state: StationState = with_manifest_entry(state, mission_id, entry.clone());

            Ok(TransitionResult {
                new_state,
                change: StateChange::ManifestEntryAdded(entry),
            })
        }
        Command::RemoveManifestEntry {
            mission_id,
            manifest_entry_id,
        } => {
            let mission: &Mission = state.mission(mission_id)?;
            if mission.manifest_entry(manifest_entry_id).is_none() {
                return Err(CoreError::DomainViolation(
                    DomainError::ManifestEntryNotFound {
                        mission_id,
                        manifest_entry_id,
                    },
                ));
            }

            let mut new_state: StationState = state.clone();
            for mission in &mut new_state.missions {
                if mission.mission_id == Some(mission_id) {
                    mission
                        .manifest
                        .retain(|e| e.manifest_entry_id != Some(manifest_entry_id));
                }
            }

            Ok(TransitionResult {
                new_state,
                change: StateChange::ManifestEntryRemoved {
                    mission_id,
                    manifest_entry_id,
                },
            })
        }
        Command::AllocatePassenger {
            entry_id,
            mission_id,
        } => {
            let entry: &WaitlistEntry = state.waitlist_entry(entry_id)?;
            let mission: &Mission = state.mission(mission_id)?;

            let result: AllocationResult = allocate(entry, mission)?;

            let mut new_state: StationState =
                with_manifest_entry(state, mission_id, result.manifest_entry.clone());
            for waiting in &mut new_state.waitlist {
                if waiting.entry_id == Some(entry_id) {
                    *waiting = result.updated_entry.clone();
                }
            }

            Ok(TransitionResult {
                new_state,
                change: StateChange::PassengerAllocated(result),
            })
        }
    }
}

fn with_manifest_entry(
    state: &StationState,
    mission_id: i64,
    entry: ManifestEntry,
) -> StationState {
    let mut new_state: StationState = state.clone();
    if let Some(mission) = new_state
        .missions
        .iter_mut()
        .find(|m| m.mission_id == Some(mission_id))
    {
        mission.manifest.push(entry);
    }
    new_state
}
