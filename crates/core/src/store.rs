// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage collaborator seam.
//!
//! Commands run in three steps: load the station state, apply the command
//! purely, then commit the resulting change. A change is reported as done
//! only after storage confirms the commit, so a failed write never leaves
//! callers believing a passenger was allocated.

use crate::apply::apply;
use crate::command::Command;
use crate::error::ExecuteError;
use crate::state::{StateChange, StationState, TransitionResult};
use airlift_domain::{Mission, Station, WaitlistEntry};

/// Storage for station-scoped waitlists and missions.
pub trait StationStore {
    /// The storage failure type.
    type Error: std::error::Error;

    /// Loads every waitlist entry of a station, allocated or not.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn load_waitlist(&mut self, station: &Station) -> Result<Vec<WaitlistEntry>, Self::Error>;

    /// Loads every mission of a station, with manifests.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn load_missions(&mut self, station: &Station) -> Result<Vec<Mission>, Self::Error>;

    /// Persists a change as a single all-or-nothing unit.
    ///
    /// Returns the id assigned to the created record, if the change
    /// created one. For an allocation this is the manifest entry id.
    ///
    /// # Errors
    ///
    /// Returns an error if the change could not be written. Nothing is
    /// written in that case.
    fn commit(&mut self, change: &StateChange) -> Result<Option<i64>, Self::Error>;

    /// Loads the full state of a station.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn load_state(&mut self, station: &Station) -> Result<StationState, Self::Error> {
        Ok(StationState {
            station: station.clone(),
            waitlist: self.load_waitlist(station)?,
            missions: self.load_missions(station)?,
        })
    }
}

/// A command that was applied and committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    /// The committed change, with any storage-assigned id filled in.
    pub change: StateChange,
    /// The id storage assigned to the created record, if any.
    pub assigned_id: Option<i64>,
}

/// Loads a station, applies a command and commits the change.
///
/// # Errors
///
/// - `ExecuteError::Rejected` if the command violates a domain rule;
///   storage is not written
/// - `ExecuteError::Storage` if loading or committing fails
pub fn execute<S: StationStore>(
    store: &mut S,
    station: &Station,
    command: Command,
) -> Result<Executed, ExecuteError<S::Error>> {
    let state: StationState = store.load_state(station).map_err(ExecuteError::Storage)?;
    let transition: TransitionResult = apply(&state, command)?;

    let assigned_id: Option<i64> = store
        .commit(&transition.change)
        .map_err(ExecuteError::Storage)?;

    let change: StateChange = match assigned_id {
        Some(id) => transition.change.with_assigned_id(id),
        None => transition.change,
    };

    Ok(Executed {
        change,
        assigned_id,
    })
}
