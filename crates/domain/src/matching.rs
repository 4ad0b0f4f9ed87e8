// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Waitlist views and mission compatibility.
//!
//! A waitlist entry is compatible with a mission when:
//! - both belong to the same station
//! - the entry has not been allocated
//! - the entry's destination appears on the mission's route
//!
//! Results are always returned in passenger order.

use crate::ordering::ordered;
use crate::rank_table::RankTable;
use crate::types::{Mission, Station, WaitlistEntry};

/// Returns whether `entry` could be placed on `mission`.
#[must_use]
pub fn is_compatible(entry: &WaitlistEntry, mission: &Mission) -> bool {
    entry.station == mission.station
        && !entry.is_allocated()
        && mission.route.reaches(&entry.passenger.destination)
}

/// Returns the waitlist entries that can be placed on `mission`, in
/// passenger order.
///
/// An empty route or an empty waitlist yields an empty result.
#[must_use]
pub fn compatible_entries<'a>(
    mission: &Mission,
    waitlist: &'a [WaitlistEntry],
    ranks: &RankTable,
) -> Vec<&'a WaitlistEntry> {
    ordered(
        waitlist.iter().filter(|entry| is_compatible(entry, mission)),
        ranks,
    )
}

/// Returns the unallocated entries of `station`, in passenger order.
#[must_use]
pub fn active_waitlist<'a>(
    station: &Station,
    waitlist: &'a [WaitlistEntry],
    ranks: &RankTable,
) -> Vec<&'a WaitlistEntry> {
    ordered(
        waitlist
            .iter()
            .filter(|entry| &entry.station == station && !entry.is_allocated()),
        ranks,
    )
}
