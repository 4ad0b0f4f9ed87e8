// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod error;
mod matching;
mod ordering;
mod priority;
mod rank_table;
mod route;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use allocation::{AllocationResult, allocate};
pub use matching::{active_waitlist, compatible_entries, is_compatible};
pub use ordering::{Prioritized, compare_passengers, compare_ranks, ordered, sort_passengers};
pub use priority::{PriorityLevel, PriorityTier, priority_levels};
pub use rank_table::{RankOrder, RankTable};
pub use route::{ROUTE_DELIMITER, Route};

// Re-export public types
pub use error::DomainError;
pub use types::{
    ManifestEntry, ManifestSource, ManifestTotals, Mission, PassengerDetails, Station,
    WaitlistEntry, Weights,
};
pub use validation::{
    validate_mission_number, validate_passenger_details, validate_station, validate_weights,
};
