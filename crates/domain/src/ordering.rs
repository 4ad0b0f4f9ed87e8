// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Passenger ordering based on priority tier and rank precedence.
//!
//! This is the single ordering used everywhere passengers are listed:
//! the active waitlist, compatibility results and mission manifests.
//!
//! ## Ordering Rules (Authoritative)
//!
//! Passengers are ordered by:
//! 1. Priority tier (tier 1 first)
//! 2. Rank, through the rank table:
//!    - both ranks known: lower table index first
//!    - exactly one rank known: the known rank first
//!    - neither rank known: case-sensitive lexicographic order of the codes
//!
//! ## Invariants
//!
//! - Ties after both rules are allowed
//! - Sorting is stable, so tied passengers keep their input order
//! - Sorting an already sorted list leaves it unchanged

use crate::priority::PriorityTier;
use crate::rank_table::{RankOrder, RankTable};
use crate::types::{ManifestEntry, PassengerDetails, WaitlistEntry};
use std::cmp::Ordering;

/// Anything that can be placed in passenger order.
pub trait Prioritized {
    /// The passenger's priority tier.
    fn priority_tier(&self) -> PriorityTier;
    /// The passenger's rank code.
    fn rank_code(&self) -> &str;
}

impl Prioritized for PassengerDetails {
    fn priority_tier(&self) -> PriorityTier {
        self.priority
    }

    fn rank_code(&self) -> &str {
        &self.rank
    }
}

impl Prioritized for WaitlistEntry {
    fn priority_tier(&self) -> PriorityTier {
        self.passenger.priority
    }

    fn rank_code(&self) -> &str {
        &self.passenger.rank
    }
}

impl Prioritized for ManifestEntry {
    fn priority_tier(&self) -> PriorityTier {
        self.passenger.priority
    }

    fn rank_code(&self) -> &str {
        &self.passenger.rank
    }
}

impl<P: Prioritized + ?Sized> Prioritized for &P {
    fn priority_tier(&self) -> PriorityTier {
        (**self).priority_tier()
    }

    fn rank_code(&self) -> &str {
        (**self).rank_code()
    }
}

/// Compares two rank codes through the rank table.
///
/// Returns:
/// - `Ordering::Less` if `a` takes precedence
/// - `Ordering::Greater` if `b` takes precedence
/// - `Ordering::Equal` if neither does
#[must_use]
pub fn compare_ranks(a: &str, b: &str, ranks: &RankTable) -> Ordering {
    match (ranks.rank_order(a), ranks.rank_order(b)) {
        (RankOrder::Known(index_a), RankOrder::Known(index_b)) => index_a.cmp(&index_b),
        (RankOrder::Known(_), RankOrder::Unknown) => Ordering::Less,
        (RankOrder::Unknown, RankOrder::Known(_)) => Ordering::Greater,
        (RankOrder::Unknown, RankOrder::Unknown) => a.cmp(b),
    }
}

/// Compares two passengers by priority tier, then rank.
///
/// `Ordering::Less` means `a` is served first.
#[must_use]
pub fn compare_passengers<P: Prioritized + ?Sized>(a: &P, b: &P, ranks: &RankTable) -> Ordering {
    a.priority_tier()
        .cmp(&b.priority_tier())
        .then_with(|| compare_ranks(a.rank_code(), b.rank_code(), ranks))
}

/// Sorts passengers in place into serving order.
///
/// The sort is stable.
pub fn sort_passengers<P: Prioritized>(passengers: &mut [P], ranks: &RankTable) {
    passengers.sort_by(|a, b| compare_passengers(a, b, ranks));
}

/// Returns references to `passengers` in serving order.
#[must_use]
pub fn ordered<'a, P, I>(passengers: I, ranks: &RankTable) -> Vec<&'a P>
where
    P: Prioritized + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut refs: Vec<&'a P> = passengers.into_iter().collect();
    sort_passengers(&mut refs, ranks);
    refs
}
