// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::Serialize;

/// A passenger priority class.
///
/// Tier 1 has the highest precedence and tier 13 the lowest. Ordering on
/// this type is ascending by tier number, so higher-precedence tiers sort
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PriorityTier(u8);

impl PriorityTier {
    /// The highest-precedence tier.
    pub const HIGHEST: Self = Self(1);
    /// The lowest-precedence tier.
    pub const LOWEST: Self = Self(13);

    /// Creates a new `PriorityTier`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPriorityTier` if `value` is not between 1 and 13.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::HIGHEST.0..=Self::LOWEST.0).contains(v))
            .map(Self)
            .ok_or(DomainError::InvalidPriorityTier { value })
    }

    /// Returns the tier number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priority tier with its display description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityLevel {
    /// The tier.
    pub tier: PriorityTier,
    /// Human-readable description (display only).
    pub description: &'static str,
}

const DESCRIPTIONS: [&str; 13] = [
    "Aeromedical evacuation and humanitarian emergencies",
    "Mission-essential personnel on official duty",
    "Personnel on transfer orders",
    "Personnel on official travel",
    "Service members travelling for medical treatment",
    "Dependents travelling for medical treatment",
    "Service members on leave",
    "Dependents accompanying a service member",
    "Dependents travelling unaccompanied",
    "Retired service members",
    "Dependents of retired service members",
    "Civilian employees of the armed forces",
    "Other authorized passengers",
];

/// Returns the priority table, highest precedence first.
#[must_use]
pub fn priority_levels() -> Vec<PriorityLevel> {
    DESCRIPTIONS
        .into_iter()
        .zip(PriorityTier::HIGHEST.0..=PriorityTier::LOWEST.0)
        .map(|(description, tier)| PriorityLevel {
            tier: PriorityTier(tier),
            description,
        })
        .collect()
}
