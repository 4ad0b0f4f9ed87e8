// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{PassengerDetails, Station, Weights};

/// Validates that a station code is usable.
///
/// # Errors
///
/// Returns an error if the station code is empty.
pub fn validate_station(station: &Station) -> Result<(), DomainError> {
    if station.code().is_empty() {
        return Err(DomainError::InvalidStation(String::from(
            "Station code cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the passenger fields shared by waitlist and manifest entries.
///
/// The destination is not checked. An entry with an empty destination is
/// accepted but never matches a mission.
///
/// # Arguments
///
/// * `passenger` - The passenger to validate
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The rank is empty
/// - Any weight is negative or not finite
pub fn validate_passenger_details(passenger: &PassengerDetails) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if passenger.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: rank must not be empty (unknown codes are allowed)
    if passenger.rank.trim().is_empty() {
        return Err(DomainError::InvalidRank(String::from(
            "Rank cannot be empty",
        )));
    }

    validate_weights(&passenger.weights)
}

/// Validates that every weight is a finite, non-negative number.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeight` naming the first offending field.
pub fn validate_weights(weights: &Weights) -> Result<(), DomainError> {
    for (field, value) in [
        ("weight_person", weights.person),
        ("weight_checked_baggage", weights.checked_baggage),
        ("weight_carry_on", weights.carry_on),
    ] {
        if !value.is_finite() {
            return Err(DomainError::InvalidWeight {
                field,
                reason: String::from("must be a finite number"),
            });
        }
        if value < 0.0 {
            return Err(DomainError::InvalidWeight {
                field,
                reason: format!("must not be negative, got {value}"),
            });
        }
    }
    Ok(())
}

/// Validates the fields of a new mission.
///
/// An empty route is accepted; such a mission matches no one.
///
/// # Errors
///
/// Returns an error if the mission number is empty.
pub fn validate_mission_number(mission_number: &str) -> Result<(), DomainError> {
    if mission_number.trim().is_empty() {
        return Err(DomainError::InvalidMissionNumber(String::from(
            "Mission number cannot be empty",
        )));
    }
    Ok(())
}
