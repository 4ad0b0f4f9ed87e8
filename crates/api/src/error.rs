// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use airlift::{CoreError, ExecuteError};
use airlift_domain::DomainError;
use airlift_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Another writer allocated the waitlist entry first.
    #[error("Allocation conflict: {message}")]
    AllocationConflict {
        /// The contested waitlist entry.
        entry_id: i64,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// The uploaded CSV could not be read.
    #[error("Invalid CSV format: {reason}")]
    InvalidCsvFormat {
        /// Why the CSV was rejected.
        reason: String,
    },
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStation(msg) => ApiError::InvalidInput {
            field: String::from("station"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidRank(msg) => ApiError::InvalidInput {
            field: String::from("rank"),
            message: msg,
        },
        DomainError::InvalidWeight { field, reason } => ApiError::InvalidInput {
            field: field.to_string(),
            message: reason,
        },
        DomainError::InvalidPriorityTier { value } => ApiError::InvalidInput {
            field: String::from("priority_tier"),
            message: format!("Invalid priority tier: {value}. Must be between 1 and 13"),
        },
        DomainError::InvalidMissionNumber(msg) => ApiError::InvalidInput {
            field: String::from("mission_number"),
            message: msg,
        },
        DomainError::WaitlistEntryNotFound { station, entry_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Waitlist entry"),
            message: format!("Waitlist entry {entry_id} does not exist at station '{station}'"),
        },
        DomainError::MissionNotFound {
            station,
            mission_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Mission"),
            message: format!("Mission {mission_id} does not exist at station '{station}'"),
        },
        DomainError::ManifestEntryNotFound {
            mission_id,
            manifest_entry_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Manifest entry"),
            message: format!(
                "Manifest entry {manifest_entry_id} does not exist on mission {mission_id}"
            ),
        },
        DomainError::EntryAlreadyAllocated {
            entry_id,
            mission_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("single_allocation"),
            message: format!(
                "Waitlist entry {entry_id} is already allocated to mission {mission_id}"
            ),
        },
        DomainError::WaitlistEntryNotPersisted | DomainError::MissionNotPersisted => {
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AllocationConflict { entry_id } => ApiError::AllocationConflict {
            entry_id,
            message: format!(
                "Waitlist entry {entry_id} was allocated by another request; nothing was written"
            ),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates the outcome of a failed `execute` call into an API error.
#[must_use]
pub fn translate_execute_error(err: ExecuteError<PersistenceError>) -> ApiError {
    match err {
        ExecuteError::Rejected(core_err) => translate_core_error(core_err),
        ExecuteError::Storage(persistence_err) => translate_persistence_error(persistence_err),
    }
}
