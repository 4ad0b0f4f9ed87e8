// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airlift_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Errors returned by [`crate::execute`].
///
/// A rejected command never reaches storage. A storage error means the
/// command was valid but the change was not confirmed.
#[derive(Debug)]
pub enum ExecuteError<E> {
    /// The command was rejected before any write.
    Rejected(CoreError),
    /// The storage collaborator failed to load or commit.
    Storage(E),
}

impl<E: std::fmt::Display> std::fmt::Display for ExecuteError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "Command rejected: {err}"),
            Self::Storage(err) => write!(f, "Storage failure: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ExecuteError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl<E> From<CoreError> for ExecuteError<E> {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}
