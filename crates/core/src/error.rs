// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use muster_domain::DomainError;

/// Errors surfaced by admission coordinator operations.
///
/// Every variant propagates unchanged to the immediate caller; the engine
/// never retries internally and never coerces a failure to a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// The referenced event or application does not exist.
    NotFound {
        /// The aggregate kind ("event" or "application").
        entity: &'static str,
        /// The id that was looked up.
        id: i64,
    },
    /// A domain rule was violated (illegal transition, duplicate
    /// application, capacity, validation).
    DomainViolation(DomainError),
    /// A version-checked write lost the race; the caller must reload and
    /// retry or surface the conflict.
    ConcurrentModification {
        /// The aggregate kind ("event" or "application").
        entity: &'static str,
        /// The row whose version no longer matched.
        id: i64,
    },
    /// The persistence collaborator failed.
    Store(String),
}

impl std::fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ConcurrentModification { entity, id } => {
                write!(
                    f,
                    "{entity} {id} was modified concurrently; reload and retry"
                )
            }
            Self::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for AdmissionError {}

impl From<DomainError> for AdmissionError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
