// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event lifecycle status and transition legality.
//!
//! Event status only moves forward; the sole exception is the
//! Upcoming ↔ Postponed pair. Completed and Cancelled are absorbing.
//! Time-based advancement (start/complete sweeps) is an external caller of
//! the same transitions, never a separate code path.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Being drafted; not visible to applicants.
    #[default]
    Draft,
    /// Published and open for registration handling.
    Upcoming,
    /// The first session has started.
    InProgress,
    /// All sessions have finished.
    Completed,
    /// Called off; applications are swept to Cancelled.
    Cancelled,
    /// Temporarily taken off the calendar; may return to Upcoming.
    Postponed,
}

impl EventStatus {
    /// Returns the string representation used for persistence and APIs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Upcoming => "upcoming",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Postponed => "postponed",
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validates a transition from this status to another.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not allowed. Illegal transitions are never coerced to no-ops.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                entity: "event",
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("cannot transition out of a terminal state"),
            });
        }

        let valid = match self {
            Self::Draft => matches!(new_status, Self::Upcoming),
            Self::Upcoming => {
                matches!(new_status, Self::InProgress | Self::Cancelled | Self::Postponed)
            }
            Self::InProgress => matches!(new_status, Self::Completed | Self::Cancelled),
            Self::Postponed => matches!(new_status, Self::Upcoming | Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                entity: "event",
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("transition not permitted by event lifecycle rules"),
            })
        }
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "upcoming" => Ok(Self::Upcoming),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "postponed" => Ok(Self::Postponed),
            _ => Err(DomainError::InvalidEventStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
