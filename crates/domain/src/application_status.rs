// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application admission status and transition legality.
//!
//! This is the status-level matrix only: it answers whether a transition
//! between two statuses is ever legal. Field-level guards (non-blank
//! reasons, required applicant info, who may cancel) live on the
//! `Application` aggregate, and capacity policy lives with the coordinator.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Admission states of a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Being drafted by the applicant; not yet submitted.
    #[default]
    Draft,
    /// Submitted and awaiting review.
    Submitted,
    /// An admin is actively reviewing it.
    UnderReview,
    /// Admitted; consumes a capacity slot.
    Accepted,
    /// Declined by review. Terminal.
    Rejected,
    /// Held back for capacity; ranked in the event's waitlist.
    Waitlisted,
    /// Attendance confirmed by the applicant; consumes a capacity slot.
    Confirmed,
    /// Cancelled after acceptance, or swept by event cancellation. Terminal.
    Cancelled,
    /// Withdrawn by the applicant. Terminal.
    Withdrawn,
}

impl ApplicationStatus {
    /// Returns the string representation used for persistence and APIs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Waitlisted => "waitlisted",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Withdrawn)
    }

    /// Returns true if this status consumes one of the event's capacity slots.
    #[must_use]
    pub const fn consumes_slot(&self) -> bool {
        matches!(self, Self::Accepted | Self::Confirmed)
    }

    /// Returns true if this status counts toward the per-event email
    /// uniqueness rule. Only withdrawal frees the email for reapplication.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Withdrawn)
    }

    /// Returns true if this application currently holds a waitlist rank.
    #[must_use]
    pub const fn on_waitlist(&self) -> bool {
        matches!(self, Self::Waitlisted)
    }

    /// Validates a transition from this status to another.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not allowed. Terminal states accept nothing; attempts always fail and
    /// never mutate.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                entity: "application",
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("cannot transition out of a terminal state"),
            });
        }

        let valid = match self {
            Self::Draft => matches!(new_status, Self::Submitted | Self::Rejected | Self::Withdrawn),
            Self::Submitted => matches!(
                new_status,
                Self::UnderReview
                    | Self::Accepted
                    | Self::Rejected
                    | Self::Waitlisted
                    | Self::Withdrawn
                    | Self::Cancelled
            ),
            Self::UnderReview => matches!(
                new_status,
                Self::Submitted
                    | Self::Accepted
                    | Self::Rejected
                    | Self::Waitlisted
                    | Self::Withdrawn
                    | Self::Cancelled
            ),
            Self::Accepted => matches!(
                new_status,
                Self::Confirmed | Self::Rejected | Self::Cancelled | Self::Withdrawn
            ),
            Self::Waitlisted => matches!(
                new_status,
                Self::Accepted | Self::Rejected | Self::Withdrawn | Self::Cancelled
            ),
            Self::Confirmed => matches!(new_status, Self::Cancelled | Self::Withdrawn),
            Self::Rejected | Self::Cancelled | Self::Withdrawn => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                entity: "application",
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("transition not permitted by admission lifecycle rules"),
            })
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "waitlisted" => Ok(Self::Waitlisted),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(DomainError::InvalidApplicationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
