// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A status transition was requested that the lifecycle rules forbid.
    InvalidStatusTransition {
        /// The aggregate kind ("event" or "application").
        entity: &'static str,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// An active application already exists for this (event, email) pair.
    DuplicateApplication {
        /// The event being applied to.
        event_id: i64,
        /// The colliding email address.
        email: String,
    },
    /// Accepting would exceed the event's participant capacity.
    CapacityExceeded {
        /// The event at capacity.
        event_id: i64,
        /// The configured participant ceiling.
        max_participants: u32,
    },
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Required applicant information is missing at submission.
    MissingApplicantInfo(&'static str),
    /// A required free-text reason was blank.
    BlankReason(&'static str),
    /// Event title is empty or blank.
    MissingTitle,
    /// Event location is not set.
    MissingLocation,
    /// Event has no scheduled sessions.
    NoScheduledSessions,
    /// The application deadline is already in the past.
    DeadlinePassed {
        /// The configured deadline.
        deadline: OffsetDateTime,
    },
    /// A session's end time does not come after its start time.
    InvalidSessionWindow {
        /// Session start.
        starts_at: OffsetDateTime,
        /// Session end.
        ends_at: OffsetDateTime,
    },
    /// Maximum participants must be a positive integer when set.
    InvalidMaxParticipants {
        /// The invalid value.
        value: u32,
    },
    /// A requested waitlist position is outside the valid range.
    InvalidWaitlistPosition {
        /// The requested position.
        requested: u32,
        /// The largest position that may be requested (tail + 1).
        max_allowed: u32,
    },
    /// Event status string could not be parsed.
    InvalidEventStatus(String),
    /// Application status string could not be parsed.
    InvalidApplicationStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatusTransition {
                entity,
                from,
                to,
                reason,
            } => {
                write!(
                    f,
                    "Illegal {entity} status transition from '{from}' to '{to}': {reason}"
                )
            }
            Self::DuplicateApplication { event_id, email } => {
                write!(
                    f,
                    "An active application for '{email}' already exists on event {event_id}"
                )
            }
            Self::CapacityExceeded {
                event_id,
                max_participants,
            } => {
                write!(
                    f,
                    "Event {event_id} is at its participant capacity of {max_participants}"
                )
            }
            Self::InvalidEmail(msg) => write!(f, "Invalid email address: {msg}"),
            Self::MissingApplicantInfo(field) => {
                write!(f, "Missing applicant information: {field}")
            }
            Self::BlankReason(field) => write!(f, "A non-blank {field} is required"),
            Self::MissingTitle => write!(f, "Event title must not be blank"),
            Self::MissingLocation => write!(f, "Event location must be set before publishing"),
            Self::NoScheduledSessions => {
                write!(f, "Event must have at least one scheduled session")
            }
            Self::DeadlinePassed { deadline } => {
                write!(f, "Application deadline {deadline} is in the past")
            }
            Self::InvalidSessionWindow { starts_at, ends_at } => {
                write!(f, "Session end {ends_at} must come after start {starts_at}")
            }
            Self::InvalidMaxParticipants { value } => {
                write!(
                    f,
                    "Invalid maximum participants: {value}. Must be greater than 0"
                )
            }
            Self::InvalidWaitlistPosition {
                requested,
                max_allowed,
            } => {
                write!(
                    f,
                    "Invalid waitlist position {requested}: must be between 1 and {max_allowed}"
                )
            }
            Self::InvalidEventStatus(status) => write!(f, "Invalid event status: {status}"),
            Self::InvalidApplicationStatus(status) => {
                write!(f, "Invalid application status: {status}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
