// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The event aggregate: capacity, scheduling state, and derived counters.
//!
//! Transition methods validate the current status before mutating and never
//! infer legality from incidental field values. The two counters are
//! derived data owned by the admission coordinator; aggregate methods never
//! touch them, and the persistence layer adjusts them only through atomic
//! increment primitives.

use crate::error::DomainError;
use crate::event_status::EventStatus;
use crate::types::Session;
use crate::validation::{validate_max_participants, validate_reason};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Input for creating a new event.
///
/// Drafts carry no identity; the persistence collaborator assigns the id
/// when the row is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Event title. May still be blank in Draft; required to publish.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Venue. Required to publish.
    pub location: Option<String>,
    /// Participant ceiling; `None` means unlimited.
    pub max_participants: Option<u32>,
    /// Scheduled sessions, ordered by start time.
    pub sessions: Vec<Session>,
    /// Registration window open instant.
    pub registration_opens_at: Option<OffsetDateTime>,
    /// Registration window close instant.
    pub registration_closes_at: Option<OffsetDateTime>,
    /// Hard application deadline.
    pub application_deadline: Option<OffsetDateTime>,
}

impl EventDraft {
    /// Creates a minimal draft with just a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            max_participants: None,
            sessions: Vec::new(),
            registration_opens_at: None,
            registration_closes_at: None,
            application_deadline: None,
        }
    }
}

/// A capacity-bounded scheduled activity that accepts applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Canonical identifier assigned by the persistence collaborator.
    pub event_id: i64,
    /// Event title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Venue.
    pub location: Option<String>,
    /// Current lifecycle status.
    pub status: EventStatus,
    /// Participant ceiling; `None` means unlimited.
    pub max_participants: Option<u32>,
    /// Count of applications ever submitted and still live (not withdrawn
    /// or individually cancelled). Coordinator-owned.
    pub application_count: u32,
    /// Count of applications currently consuming a capacity slot
    /// (accepted or confirmed). Coordinator-owned.
    pub participant_count: u32,
    /// Scheduled sessions, ordered by start time. Non-empty once published.
    pub sessions: Vec<Session>,
    /// Registration window open instant.
    #[serde(with = "time::serde::rfc3339::option")]
    pub registration_opens_at: Option<OffsetDateTime>,
    /// Registration window close instant.
    #[serde(with = "time::serde::rfc3339::option")]
    pub registration_closes_at: Option<OffsetDateTime>,
    /// Hard application deadline.
    #[serde(with = "time::serde::rfc3339::option")]
    pub application_deadline: Option<OffsetDateTime>,
    /// Stamped by `publish`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    /// Set only when status is Cancelled.
    pub cancellation_reason: Option<String>,
    /// Optimistic concurrency token; bumped by every version-checked write.
    pub version: i64,
}

impl Event {
    /// Materializes a newly inserted event from its draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft carries a zero participant ceiling.
    pub fn from_draft(event_id: i64, draft: EventDraft) -> Result<Self, DomainError> {
        validate_max_participants(draft.max_participants)?;
        let mut sessions = draft.sessions;
        sessions.sort_by_key(|s| s.starts_at);
        Ok(Self {
            event_id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            status: EventStatus::Draft,
            max_participants: draft.max_participants,
            application_count: 0,
            participant_count: 0,
            sessions,
            registration_opens_at: draft.registration_opens_at,
            registration_closes_at: draft.registration_closes_at,
            application_deadline: draft.application_deadline,
            published_at: None,
            cancellation_reason: None,
            version: 0,
        })
    }

    /// Publishes the event: Draft → Upcoming.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not in Draft, has no sessions, a
    /// blank title, no location, or an application deadline already in the
    /// past.
    pub fn publish(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.status != EventStatus::Draft {
            return Err(self.illegal(EventStatus::Upcoming, "publish is only legal from draft"));
        }
        self.status.validate_transition(EventStatus::Upcoming)?;
        if self.title.trim().is_empty() {
            return Err(DomainError::MissingTitle);
        }
        if self.location.is_none() {
            return Err(DomainError::MissingLocation);
        }
        if self.sessions.is_empty() {
            return Err(DomainError::NoScheduledSessions);
        }
        if let Some(deadline) = self.application_deadline
            && deadline <= now
        {
            return Err(DomainError::DeadlinePassed { deadline });
        }
        self.status = EventStatus::Upcoming;
        self.published_at = Some(now);
        Ok(())
    }

    /// Starts the event: Upcoming → `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not Upcoming.
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.status.validate_transition(EventStatus::InProgress)?;
        self.status = EventStatus::InProgress;
        Ok(())
    }

    /// Completes the event: `InProgress` → Completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not `InProgress`.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.status.validate_transition(EventStatus::Completed)?;
        self.status = EventStatus::Completed;
        Ok(())
    }

    /// Postpones the event: Upcoming → Postponed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not Upcoming.
    pub fn postpone(&mut self) -> Result<(), DomainError> {
        self.status.validate_transition(EventStatus::Postponed)?;
        self.status = EventStatus::Postponed;
        Ok(())
    }

    /// Returns a postponed event to the calendar: Postponed → Upcoming.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not Postponed.
    pub fn republish(&mut self) -> Result<(), DomainError> {
        if self.status != EventStatus::Postponed {
            return Err(self.illegal(EventStatus::Upcoming, "republish is only legal from postponed"));
        }
        self.status.validate_transition(EventStatus::Upcoming)?;
        self.status = EventStatus::Upcoming;
        Ok(())
    }

    /// Cancels the event with a required reason.
    ///
    /// The coordinator is responsible for the application cascade; this
    /// method only moves the event itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is blank or the event is already
    /// Completed or Cancelled (or still Draft).
    pub fn cancel(&mut self, reason: &str) -> Result<(), DomainError> {
        validate_reason(reason, "cancellation reason")?;
        self.status.validate_transition(EventStatus::Cancelled)?;
        self.status = EventStatus::Cancelled;
        self.cancellation_reason = Some(reason.trim().to_string());
        Ok(())
    }

    /// Remaining capacity slots; `None` means unlimited.
    #[must_use]
    pub fn available_spots(&self) -> Option<u32> {
        self.max_participants
            .map(|max| max.saturating_sub(self.participant_count))
    }

    /// Returns true if at least one capacity slot remains (or capacity is
    /// unlimited).
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.available_spots().is_none_or(|spots| spots > 0)
    }

    /// The caller-chosen capacity check.
    ///
    /// Direct acceptance deliberately does not call this; policies that
    /// refuse to overbook do.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CapacityExceeded` if no slot remains.
    pub fn ensure_capacity(&self) -> Result<(), DomainError> {
        if self.has_capacity() {
            Ok(())
        } else {
            Err(DomainError::CapacityExceeded {
                event_id: self.event_id,
                max_participants: self.max_participants.unwrap_or(0),
            })
        }
    }

    /// Returns true if registration is open at `now`.
    ///
    /// Open means: status Upcoming and `now` within the registration
    /// window; with no window configured, before the application deadline
    /// if one is set, else always open while Upcoming.
    #[must_use]
    pub fn is_registration_open(&self, now: OffsetDateTime) -> bool {
        if self.status != EventStatus::Upcoming {
            return false;
        }
        match (self.registration_opens_at, self.registration_closes_at) {
            (None, None) => self.application_deadline.is_none_or(|d| now < d),
            (opens, closes) => {
                opens.is_none_or(|o| now >= o) && closes.is_none_or(|c| now <= c)
            }
        }
    }

    fn illegal(&self, to: EventStatus, reason: &str) -> DomainError {
        DomainError::InvalidStatusTransition {
            entity: "event",
            from: self.status.as_str().to_string(),
            to: to.as_str().to_string(),
            reason: reason.to_string(),
        }
    }
}
