// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The application aggregate: one registrant's admission state machine.
//!
//! Applications are never destroyed; Withdrawn and Cancelled are soft
//! terminal states and the row remains as append-only history. The
//! aggregate knows nothing about the owning event's counters — the
//! admission coordinator keeps the two sides consistent.

use crate::application_status::ApplicationStatus;
use crate::error::DomainError;
use crate::types::{ApplicationNumber, Email};
use crate::validation::validate_reason;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Input for creating a new application.
///
/// Identity (`application_id` and the human-readable application number)
/// is assigned by the persistence collaborator at insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    /// The event being applied to.
    pub event_id: i64,
    /// Resolved registrant identity, if known at creation.
    pub participant_id: Option<i64>,
    /// Applicant display name.
    pub applicant_name: String,
    /// Validated applicant email; unique per event among active
    /// applications.
    pub email: Email,
}

/// One registrant's request to participate in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Canonical identifier assigned by the persistence collaborator.
    pub application_id: i64,
    /// Human-readable number, immutable once assigned.
    pub application_number: ApplicationNumber,
    /// The event this application belongs to.
    pub event_id: i64,
    /// Resolved registrant identity; may stay unset until submission
    /// completes identity resolution.
    pub participant_id: Option<i64>,
    /// Applicant display name.
    pub applicant_name: String,
    /// Validated applicant email.
    pub email: Email,
    /// Current admission status.
    pub status: ApplicationStatus,
    /// Stamped by `submit`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
    /// Review outcome score; opaque to the admission engine.
    pub review_score: Option<i32>,
    /// Reviewer's free-text notes.
    pub review_notes: Option<String>,
    /// Reviewer identity.
    pub reviewed_by: Option<i64>,
    /// Stamped by `record_review`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub reviewed_at: Option<OffsetDateTime>,
    /// Dense 1-based rank within the event's waitlist. Set iff Waitlisted.
    pub waitlist_position: Option<u32>,
    /// Stamped by `confirm`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub confirmed_at: Option<OffsetDateTime>,
    /// Set when the application is cancelled (individually or by event
    /// cancellation cascade).
    pub cancellation_reason: Option<String>,
    /// Set when the application is rejected.
    pub rejection_reason: Option<String>,
    /// Optimistic concurrency token; bumped by every version-checked write.
    pub version: i64,
}

impl Application {
    /// Materializes a newly inserted application from its draft.
    #[must_use]
    pub fn from_draft(
        application_id: i64,
        application_number: ApplicationNumber,
        draft: ApplicationDraft,
    ) -> Self {
        Self {
            application_id,
            application_number,
            event_id: draft.event_id,
            participant_id: draft.participant_id,
            applicant_name: draft.applicant_name,
            email: draft.email,
            status: ApplicationStatus::Draft,
            submitted_at: None,
            review_score: None,
            review_notes: None,
            reviewed_by: None,
            reviewed_at: None,
            waitlist_position: None,
            confirmed_at: None,
            cancellation_reason: None,
            rejection_reason: None,
            version: 0,
        }
    }

    /// Submits the application: Draft → Submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the applicant name is blank or the application
    /// is not in Draft.
    pub fn submit(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.applicant_name.trim().is_empty() {
            return Err(DomainError::MissingApplicantInfo("applicant name"));
        }
        if self.status != ApplicationStatus::Draft {
            return Err(self.illegal(
                ApplicationStatus::Submitted,
                "submit is only legal from draft",
            ));
        }
        self.status.validate_transition(ApplicationStatus::Submitted)?;
        self.status = ApplicationStatus::Submitted;
        self.submitted_at = Some(now);
        Ok(())
    }

    /// Moves the application into review: Submitted → `UnderReview`.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is not Submitted.
    pub fn begin_review(&mut self) -> Result<(), DomainError> {
        self.status
            .validate_transition(ApplicationStatus::UnderReview)?;
        self.status = ApplicationStatus::UnderReview;
        Ok(())
    }

    /// Returns an in-review application to the queue: `UnderReview` →
    /// Submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is not `UnderReview`.
    pub fn return_to_submitted(&mut self) -> Result<(), DomainError> {
        if self.status != ApplicationStatus::UnderReview {
            return Err(self.illegal(
                ApplicationStatus::Submitted,
                "only an in-review application can be returned to the queue",
            ));
        }
        self.status.validate_transition(ApplicationStatus::Submitted)?;
        self.status = ApplicationStatus::Submitted;
        Ok(())
    }

    /// Records a review outcome, moving to `UnderReview` if still
    /// Submitted. The score is an opaque policy input.
    ///
    /// # Errors
    ///
    /// Returns an error unless the application is Submitted or
    /// `UnderReview`.
    pub fn record_review(
        &mut self,
        score: i32,
        notes: Option<String>,
        reviewed_by: i64,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if self.status == ApplicationStatus::Submitted {
            self.begin_review()?;
        } else if self.status != ApplicationStatus::UnderReview {
            return Err(self.illegal(
                ApplicationStatus::UnderReview,
                "review requires a submitted or in-review application",
            ));
        }
        self.review_score = Some(score);
        self.review_notes = notes;
        self.reviewed_by = Some(reviewed_by);
        self.reviewed_at = Some(now);
        Ok(())
    }

    /// Accepts the application, clearing any waitlist rank.
    ///
    /// Capacity is a caller policy; this method never checks it.
    ///
    /// # Errors
    ///
    /// Returns an error unless the application is Submitted, `UnderReview`,
    /// or Waitlisted.
    pub fn accept(&mut self) -> Result<(), DomainError> {
        self.status.validate_transition(ApplicationStatus::Accepted)?;
        self.status = ApplicationStatus::Accepted;
        self.waitlist_position = None;
        Ok(())
    }

    /// Rejects the application with a required reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is blank, or the application is
    /// Confirmed, Cancelled, or otherwise terminal.
    pub fn reject(&mut self, reason: &str) -> Result<(), DomainError> {
        validate_reason(reason, "rejection reason")?;
        self.status.validate_transition(ApplicationStatus::Rejected)?;
        self.status = ApplicationStatus::Rejected;
        self.rejection_reason = Some(reason.trim().to_string());
        self.waitlist_position = None;
        Ok(())
    }

    /// Places the application on the waitlist at the given 1-based rank.
    ///
    /// The rank's density within the event is the coordinator's concern;
    /// the aggregate only refuses rank zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is zero or the application is not
    /// Submitted or `UnderReview`.
    pub fn waitlist(&mut self, position: u32) -> Result<(), DomainError> {
        if position == 0 {
            return Err(DomainError::InvalidWaitlistPosition {
                requested: 0,
                max_allowed: 1,
            });
        }
        self.status
            .validate_transition(ApplicationStatus::Waitlisted)?;
        self.status = ApplicationStatus::Waitlisted;
        self.waitlist_position = Some(position);
        Ok(())
    }

    /// Confirms attendance: Accepted → Confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is not Accepted.
    pub fn confirm(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        self.status.validate_transition(ApplicationStatus::Confirmed)?;
        self.status = ApplicationStatus::Confirmed;
        self.confirmed_at = Some(now);
        Ok(())
    }

    /// Cancels an accepted or confirmed application with a required reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is blank or the application is not
    /// Accepted or Confirmed.
    pub fn cancel(&mut self, reason: &str) -> Result<(), DomainError> {
        validate_reason(reason, "cancellation reason")?;
        if !matches!(
            self.status,
            ApplicationStatus::Accepted | ApplicationStatus::Confirmed
        ) {
            return Err(self.illegal(
                ApplicationStatus::Cancelled,
                "only an accepted or confirmed application can be cancelled",
            ));
        }
        self.status.validate_transition(ApplicationStatus::Cancelled)?;
        self.status = ApplicationStatus::Cancelled;
        self.cancellation_reason = Some(reason.trim().to_string());
        Ok(())
    }

    /// The event-cancellation cascade path: any non-terminal, non-Draft
    /// status moves to Cancelled with the composite reason.
    ///
    /// The SQL cascade expresses this as one bulk conditional update; this
    /// method is the same rule for in-memory stores and replay.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is already terminal or still in
    /// Draft.
    pub fn cancel_for_event(&mut self, reason: &str) -> Result<(), DomainError> {
        validate_reason(reason, "cancellation reason")?;
        if self.status == ApplicationStatus::Draft {
            return Err(self.illegal(
                ApplicationStatus::Cancelled,
                "draft applications are not swept by event cancellation",
            ));
        }
        self.status.validate_transition(ApplicationStatus::Cancelled)?;
        self.status = ApplicationStatus::Cancelled;
        self.cancellation_reason = Some(reason.trim().to_string());
        self.waitlist_position = None;
        Ok(())
    }

    /// Withdraws the application (applicant-initiated).
    ///
    /// # Errors
    ///
    /// Returns an error if the application is already terminal.
    pub fn withdraw(&mut self) -> Result<(), DomainError> {
        self.status.validate_transition(ApplicationStatus::Withdrawn)?;
        self.status = ApplicationStatus::Withdrawn;
        self.waitlist_position = None;
        Ok(())
    }

    fn illegal(&self, to: ApplicationStatus, reason: &str) -> DomainError {
        DomainError::InvalidStatusTransition {
            entity: "application",
            from: self.status.as_str().to_string(),
            to: to.as_str().to_string(),
            reason: reason.to_string(),
        }
    }
}
