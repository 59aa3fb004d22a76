// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admission coordinator.
//!
//! The coordinator is the only writer of event counters and the only code
//! allowed to move applications on and off the waitlist. Aggregates guard
//! their own transitions; the coordinator sequences the cross-aggregate
//! effects (counter adjustments, ranker renumbering, cancellation
//! cascades) inside one store transaction per public operation.
//!
//! Capacity is deliberately not enforced on direct acceptance: admins may
//! overbook. `Event::ensure_capacity` is the exposed check for callers
//! that refuse to, and waitlist promotion always honors it.

use crate::error::AdmissionError;
use crate::notice::{AdmissionNotice, AdmissionNotifier};
use crate::store::AdmissionStore;
use muster_domain::{
    Application, ApplicationDraft, ApplicationStatus, DomainError, Event, EventDraft,
};
use time::OffsetDateTime;
use tracing::{info, warn};

/// Orchestrates cross-aggregate admission operations over a store.
///
/// The coordinator itself is stateless between operations; everything it
/// knows lives in the store.
pub struct AdmissionCoordinator<S: AdmissionStore> {
    store: S,
    notifiers: Vec<Box<dyn AdmissionNotifier>>,
}

impl<S: AdmissionStore> AdmissionCoordinator<S> {
    /// Creates a coordinator over the given store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifiers: Vec::new(),
        }
    }

    /// Subscribes a notifier to admission milestones.
    pub fn subscribe(&mut self, notifier: Box<dyn AdmissionNotifier>) {
        self.notifiers.push(notifier);
    }

    /// Consumes the coordinator, returning the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    // ========================================================================
    // Event lifecycle
    // ========================================================================

    /// Creates a new draft event.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the insert fails.
    pub fn create_event(&mut self, draft: EventDraft) -> Result<Event, AdmissionError> {
        self.store.transaction(|store| store.insert_event(draft))
    }

    /// Publishes a draft event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing, fails a publish
    /// precondition, or was modified concurrently.
    pub fn publish_event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        let now = OffsetDateTime::now_utc();
        self.store.transaction(|store| {
            let mut event = store.load_event(event_id)?;
            event.publish(now)?;
            store.save_event(&mut event)?;
            Ok(event)
        })
    }

    /// Starts an upcoming event. Called by admins or the scheduled sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing, not Upcoming, or was
    /// modified concurrently.
    pub fn start_event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        self.store.transaction(|store| {
            let mut event = store.load_event(event_id)?;
            event.start()?;
            store.save_event(&mut event)?;
            Ok(event)
        })
    }

    /// Completes an in-progress event. Called by admins or the scheduled
    /// sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing, not `InProgress`, or was
    /// modified concurrently.
    pub fn complete_event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        self.store.transaction(|store| {
            let mut event = store.load_event(event_id)?;
            event.complete()?;
            store.save_event(&mut event)?;
            Ok(event)
        })
    }

    /// Postpones an upcoming event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing, not Upcoming, or was
    /// modified concurrently.
    pub fn postpone_event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        self.store.transaction(|store| {
            let mut event = store.load_event(event_id)?;
            event.postpone()?;
            store.save_event(&mut event)?;
            Ok(event)
        })
    }

    /// Returns a postponed event to the calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing, not Postponed, or was
    /// modified concurrently.
    pub fn republish_event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        self.store.transaction(|store| {
            let mut event = store.load_event(event_id)?;
            event.republish()?;
            store.save_event(&mut event)?;
            Ok(event)
        })
    }

    /// Cancels an event and sweeps every open application to Cancelled
    /// with a composite reason, in one transaction. The sweep is a single
    /// bulk conditional update; already-terminal applications are
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing, the reason is blank, the
    /// event is already terminal, or it was modified concurrently.
    pub fn cancel_event(&mut self, event_id: i64, reason: &str) -> Result<Event, AdmissionError> {
        let (event, swept) = self.store.transaction(|store| {
            let mut event = store.load_event(event_id)?;
            event.cancel(reason)?;
            store.save_event(&mut event)?;
            // Every slot-consuming application is being swept below.
            store.reset_participant_count(event_id)?;
            event.participant_count = 0;
            let composite = format!("Event cancelled: {}", reason.trim());
            let swept = store.cancel_open_applications(event_id, &composite)?;
            Ok((event, swept))
        })?;
        info!(event_id, swept, "event cancelled; open applications swept");
        self.dispatch(&AdmissionNotice::EventCancelled {
            event_id,
            applications_cancelled: swept,
        });
        Ok(event)
    }

    // ========================================================================
    // Application lifecycle
    // ========================================================================

    /// Creates a draft application for an event.
    ///
    /// Capacity is not checked here: submitting and being waitlisted are
    /// both legitimate against a full event. Duplicate (event, email)
    /// pairs are refused while any non-withdrawn application exists.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateApplication` for an email collision, `NotFound`
    /// for an unknown event, or a store error.
    pub fn create_application(
        &mut self,
        draft: ApplicationDraft,
    ) -> Result<Application, AdmissionError> {
        self.store.transaction(|store| {
            let event = store.load_event(draft.event_id)?;
            if store.active_application_exists(event.event_id, &draft.email)? {
                return Err(AdmissionError::DomainViolation(
                    DomainError::DuplicateApplication {
                        event_id: event.event_id,
                        email: draft.email.value().to_string(),
                    },
                ));
            }
            store.insert_application(draft)
        })
    }

    /// Submits a draft application and counts it against the event.
    ///
    /// The counter bump is a single atomic increment so two submissions in
    /// the same instant both count.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is missing, not in Draft,
    /// missing applicant info, or was modified concurrently.
    pub fn submit_application(
        &mut self,
        application_id: i64,
    ) -> Result<Application, AdmissionError> {
        let now = OffsetDateTime::now_utc();
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            application.submit(now)?;
            store.save_application(&mut application)?;
            store.adjust_application_count(application.event_id, 1)?;
            Ok(application)
        })
    }

    /// Records a review outcome. The score is an opaque policy input; the
    /// engine never acts on it.
    ///
    /// # Errors
    ///
    /// Returns an error unless the application is Submitted or
    /// `UnderReview`.
    pub fn review_application(
        &mut self,
        application_id: i64,
        score: i32,
        notes: Option<String>,
        reviewed_by: i64,
    ) -> Result<Application, AdmissionError> {
        let now = OffsetDateTime::now_utc();
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            application.record_review(score, notes, reviewed_by, now)?;
            store.save_application(&mut application)?;
            Ok(application)
        })
    }

    /// Accepts an application from Submitted, `UnderReview`, or
    /// Waitlisted.
    ///
    /// Deliberately no capacity check — overbooking is a caller policy
    /// decision; use `Event::ensure_capacity` first to refuse it. If the
    /// application held a waitlist rank the ranker closes the gap it
    /// leaves.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is missing, in a state that
    /// cannot be accepted, or was modified concurrently.
    pub fn accept_application(
        &mut self,
        application_id: i64,
    ) -> Result<Application, AdmissionError> {
        let application = self
            .store
            .transaction(|store| Self::accept_in_store(store, application_id))?;
        self.dispatch(&AdmissionNotice::ApplicationAccepted {
            event_id: application.event_id,
            application_id: application.application_id,
        });
        Ok(application)
    }

    /// Rejects an application with a required reason, vacating its slot or
    /// waitlist rank if it held one.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is blank or the application is
    /// Confirmed, Cancelled, or otherwise terminal.
    pub fn reject_application(
        &mut self,
        application_id: i64,
        reason: &str,
    ) -> Result<Application, AdmissionError> {
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            let vacated = application.waitlist_position;
            let consumed_slot = application.status.consumes_slot();
            application.reject(reason)?;
            store.save_application(&mut application)?;
            if let Some(position) = vacated {
                store.close_waitlist_gap(application.event_id, position)?;
            }
            if consumed_slot {
                store.adjust_participant_count(application.event_id, -1)?;
            }
            Ok(application)
        })
    }

    /// Places a submitted or in-review application on the waitlist.
    ///
    /// With no requested position it appends at the tail (`max + 1`) and
    /// nothing is renumbered. An explicit position within `1..=max + 1`
    /// opens a gap first, shifting later entries down by one.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range position, an application not
    /// in Submitted/`UnderReview`, or a concurrent modification.
    pub fn waitlist_application(
        &mut self,
        application_id: i64,
        requested_position: Option<u32>,
    ) -> Result<Application, AdmissionError> {
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            let current_max = store.max_waitlist_position(application.event_id)?;
            let position = match requested_position {
                None => current_max + 1,
                Some(requested) => {
                    if requested == 0 || requested > current_max + 1 {
                        return Err(AdmissionError::DomainViolation(
                            DomainError::InvalidWaitlistPosition {
                                requested,
                                max_allowed: current_max + 1,
                            },
                        ));
                    }
                    requested
                }
            };
            application.waitlist(position)?;
            if position <= current_max {
                store.open_waitlist_gap(application.event_id, position)?;
            }
            store.save_application(&mut application)?;
            Ok(application)
        })
    }

    /// Confirms an accepted application.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is missing, not Accepted, or
    /// was modified concurrently.
    pub fn confirm_application(
        &mut self,
        application_id: i64,
    ) -> Result<Application, AdmissionError> {
        let now = OffsetDateTime::now_utc();
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            application.confirm(now)?;
            store.save_application(&mut application)?;
            Ok(application)
        })
    }

    /// Cancels an accepted or confirmed application, freeing its slot and
    /// removing it from the event's application count.
    ///
    /// Freed capacity is not refilled here; call
    /// `process_waitlist_promotion` once per freed slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is blank or the application is not
    /// Accepted/Confirmed.
    pub fn cancel_application(
        &mut self,
        application_id: i64,
        reason: &str,
    ) -> Result<Application, AdmissionError> {
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            application.cancel(reason)?;
            store.save_application(&mut application)?;
            store.adjust_participant_count(application.event_id, -1)?;
            store.adjust_application_count(application.event_id, -1)?;
            Ok(application)
        })
    }

    /// Withdraws an application from any non-terminal state
    /// (applicant-initiated), undoing whatever it currently holds: its
    /// waitlist rank, its capacity slot, and its place in the application
    /// count.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is already terminal or was
    /// modified concurrently.
    pub fn withdraw_application(
        &mut self,
        application_id: i64,
    ) -> Result<Application, AdmissionError> {
        self.store.transaction(|store| {
            let mut application = store.load_application(application_id)?;
            let previous = application.status;
            let vacated = application.waitlist_position;
            application.withdraw()?;
            store.save_application(&mut application)?;
            if let Some(position) = vacated {
                store.close_waitlist_gap(application.event_id, position)?;
            }
            if previous.consumes_slot() {
                store.adjust_participant_count(application.event_id, -1)?;
            }
            if previous != ApplicationStatus::Draft {
                store.adjust_application_count(application.event_id, -1)?;
            }
            Ok(application)
        })
    }

    // ========================================================================
    // Waitlist promotion
    // ========================================================================

    /// Promotes at most one applicant off the waitlist into freed
    /// capacity.
    ///
    /// No-op (returning `None`) if the event has no spare capacity or the
    /// waitlist is empty. Otherwise exactly the position-1 application is
    /// accepted — strict FIFO — and the remainder renumbered. Callers that
    /// free several slots at once invoke this once per slot so each
    /// promotion stays an auditable, discrete step.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing or a write loses a
    /// version race.
    pub fn process_waitlist_promotion(
        &mut self,
        event_id: i64,
    ) -> Result<Option<Application>, AdmissionError> {
        let promoted = self.store.transaction(|store| {
            let event = store.load_event(event_id)?;
            if !event.has_capacity() {
                return Ok(None);
            }
            let Some(head) = store.waitlist_head(event_id)? else {
                return Ok(None);
            };
            let application = Self::accept_in_store(store, head.application_id)?;
            Ok(Some(application))
        })?;
        if let Some(application) = &promoted {
            info!(
                event_id,
                application_id = application.application_id,
                "waitlist head promoted into freed capacity"
            );
            self.dispatch(&AdmissionNotice::ApplicationPromoted {
                event_id,
                application_id: application.application_id,
                from_position: 1,
            });
        }
        Ok(promoted)
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Loads an event.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such event exists.
    pub fn event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        self.store.load_event(event_id)
    }

    /// Loads an application.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such application exists.
    pub fn application(&mut self, application_id: i64) -> Result<Application, AdmissionError> {
        self.store.load_application(application_id)
    }

    /// Returns an event's waitlist ordered by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn waitlist(&mut self, event_id: i64) -> Result<Vec<Application>, AdmissionError> {
        self.store.waitlisted_applications(event_id)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Shared acceptance path for direct accepts and promotions: move the
    /// aggregate, close any waitlist gap it leaves, take a capacity slot.
    fn accept_in_store(
        store: &mut S,
        application_id: i64,
    ) -> Result<Application, AdmissionError> {
        let mut application = store.load_application(application_id)?;
        let vacated = application.waitlist_position;
        application.accept()?;
        store.save_application(&mut application)?;
        if let Some(position) = vacated {
            store.close_waitlist_gap(application.event_id, position)?;
        }
        store.adjust_participant_count(application.event_id, 1)?;
        Ok(application)
    }

    /// Dispatches a notice to every subscriber. Failures are logged and
    /// dropped; the transition is already committed.
    fn dispatch(&self, notice: &AdmissionNotice) {
        for notifier in &self.notifiers {
            if let Err(err) = notifier.notify(notice) {
                warn!(error = %err, "notification dispatch failed");
            }
        }
    }
}
