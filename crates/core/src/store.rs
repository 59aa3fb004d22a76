// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence collaborator contract.
//!
//! The coordinator never talks to a database directly; it drives these
//! primitives. Three write disciplines matter:
//!
//! - **Version-checked saves**: `save_event`/`save_application` write only
//!   if the supplied aggregate's `version` still matches the row, then bump
//!   both. A mismatch fails with `ConcurrentModification` and must not
//!   write anything.
//! - **Atomic counters**: the two event counters are adjusted exclusively
//!   through `adjust_*` (native `SET c = c + delta`), never by the
//!   full-row save. Implementations must exclude the counter columns from
//!   `save_event` so a full save cannot clobber a concurrent increment.
//! - **Bulk conditional updates**: gap open/close and the cancellation
//!   cascade are each one conditional statement over many rows, bumping
//!   each touched row's version, never a per-row fetch-mutate-save loop.

use crate::error::AdmissionError;
use muster_domain::{Application, ApplicationDraft, Email, Event, EventDraft};

/// Store primitives required by the admission coordinator.
pub trait AdmissionStore {
    /// Runs `f` inside a single store transaction.
    ///
    /// Every coordinator operation uses this as its atomicity boundary: the
    /// operation either commits completely or leaves no trace.
    ///
    /// # Errors
    ///
    /// Propagates the closure's error after rolling back, or a store error
    /// if the transaction itself cannot commit.
    fn transaction<R, F>(&mut self, f: F) -> Result<R, AdmissionError>
    where
        F: FnOnce(&mut Self) -> Result<R, AdmissionError>;

    /// Inserts a new event row and returns the materialized aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the insert fails.
    fn insert_event(&mut self, draft: EventDraft) -> Result<Event, AdmissionError>;

    /// Loads an event by id.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such event exists.
    fn load_event(&mut self, event_id: i64) -> Result<Event, AdmissionError>;

    /// Version-checked write of an event (counter columns excluded).
    ///
    /// Bumps `event.version` on success so the caller's copy stays
    /// current.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::ConcurrentModification` if the row version
    /// no longer matches.
    fn save_event(&mut self, event: &mut Event) -> Result<(), AdmissionError>;

    /// Sets an event's participant count back to zero.
    ///
    /// Used by the event-cancellation cascade, where every slot-consuming
    /// application is being swept in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such event exists.
    fn reset_participant_count(&mut self, event_id: i64) -> Result<(), AdmissionError>;

    /// Atomically adjusts an event's application counter.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such event exists.
    fn adjust_application_count(&mut self, event_id: i64, delta: i32)
    -> Result<(), AdmissionError>;

    /// Atomically adjusts an event's participant counter.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such event exists.
    fn adjust_participant_count(&mut self, event_id: i64, delta: i32)
    -> Result<(), AdmissionError>;

    /// Inserts a new application row, assigning its id and immutable
    /// application number, and returns the materialized aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_application(&mut self, draft: ApplicationDraft)
    -> Result<Application, AdmissionError>;

    /// Loads an application by id.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::NotFound` if no such application exists.
    fn load_application(&mut self, application_id: i64) -> Result<Application, AdmissionError>;

    /// Version-checked write of an application.
    ///
    /// Bumps `application.version` on success.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionError::ConcurrentModification` if the row version
    /// no longer matches.
    fn save_application(&mut self, application: &mut Application) -> Result<(), AdmissionError>;

    /// Returns true if a non-withdrawn application already exists for this
    /// (event, email) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn active_application_exists(
        &mut self,
        event_id: i64,
        email: &Email,
    ) -> Result<bool, AdmissionError>;

    /// Returns the waitlisted application at position 1, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn waitlist_head(&mut self, event_id: i64) -> Result<Option<Application>, AdmissionError>;

    /// Returns the largest waitlist position for the event (0 if the
    /// waitlist is empty).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn max_waitlist_position(&mut self, event_id: i64) -> Result<u32, AdmissionError>;

    /// Returns the event's waitlisted applications ordered by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn waitlisted_applications(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<Application>, AdmissionError>;

    /// Returns every application for the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn applications_for_event(&mut self, event_id: i64) -> Result<Vec<Application>, AdmissionError>;

    /// Waitlist ranker primitive: decrements the position of every
    /// waitlisted application of this event ranked below the vacated
    /// position, keeping the ranking dense. One bulk conditional update.
    ///
    /// Returns the number of rows shifted.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn close_waitlist_gap(
        &mut self,
        event_id: i64,
        vacated_position: u32,
    ) -> Result<usize, AdmissionError>;

    /// Waitlist ranker primitive: increments the position of every
    /// waitlisted application at or below `position`, making room for an
    /// explicit insertion. One bulk conditional update.
    ///
    /// Returns the number of rows shifted.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn open_waitlist_gap(&mut self, event_id: i64, position: u32) -> Result<usize, AdmissionError>;

    /// Event-cancellation cascade: moves every non-terminal, non-draft
    /// application of this event to Cancelled with the supplied reason and
    /// clears waitlist positions, in one bulk conditional update. Already
    /// terminal applications are untouched.
    ///
    /// Returns the number of applications swept.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn cancel_open_applications(
        &mut self,
        event_id: i64,
        reason: &str,
    ) -> Result<usize, AdmissionError>;
}
