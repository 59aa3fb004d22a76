// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Persistence layer tests.
//!
//! Standard tests drive the full coordinator stack over an in-memory
//! `SQLite` database. `MySQL` validation tests live in
//! `backend_validation_tests` and are `#[ignore]` by default.

mod backend_validation_tests;

use crate::Persistence;
use muster::AdmissionCoordinator;
use muster_domain::{Application, ApplicationDraft, Email, Event, EventDraft, Session};
use time::macros::datetime;

pub fn coordinator() -> AdmissionCoordinator<Persistence> {
    AdmissionCoordinator::new(Persistence::new_in_memory().expect("in-memory database"))
}

pub fn test_session() -> Session {
    Session::new(datetime!(2026-06-01 10:00 UTC), datetime!(2026-06-01 12:00 UTC))
        .expect("valid session window")
}

/// A draft that satisfies every publish precondition.
pub fn publishable_draft(max_participants: Option<u32>) -> EventDraft {
    let mut draft = EventDraft::new("Spring Field Day");
    draft.location = Some(String::from("River Pavilion"));
    draft.sessions = vec![test_session()];
    draft.max_participants = max_participants;
    draft
}

/// Creates and publishes an event with the given capacity.
pub fn published_event(
    coordinator: &mut AdmissionCoordinator<Persistence>,
    max_participants: Option<u32>,
) -> Event {
    let event = coordinator
        .create_event(publishable_draft(max_participants))
        .expect("create event");
    coordinator
        .publish_event(event.event_id)
        .expect("publish event")
}

pub fn application_draft(event_id: i64, email: &str) -> ApplicationDraft {
    ApplicationDraft {
        event_id,
        participant_id: None,
        applicant_name: String::from("Avery Doe"),
        email: Email::new(email).expect("valid email"),
    }
}

/// Creates and submits an application for the event.
pub fn submitted_application(
    coordinator: &mut AdmissionCoordinator<Persistence>,
    event_id: i64,
    email: &str,
) -> Application {
    let application = coordinator
        .create_application(application_draft(event_id, email))
        .expect("create application");
    coordinator
        .submit_application(application.application_id)
        .expect("submit application")
}

/// Creates, submits, and waitlists an application at the tail.
pub fn waitlisted_application(
    coordinator: &mut AdmissionCoordinator<Persistence>,
    event_id: i64,
    email: &str,
) -> Application {
    let application = submitted_application(coordinator, event_id, email);
    coordinator
        .waitlist_application(application.application_id, None)
        .expect("waitlist application")
}
