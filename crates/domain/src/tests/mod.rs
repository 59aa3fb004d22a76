// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{Application, ApplicationDraft, ApplicationNumber, Email, Event, EventDraft, Session};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_session() -> Session {
    Session::new(datetime!(2026-06-01 10:00 UTC), datetime!(2026-06-01 12:00 UTC))
        .expect("valid session window")
}

/// A draft event that satisfies every publish precondition.
pub fn publishable_draft() -> EventDraft {
    let mut draft = EventDraft::new("Intro to Orienteering");
    draft.location = Some(String::from("North Hall"));
    draft.sessions = vec![test_session()];
    draft
}

pub fn publishable_event(event_id: i64) -> Event {
    Event::from_draft(event_id, publishable_draft()).expect("valid draft")
}

pub fn test_application(application_id: i64, event_id: i64, email: &str) -> Application {
    Application::from_draft(
        application_id,
        ApplicationNumber::new(format!("APP-{event_id:04}-{application_id:05}")),
        ApplicationDraft {
            event_id,
            participant_id: None,
            applicant_name: String::from("Avery Doe"),
            email: Email::new(email).expect("valid email"),
        },
    )
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-05-01 09:00 UTC)
}
