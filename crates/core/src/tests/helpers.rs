// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures: an in-memory store that honors every store contract
//! (version-checked saves, counter-preserving full saves, bulk gap
//! shifts), plus notifier doubles and aggregate builders.

use crate::error::AdmissionError;
use crate::notice::{AdmissionNotice, AdmissionNotifier, NotifyError};
use crate::store::AdmissionStore;
use crate::AdmissionCoordinator;
use muster_domain::{
    Application, ApplicationDraft, ApplicationNumber, ApplicationStatus, Email, Event, EventDraft,
    Session,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use time::macros::datetime;

/// In-memory admission store.
///
/// Transactions snapshot the whole store and restore it on error, so a
/// failed coordinator operation leaves no trace, just like the SQL
/// implementation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    events: BTreeMap<i64, Event>,
    applications: BTreeMap<i64, Application>,
    next_event_id: i64,
    next_application_id: i64,
}

impl AdmissionStore for MemoryStore {
    fn transaction<R, F>(&mut self, f: F) -> Result<R, AdmissionError>
    where
        F: FnOnce(&mut Self) -> Result<R, AdmissionError>,
    {
        let snapshot = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                *self = snapshot;
                Err(err)
            }
        }
    }

    fn insert_event(&mut self, draft: EventDraft) -> Result<Event, AdmissionError> {
        self.next_event_id += 1;
        let event = Event::from_draft(self.next_event_id, draft)?;
        self.events.insert(event.event_id, event.clone());
        Ok(event)
    }

    fn load_event(&mut self, event_id: i64) -> Result<Event, AdmissionError> {
        self.events
            .get(&event_id)
            .cloned()
            .ok_or(AdmissionError::NotFound {
                entity: "event",
                id: event_id,
            })
    }

    fn save_event(&mut self, event: &mut Event) -> Result<(), AdmissionError> {
        let stored = self
            .events
            .get_mut(&event.event_id)
            .ok_or(AdmissionError::NotFound {
                entity: "event",
                id: event.event_id,
            })?;
        if stored.version != event.version {
            return Err(AdmissionError::ConcurrentModification {
                entity: "event",
                id: event.event_id,
            });
        }
        // Counter columns are excluded from the full-row save.
        let application_count = stored.application_count;
        let participant_count = stored.participant_count;
        *stored = event.clone();
        stored.application_count = application_count;
        stored.participant_count = participant_count;
        stored.version += 1;
        event.version += 1;
        Ok(())
    }

    fn reset_participant_count(&mut self, event_id: i64) -> Result<(), AdmissionError> {
        let stored = self
            .events
            .get_mut(&event_id)
            .ok_or(AdmissionError::NotFound {
                entity: "event",
                id: event_id,
            })?;
        stored.participant_count = 0;
        Ok(())
    }

    fn adjust_application_count(
        &mut self,
        event_id: i64,
        delta: i32,
    ) -> Result<(), AdmissionError> {
        let stored = self
            .events
            .get_mut(&event_id)
            .ok_or(AdmissionError::NotFound {
                entity: "event",
                id: event_id,
            })?;
        stored.application_count = stored.application_count.saturating_add_signed(delta);
        Ok(())
    }

    fn adjust_participant_count(
        &mut self,
        event_id: i64,
        delta: i32,
    ) -> Result<(), AdmissionError> {
        let stored = self
            .events
            .get_mut(&event_id)
            .ok_or(AdmissionError::NotFound {
                entity: "event",
                id: event_id,
            })?;
        stored.participant_count = stored.participant_count.saturating_add_signed(delta);
        Ok(())
    }

    fn insert_application(
        &mut self,
        draft: ApplicationDraft,
    ) -> Result<Application, AdmissionError> {
        self.next_application_id += 1;
        let number = ApplicationNumber::new(format!(
            "APP-{:04}-{:05}",
            draft.event_id, self.next_application_id
        ));
        let application = Application::from_draft(self.next_application_id, number, draft);
        self.applications
            .insert(application.application_id, application.clone());
        Ok(application)
    }

    fn load_application(&mut self, application_id: i64) -> Result<Application, AdmissionError> {
        self.applications
            .get(&application_id)
            .cloned()
            .ok_or(AdmissionError::NotFound {
                entity: "application",
                id: application_id,
            })
    }

    fn save_application(&mut self, application: &mut Application) -> Result<(), AdmissionError> {
        let stored = self
            .applications
            .get_mut(&application.application_id)
            .ok_or(AdmissionError::NotFound {
                entity: "application",
                id: application.application_id,
            })?;
        if stored.version != application.version {
            return Err(AdmissionError::ConcurrentModification {
                entity: "application",
                id: application.application_id,
            });
        }
        *stored = application.clone();
        stored.version += 1;
        application.version += 1;
        Ok(())
    }

    fn active_application_exists(
        &mut self,
        event_id: i64,
        email: &Email,
    ) -> Result<bool, AdmissionError> {
        Ok(self.applications.values().any(|a| {
            a.event_id == event_id && a.email == *email && a.status != ApplicationStatus::Withdrawn
        }))
    }

    fn waitlist_head(&mut self, event_id: i64) -> Result<Option<Application>, AdmissionError> {
        Ok(self
            .applications
            .values()
            .find(|a| {
                a.event_id == event_id
                    && a.status == ApplicationStatus::Waitlisted
                    && a.waitlist_position == Some(1)
            })
            .cloned())
    }

    fn max_waitlist_position(&mut self, event_id: i64) -> Result<u32, AdmissionError> {
        Ok(self
            .applications
            .values()
            .filter(|a| a.event_id == event_id && a.status == ApplicationStatus::Waitlisted)
            .filter_map(|a| a.waitlist_position)
            .max()
            .unwrap_or(0))
    }

    fn waitlisted_applications(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<Application>, AdmissionError> {
        let mut entries: Vec<Application> = self
            .applications
            .values()
            .filter(|a| a.event_id == event_id && a.status == ApplicationStatus::Waitlisted)
            .cloned()
            .collect();
        entries.sort_by_key(|a| a.waitlist_position);
        Ok(entries)
    }

    fn applications_for_event(&mut self, event_id: i64) -> Result<Vec<Application>, AdmissionError> {
        Ok(self
            .applications
            .values()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect())
    }

    fn close_waitlist_gap(
        &mut self,
        event_id: i64,
        vacated_position: u32,
    ) -> Result<usize, AdmissionError> {
        let mut shifted = 0;
        for application in self.applications.values_mut().filter(|a| {
            a.event_id == event_id
                && a.status == ApplicationStatus::Waitlisted
                && a.waitlist_position.is_some_and(|p| p > vacated_position)
        }) {
            if let Some(position) = application.waitlist_position {
                application.waitlist_position = Some(position - 1);
                application.version += 1;
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    fn open_waitlist_gap(&mut self, event_id: i64, position: u32) -> Result<usize, AdmissionError> {
        let mut shifted = 0;
        for application in self.applications.values_mut().filter(|a| {
            a.event_id == event_id
                && a.status == ApplicationStatus::Waitlisted
                && a.waitlist_position.is_some_and(|p| p >= position)
        }) {
            if let Some(current) = application.waitlist_position {
                application.waitlist_position = Some(current + 1);
                application.version += 1;
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    fn cancel_open_applications(
        &mut self,
        event_id: i64,
        reason: &str,
    ) -> Result<usize, AdmissionError> {
        let mut swept = 0;
        for application in self.applications.values_mut().filter(|a| {
            a.event_id == event_id
                && a.status != ApplicationStatus::Draft
                && !a.status.is_terminal()
        }) {
            application.status = ApplicationStatus::Cancelled;
            application.cancellation_reason = Some(reason.to_string());
            application.waitlist_position = None;
            application.version += 1;
            swept += 1;
        }
        Ok(swept)
    }
}

/// Notifier that records every notice it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<AdmissionNotice>>>,
}

impl RecordingNotifier {
    pub fn received(&self) -> Vec<AdmissionNotice> {
        self.notices.lock().expect("notifier lock").clone()
    }
}

impl AdmissionNotifier for RecordingNotifier {
    fn notify(&self, notice: &AdmissionNotice) -> Result<(), NotifyError> {
        self.notices.lock().expect("notifier lock").push(notice.clone());
        Ok(())
    }
}

/// Notifier that always fails delivery.
#[derive(Debug)]
pub struct FailingNotifier;

impl AdmissionNotifier for FailingNotifier {
    fn notify(&self, _notice: &AdmissionNotice) -> Result<(), NotifyError> {
        Err("delivery refused".into())
    }
}

pub fn coordinator() -> AdmissionCoordinator<MemoryStore> {
    AdmissionCoordinator::new(MemoryStore::default())
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
    coordinator: &mut AdmissionCoordinator<MemoryStore>,
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
    coordinator: &mut AdmissionCoordinator<MemoryStore>,
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

/// Creates, submits, and accepts an application for the event.
pub fn accepted_application(
    coordinator: &mut AdmissionCoordinator<MemoryStore>,
    event_id: i64,
    email: &str,
) -> Application {
    let application = submitted_application(coordinator, event_id, email);
    coordinator
        .accept_application(application.application_id)
        .expect("accept application")
}

/// Creates, submits, and waitlists an application at the tail.
pub fn waitlisted_application(
    coordinator: &mut AdmissionCoordinator<MemoryStore>,
    event_id: i64,
    email: &str,
) -> Application {
    let application = submitted_application(coordinator, event_id, email);
    coordinator
        .waitlist_application(application.application_id, None)
        .expect("waitlist application")
}
