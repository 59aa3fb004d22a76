// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    accepted_application, application_draft, coordinator, published_event, submitted_application,
    FailingNotifier, RecordingNotifier,
};
use crate::{AdmissionError, AdmissionNotice};
use muster_domain::{ApplicationStatus, DomainError};

#[test]
fn create_application_assigns_number_and_starts_in_draft() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));

    let application = coordinator
        .create_application(application_draft(event.event_id, "pat@example.org"))
        .expect("create application");

    assert_eq!(application.status, ApplicationStatus::Draft);
    assert_eq!(application.application_number.value(), "APP-0001-00001");
    assert_eq!(application.email.value(), "pat@example.org");
    assert!(application.submitted_at.is_none());

    // Draft applications do not count against the event yet.
    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.application_count, 0);
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    submitted_application(&mut coordinator, event.event_id, "Pat@Example.org");

    let err = coordinator
        .create_application(application_draft(event.event_id, "pat@example.org"))
        .expect_err("duplicate email must be refused");
    assert!(matches!(
        err,
        AdmissionError::DomainViolation(DomainError::DuplicateApplication { .. })
    ));
}

#[test]
fn withdrawn_application_frees_the_email_for_reuse() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let first = submitted_application(&mut coordinator, event.event_id, "pat@example.org");
    coordinator
        .withdraw_application(first.application_id)
        .expect("withdraw");

    coordinator
        .create_application(application_draft(event.event_id, "pat@example.org"))
        .expect("withdrawn application no longer blocks the email");
}

#[test]
fn two_submissions_both_count() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    submitted_application(&mut coordinator, event.event_id, "pat@example.org");
    submitted_application(&mut coordinator, event.event_id, "lee@example.org");

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.application_count, 2);
}

#[test]
fn review_records_outcome_and_moves_under_review() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = submitted_application(&mut coordinator, event.event_id, "pat@example.org");

    let application = coordinator
        .review_application(
            application.application_id,
            87,
            Some(String::from("strong essay")),
            7,
        )
        .expect("review");

    assert_eq!(application.status, ApplicationStatus::UnderReview);
    assert_eq!(application.review_score, Some(87));
    assert_eq!(application.reviewed_by, Some(7));
    assert!(application.reviewed_at.is_some());
}

#[test]
fn accept_takes_a_capacity_slot() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = accepted_application(&mut coordinator, event.event_id, "pat@example.org");

    assert_eq!(application.status, ApplicationStatus::Accepted);
    assert!(application.waitlist_position.is_none());

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.participant_count, 1);
    assert_eq!(event.application_count, 1);
}

#[test]
fn direct_accept_may_overbook() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(1));
    accepted_application(&mut coordinator, event.event_id, "pat@example.org");
    accepted_application(&mut coordinator, event.event_id, "lee@example.org");

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.participant_count, 2);
    assert!(!event.has_capacity());
}

#[test]
fn reject_requires_a_reason() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = submitted_application(&mut coordinator, event.event_id, "pat@example.org");

    let err = coordinator
        .reject_application(application.application_id, "   ")
        .expect_err("blank reason must be refused");
    assert!(matches!(
        err,
        AdmissionError::DomainViolation(DomainError::BlankReason("rejection reason"))
    ));

    let reloaded = coordinator
        .application(application.application_id)
        .expect("reload");
    assert_eq!(reloaded.status, ApplicationStatus::Submitted);
}

#[test]
fn rejecting_an_accepted_application_frees_its_slot() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = accepted_application(&mut coordinator, event.event_id, "pat@example.org");

    let application = coordinator
        .reject_application(application.application_id, "payment never arrived")
        .expect("reject");
    assert_eq!(application.status, ApplicationStatus::Rejected);
    assert_eq!(
        application.rejection_reason.as_deref(),
        Some("payment never arrived")
    );

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.participant_count, 0);
    assert_eq!(event.application_count, 1);
}

#[test]
fn confirm_then_cancel_releases_slot_and_application_count() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = accepted_application(&mut coordinator, event.event_id, "pat@example.org");

    let application = coordinator
        .confirm_application(application.application_id)
        .expect("confirm");
    assert_eq!(application.status, ApplicationStatus::Confirmed);
    assert!(application.confirmed_at.is_some());

    let application = coordinator
        .cancel_application(application.application_id, "schedule conflict")
        .expect("cancel");
    assert_eq!(application.status, ApplicationStatus::Cancelled);

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.participant_count, 0);
    assert_eq!(event.application_count, 0);
}

#[test]
fn cancel_is_only_legal_for_accepted_or_confirmed() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = submitted_application(&mut coordinator, event.event_id, "pat@example.org");

    let err = coordinator
        .cancel_application(application.application_id, "changed my mind")
        .expect_err("submitted applications withdraw, not cancel");
    assert!(matches!(
        err,
        AdmissionError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn withdrawing_a_submitted_application_releases_its_count() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = submitted_application(&mut coordinator, event.event_id, "pat@example.org");

    let application = coordinator
        .withdraw_application(application.application_id)
        .expect("withdraw");
    assert_eq!(application.status, ApplicationStatus::Withdrawn);

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.application_count, 0);
    assert_eq!(event.participant_count, 0);
}

#[test]
fn withdrawing_a_draft_leaves_counters_untouched() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = coordinator
        .create_application(application_draft(event.event_id, "pat@example.org"))
        .expect("create application");

    coordinator
        .withdraw_application(application.application_id)
        .expect("withdraw draft");

    let event = coordinator.event(event.event_id).expect("reload");
    assert_eq!(event.application_count, 0);
}

#[test]
fn withdrawn_application_refuses_further_transitions() {
    let mut coordinator = coordinator();
    let event = published_event(&mut coordinator, Some(10));
    let application = submitted_application(&mut coordinator, event.event_id, "pat@example.org");
    let withdrawn = coordinator
        .withdraw_application(application.application_id)
        .expect("withdraw");

    let err = coordinator
        .accept_application(application.application_id)
        .expect_err("withdrawn is terminal");
    assert!(matches!(
        err,
        AdmissionError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));

    let reloaded = coordinator
        .application(application.application_id)
        .expect("reload");
    assert_eq!(reloaded, withdrawn);
}

#[test]
fn acceptance_notifies_subscribers() {
    let mut coordinator = coordinator();
    let recorder = RecordingNotifier::default();
    coordinator.subscribe(Box::new(recorder.clone()));

    let event = published_event(&mut coordinator, Some(10));
    let application = accepted_application(&mut coordinator, event.event_id, "pat@example.org");

    assert_eq!(
        recorder.received(),
        vec![AdmissionNotice::ApplicationAccepted {
            event_id: event.event_id,
            application_id: application.application_id,
        }]
    );
}

#[test]
fn failed_notification_never_blocks_the_transition() {
    let mut coordinator = coordinator();
    coordinator.subscribe(Box::new(FailingNotifier));
    let recorder = RecordingNotifier::default();
    coordinator.subscribe(Box::new(recorder.clone()));

    let event = published_event(&mut coordinator, Some(10));
    let application = accepted_application(&mut coordinator, event.event_id, "pat@example.org");

    // The transition committed and later subscribers still heard about it.
    let reloaded = coordinator
        .application(application.application_id)
        .expect("reload");
    assert_eq!(reloaded.status, ApplicationStatus::Accepted);
    assert_eq!(recorder.received().len(), 1);
}
