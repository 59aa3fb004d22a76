// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutations.
//!
//! Inserts assign the human-readable application number from the row id,
//! so it is unique by construction. The event-cancellation cascade is one
//! bulk conditional update over every open application of the event.

use crate::backend::PersistenceBackend;
use crate::data_models::{count_to_db, format_opt_timestamp};
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use muster_domain::{Application, ApplicationDraft, ApplicationStatus};

backend_fn! {

/// Inserts a new application row in Draft and returns the assigned id and
/// application number.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively, plus the backend trait for
/// the inserted row id.
pub fn insert_application(
    conn: &mut _,
    draft: &ApplicationDraft,
) -> Result<(i64, String), PersistenceError> {
    diesel::insert_into(applications::table)
        .values((
            applications::application_number.eq(""),
            applications::event_id.eq(draft.event_id),
            applications::participant_id.eq(draft.participant_id),
            applications::applicant_name.eq(&draft.applicant_name),
            applications::email.eq(draft.email.value()),
            applications::status.eq(ApplicationStatus::Draft.as_str()),
            applications::version.eq(0_i64),
        ))
        .execute(conn)?;
    let application_id = conn.get_last_insert_rowid()?;

    // The number embeds the row id, so it is assigned right after insert,
    // inside the same transaction.
    let application_number = format!("APP-{:04}-{:05}", draft.event_id, application_id);
    diesel::update(applications::table.filter(applications::application_id.eq(application_id)))
        .set(applications::application_number.eq(&application_number))
        .execute(conn)?;

    Ok((application_id, application_number))
}

}

backend_fn! {

/// Version-checked full-row save of an application.
///
/// Identity columns (id, number, event) are immutable and excluded.
/// Returns the number of rows matched: zero means the version was stale or
/// the row is gone; the adapter disambiguates.
pub fn save_application(
    conn: &mut _,
    application: &Application,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        applications::table
            .filter(applications::application_id.eq(application.application_id))
            .filter(applications::version.eq(application.version)),
    )
    .set((
        applications::participant_id.eq(application.participant_id),
        applications::applicant_name.eq(&application.applicant_name),
        applications::email.eq(application.email.value()),
        applications::status.eq(application.status.as_str()),
        applications::submitted_at.eq(format_opt_timestamp(application.submitted_at)?),
        applications::review_score.eq(application.review_score),
        applications::review_notes.eq(application.review_notes.as_deref()),
        applications::reviewed_by.eq(application.reviewed_by),
        applications::reviewed_at.eq(format_opt_timestamp(application.reviewed_at)?),
        applications::waitlist_position.eq(application
            .waitlist_position
            .map(|p| count_to_db(p, "waitlist_position"))
            .transpose()?),
        applications::confirmed_at.eq(format_opt_timestamp(application.confirmed_at)?),
        applications::cancellation_reason.eq(application.cancellation_reason.as_deref()),
        applications::rejection_reason.eq(application.rejection_reason.as_deref()),
        applications::version.eq(application.version + 1),
    ))
    .execute(conn)?)
}

}

backend_fn! {

/// Event-cancellation cascade: one bulk conditional update moving every
/// non-terminal, non-draft application of the event to Cancelled with the
/// supplied reason, clearing waitlist positions and bumping each touched
/// row's version.
///
/// Returns the number of applications swept.
pub fn cancel_open_applications(
    conn: &mut _,
    event_id: i64,
    reason: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        applications::table
            .filter(applications::event_id.eq(event_id))
            .filter(applications::status.ne_all([
                ApplicationStatus::Draft.as_str(),
                ApplicationStatus::Rejected.as_str(),
                ApplicationStatus::Cancelled.as_str(),
                ApplicationStatus::Withdrawn.as_str(),
            ])),
    )
    .set((
        applications::status.eq(ApplicationStatus::Cancelled.as_str()),
        applications::cancellation_reason.eq(reason),
        applications::waitlist_position.eq(None::<i32>),
        applications::version.eq(applications::version + 1),
    ))
    .execute(conn)?)
}

}
