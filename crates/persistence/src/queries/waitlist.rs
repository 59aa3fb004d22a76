// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Waitlist ranking queries.
//!
//! The waitlist of an event is the set of its Waitlisted applications,
//! ordered by the dense 1-based `waitlist_position` column. Only the
//! ranker mutations in `mutations::waitlist` ever renumber it.

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use muster_domain::{Application, ApplicationStatus};

backend_fn! {

/// Returns the waitlisted application at position 1, if any.
pub fn waitlist_head(
    conn: &mut _,
    event_id: i64,
) -> Result<Option<Application>, PersistenceError> {
    let row: Option<ApplicationRow> = applications::table
        .filter(applications::event_id.eq(event_id))
        .filter(applications::status.eq(ApplicationStatus::Waitlisted.as_str()))
        .filter(applications::waitlist_position.eq(1))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?;
    row.map(Application::try_from).transpose()
}

}

backend_fn! {

/// Returns the largest waitlist position for an event (0 if the waitlist
/// is empty).
pub fn max_waitlist_position(conn: &mut _, event_id: i64) -> Result<u32, PersistenceError> {
    let max: Option<i32> = applications::table
        .filter(applications::event_id.eq(event_id))
        .filter(applications::status.eq(ApplicationStatus::Waitlisted.as_str()))
        .select(diesel::dsl::max(applications::waitlist_position))
        .first(conn)?;
    max.map_or(Ok(0), |m| {
        u32::try_from(m).map_err(|_| {
            PersistenceError::MappingError(format!("waitlist_position is negative: {m}"))
        })
    })
}

}

backend_fn! {

/// Returns an event's waitlisted applications ordered by position.
pub fn waitlisted_applications(
    conn: &mut _,
    event_id: i64,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::event_id.eq(event_id))
        .filter(applications::status.eq(ApplicationStatus::Waitlisted.as_str()))
        .order(applications::waitlist_position.asc())
        .select(ApplicationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Application::try_from).collect()
}

}
