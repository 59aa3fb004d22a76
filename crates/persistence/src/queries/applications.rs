// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application aggregate queries.

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use muster_domain::{Application, ApplicationStatus};

backend_fn! {

/// Loads an application aggregate by id.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn get_application(
    conn: &mut _,
    application_id: i64,
) -> Result<Application, PersistenceError> {
    let row: Option<ApplicationRow> = applications::table
        .filter(applications::application_id.eq(application_id))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?;
    Application::try_from(row.ok_or(PersistenceError::ApplicationNotFound(application_id))?)
}

}

backend_fn! {

/// Returns true if an application row exists.
pub fn application_exists(
    conn: &mut _,
    application_id: i64,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        applications::table.filter(applications::application_id.eq(application_id)),
    ))
    .get_result(conn)?)
}

}

backend_fn! {

/// Returns true if a non-withdrawn application already exists for this
/// (event, email) pair.
///
/// Emails are normalized to lowercase before storage, so an equality
/// match is case-insensitive by construction.
pub fn active_application_exists(
    conn: &mut _,
    event_id: i64,
    email: &str,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        applications::table
            .filter(applications::event_id.eq(event_id))
            .filter(applications::email.eq(email))
            .filter(applications::status.ne(ApplicationStatus::Withdrawn.as_str())),
    ))
    .get_result(conn)?)
}

}

backend_fn! {

/// Returns every application for an event, ordered by id.
pub fn applications_for_event(
    conn: &mut _,
    event_id: i64,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::event_id.eq(event_id))
        .order(applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Application::try_from).collect()
}

}
