// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Waitlist ranker mutations.
//!
//! Each shift is one bulk conditional update over the event's Waitlisted
//! rows, never a per-row fetch-mutate-save loop. Touched rows get their
//! version bumped so concurrent single-row saves of a shifted application
//! fail the version check instead of resurrecting its old rank.

use crate::data_models::count_to_db;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use muster_domain::ApplicationStatus;

backend_fn! {

/// Closes the gap left at `vacated_position`: every waitlisted application
/// of the event ranked below it moves up by one.
///
/// Returns the number of rows shifted.
pub fn close_waitlist_gap(
    conn: &mut _,
    event_id: i64,
    vacated_position: u32,
) -> Result<usize, PersistenceError> {
    let vacated = count_to_db(vacated_position, "waitlist_position")?;
    Ok(diesel::update(
        applications::table
            .filter(applications::event_id.eq(event_id))
            .filter(applications::status.eq(ApplicationStatus::Waitlisted.as_str()))
            .filter(applications::waitlist_position.gt(vacated)),
    )
    .set((
        applications::waitlist_position.eq(applications::waitlist_position - 1),
        applications::version.eq(applications::version + 1),
    ))
    .execute(conn)?)
}

}

backend_fn! {

/// Opens a gap at `position`: every waitlisted application of the event at
/// or below it moves down by one, making room for an explicit insertion.
///
/// Returns the number of rows shifted.
pub fn open_waitlist_gap(
    conn: &mut _,
    event_id: i64,
    position: u32,
) -> Result<usize, PersistenceError> {
    let position = count_to_db(position, "waitlist_position")?;
    Ok(diesel::update(
        applications::table
            .filter(applications::event_id.eq(event_id))
            .filter(applications::status.eq(ApplicationStatus::Waitlisted.as_str()))
            .filter(applications::waitlist_position.ge(position)),
    )
    .set((
        applications::waitlist_position.eq(applications::waitlist_position + 1),
        applications::version.eq(applications::version + 1),
    ))
    .execute(conn)?)
}

}
