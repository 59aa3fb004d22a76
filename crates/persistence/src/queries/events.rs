// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event aggregate queries.

use crate::data_models::EventRow;
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use muster_domain::Event;

backend_fn! {

/// Loads an event aggregate by id.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn get_event(conn: &mut _, event_id: i64) -> Result<Event, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn)
        .optional()?;
    Event::try_from(row.ok_or(PersistenceError::EventNotFound(event_id))?)
}

}

backend_fn! {

/// Returns true if an event row exists.
///
/// Used to tell a stale version apart from a missing row when a
/// version-checked update matches nothing.
pub fn event_exists(conn: &mut _, event_id: i64) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        events::table.filter(events::event_id.eq(event_id)),
    ))
    .get_result(conn)?)
}

}
