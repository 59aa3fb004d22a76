// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event mutations.
//!
//! The full-row save is version-checked and deliberately excludes the two
//! counter columns; counters move only through the atomic adjust
//! statements, which never touch the version. This keeps a concurrent
//! counter increment and a full save from clobbering each other.

use crate::backend::PersistenceBackend;
use crate::data_models::{count_to_db, format_opt_timestamp};
use crate::diesel_schema::events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use muster_domain::Event;

backend_fn! {

/// Inserts a new event row and returns the assigned id.
///
/// Counters start at zero and the version at zero regardless of what the
/// aggregate carries.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively, plus the backend trait for
/// the inserted row id.
pub fn insert_event(conn: &mut _, event: &Event) -> Result<i64, PersistenceError> {
    let sessions_json = serde_json::to_string(&event.sessions)?;
    diesel::insert_into(events::table)
        .values((
            events::title.eq(&event.title),
            events::description.eq(event.description.as_deref()),
            events::location.eq(event.location.as_deref()),
            events::status.eq(event.status.as_str()),
            events::max_participants.eq(event
                .max_participants
                .map(|m| count_to_db(m, "max_participants"))
                .transpose()?),
            events::application_count.eq(0),
            events::participant_count.eq(0),
            events::sessions_json.eq(sessions_json),
            events::registration_opens_at.eq(format_opt_timestamp(event.registration_opens_at)?),
            events::registration_closes_at.eq(format_opt_timestamp(event.registration_closes_at)?),
            events::application_deadline.eq(format_opt_timestamp(event.application_deadline)?),
            events::published_at.eq(format_opt_timestamp(event.published_at)?),
            events::cancellation_reason.eq(event.cancellation_reason.as_deref()),
            events::version.eq(0_i64),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Version-checked full-row save, counter columns excluded.
///
/// Returns the number of rows matched: zero means the version was stale or
/// the row is gone; the adapter disambiguates.
pub fn save_event(conn: &mut _, event: &Event) -> Result<usize, PersistenceError> {
    let sessions_json = serde_json::to_string(&event.sessions)?;
    Ok(diesel::update(
        events::table
            .filter(events::event_id.eq(event.event_id))
            .filter(events::version.eq(event.version)),
    )
    .set((
        events::title.eq(&event.title),
        events::description.eq(event.description.as_deref()),
        events::location.eq(event.location.as_deref()),
        events::status.eq(event.status.as_str()),
        events::max_participants.eq(event
            .max_participants
            .map(|m| count_to_db(m, "max_participants"))
            .transpose()?),
        events::sessions_json.eq(sessions_json),
        events::registration_opens_at.eq(format_opt_timestamp(event.registration_opens_at)?),
        events::registration_closes_at.eq(format_opt_timestamp(event.registration_closes_at)?),
        events::application_deadline.eq(format_opt_timestamp(event.application_deadline)?),
        events::published_at.eq(format_opt_timestamp(event.published_at)?),
        events::cancellation_reason.eq(event.cancellation_reason.as_deref()),
        events::version.eq(event.version + 1),
    ))
    .execute(conn)?)
}

}

backend_fn! {

/// Sets an event's participant count back to zero.
///
/// Returns the number of rows matched (zero means no such event).
pub fn reset_participant_count(conn: &mut _, event_id: i64) -> Result<usize, PersistenceError> {
    Ok(
        diesel::update(events::table.filter(events::event_id.eq(event_id)))
            .set(events::participant_count.eq(0))
            .execute(conn)?,
    )
}

}

backend_fn! {

/// Atomically adjusts the application counter with a native increment.
///
/// Returns the number of rows matched (zero means no such event).
pub fn adjust_application_count(
    conn: &mut _,
    event_id: i64,
    delta: i32,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::update(events::table.filter(events::event_id.eq(event_id)))
            .set(events::application_count.eq(events::application_count + delta))
            .execute(conn)?,
    )
}

}

backend_fn! {

/// Atomically adjusts the participant counter with a native increment.
///
/// Returns the number of rows matched (zero means no such event).
pub fn adjust_participant_count(
    conn: &mut _,
    event_id: i64,
    delta: i32,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::update(events::table.filter(events::event_id.eq(event_id)))
            .set(events::participant_count.eq(events::participant_count + delta))
            .execute(conn)?,
    )
}

}
