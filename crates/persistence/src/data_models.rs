// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and row-to-aggregate conversions.
//!
//! Timestamps are stored as RFC 3339 text so both backends share one
//! representation. Sessions are stored as a JSON array in the event row;
//! they are read and written as a unit with the aggregate.

use crate::error::PersistenceError;
use diesel::prelude::*;
use muster_domain::{
    Application, ApplicationNumber, ApplicationStatus, Email, Event, EventStatus, Session,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// One row of the `events` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::events)]
pub(crate) struct EventRow {
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub max_participants: Option<i32>,
    pub application_count: i32,
    pub participant_count: i32,
    pub sessions_json: String,
    pub registration_opens_at: Option<String>,
    pub registration_closes_at: Option<String>,
    pub application_deadline: Option<String>,
    pub published_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub version: i64,
}

/// One row of the `applications` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::applications)]
pub(crate) struct ApplicationRow {
    pub application_id: i64,
    pub application_number: String,
    pub event_id: i64,
    pub participant_id: Option<i64>,
    pub applicant_name: String,
    pub email: String,
    pub status: String,
    pub submitted_at: Option<String>,
    pub review_score: Option<i32>,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<String>,
    pub waitlist_position: Option<i32>,
    pub confirmed_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub rejection_reason: Option<String>,
    pub version: i64,
}

pub(crate) fn format_opt_timestamp(
    value: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    value
        .map(|v| v.format(&Rfc3339))
        .transpose()
        .map_err(Into::into)
}

pub(crate) fn parse_opt_timestamp(
    value: Option<String>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value
        .map(|v| OffsetDateTime::parse(&v, &Rfc3339))
        .transpose()
        .map_err(Into::into)
}

fn count_from_db(value: i32, column: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::MappingError(format!("{column} is negative: {value}")))
}

pub(crate) fn count_to_db(value: u32, column: &str) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::MappingError(format!("{column} out of range: {value}")))
}

impl TryFrom<EventRow> for Event {
    type Error = PersistenceError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let status: EventStatus = row
            .status
            .parse()
            .map_err(|e: muster_domain::DomainError| PersistenceError::MappingError(e.to_string()))?;
        let sessions: Vec<Session> = serde_json::from_str(&row.sessions_json)?;
        Ok(Self {
            event_id: row.event_id,
            title: row.title,
            description: row.description,
            location: row.location,
            status,
            max_participants: row
                .max_participants
                .map(|m| count_from_db(m, "max_participants"))
                .transpose()?,
            application_count: count_from_db(row.application_count, "application_count")?,
            participant_count: count_from_db(row.participant_count, "participant_count")?,
            sessions,
            registration_opens_at: parse_opt_timestamp(row.registration_opens_at)?,
            registration_closes_at: parse_opt_timestamp(row.registration_closes_at)?,
            application_deadline: parse_opt_timestamp(row.application_deadline)?,
            published_at: parse_opt_timestamp(row.published_at)?,
            cancellation_reason: row.cancellation_reason,
            version: row.version,
        })
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status: ApplicationStatus = row
            .status
            .parse()
            .map_err(|e: muster_domain::DomainError| PersistenceError::MappingError(e.to_string()))?;
        let email = Email::new(&row.email)
            .map_err(|e| PersistenceError::MappingError(e.to_string()))?;
        Ok(Self {
            application_id: row.application_id,
            application_number: ApplicationNumber::new(row.application_number),
            event_id: row.event_id,
            participant_id: row.participant_id,
            applicant_name: row.applicant_name,
            email,
            status,
            submitted_at: parse_opt_timestamp(row.submitted_at)?,
            review_score: row.review_score,
            review_notes: row.review_notes,
            reviewed_by: row.reviewed_by,
            reviewed_at: parse_opt_timestamp(row.reviewed_at)?,
            waitlist_position: row
                .waitlist_position
                .map(|p| count_from_db(p, "waitlist_position"))
                .transpose()?,
            confirmed_at: parse_opt_timestamp(row.confirmed_at)?,
            cancellation_reason: row.cancellation_reason,
            rejection_reason: row.rejection_reason,
            version: row.version,
        })
    }
}
