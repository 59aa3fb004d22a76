// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application;
mod application_status;
mod error;
mod event;
mod event_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use application::{Application, ApplicationDraft};
pub use application_status::ApplicationStatus;
pub use error::DomainError;
pub use event::{Event, EventDraft};
pub use event_status::EventStatus;
pub use types::{ApplicationNumber, Email, Session};
pub use validation::{validate_max_participants, validate_reason};
