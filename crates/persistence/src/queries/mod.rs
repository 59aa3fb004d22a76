// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `events` — Event aggregate queries
//! - `applications` — Application aggregate queries
//! - `waitlist` — Waitlist ranking queries
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `Persistence` adapter in `lib.rs` dispatches to the appropriate version
//! based on the active backend connection.

pub mod applications;
pub mod events;
pub mod waitlist;

// Re-export backend-specific query functions used by lib.rs
pub use applications::{
    active_application_exists_mysql, active_application_exists_sqlite,
    applications_for_event_mysql, applications_for_event_sqlite, get_application_mysql,
    get_application_sqlite,
};
#[allow(unused_imports)]
pub use applications::{application_exists_mysql, application_exists_sqlite};
pub use events::{event_exists_mysql, event_exists_sqlite, get_event_mysql, get_event_sqlite};
pub use waitlist::{
    max_waitlist_position_mysql, max_waitlist_position_sqlite, waitlist_head_mysql,
    waitlist_head_sqlite, waitlisted_applications_mysql, waitlisted_applications_sqlite,
};
