// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Most mutations use Diesel DSL and are backend-agnostic, with
//! minimal use of backend-specific helpers (e.g., `last_insert_rowid()`).
//!
//! ## Module Organization
//!
//! - `events` — Event inserts, version-checked saves, atomic counters
//! - `applications` — Application inserts, saves, the cancellation cascade
//! - `waitlist` — Bulk waitlist gap open/close
//!
//! ## Write Disciplines
//!
//! Version-checked saves and the bulk updates return the matched row count
//! instead of failing on zero rows; the `Persistence` adapter in `lib.rs`
//! tells a stale version apart from a missing row and raises the right
//! error.

pub mod applications;
pub mod events;
pub mod waitlist;

// Re-export backend-specific mutation functions used by lib.rs
pub use applications::{
    cancel_open_applications_mysql, cancel_open_applications_sqlite, insert_application_mysql,
    insert_application_sqlite, save_application_mysql, save_application_sqlite,
};
pub use events::{
    adjust_application_count_mysql, adjust_application_count_sqlite,
    adjust_participant_count_mysql, adjust_participant_count_sqlite, insert_event_mysql,
    insert_event_sqlite, reset_participant_count_mysql, reset_participant_count_sqlite,
    save_event_mysql, save_event_sqlite,
};
pub use waitlist::{
    close_waitlist_gap_mysql, close_waitlist_gap_sqlite, open_waitlist_gap_mysql,
    open_waitlist_gap_sqlite,
};
