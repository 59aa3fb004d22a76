// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification hook point for outer delivery layers.
//!
//! Callers subscribe notifiers to be told about admission milestones
//! (acceptance, waitlist promotion, event cancellation). Dispatch happens
//! strictly after the owning transaction commits, and a notifier failure is
//! logged and dropped — it can never roll back a state transition.

/// Error type notifiers may return; the coordinator only logs it.
pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

/// An admission milestone worth telling the outside world about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionNotice {
    /// An application was accepted (directly or off the waitlist).
    ApplicationAccepted {
        /// The owning event.
        event_id: i64,
        /// The accepted application.
        application_id: i64,
    },
    /// The head of the waitlist was promoted into a freed slot.
    ApplicationPromoted {
        /// The owning event.
        event_id: i64,
        /// The promoted application.
        application_id: i64,
        /// The waitlist rank it held before promotion (always 1 under
        /// FIFO promotion; recorded for audit trails).
        from_position: u32,
    },
    /// An event was cancelled and its open applications swept.
    EventCancelled {
        /// The cancelled event.
        event_id: i64,
        /// How many applications the cascade moved to Cancelled.
        applications_cancelled: usize,
    },
}

/// Subscriber interface for admission milestones.
pub trait AdmissionNotifier: Send {
    /// Delivers one notice.
    ///
    /// # Errors
    ///
    /// May fail; the coordinator logs and ignores the failure.
    fn notify(&self, notice: &AdmissionNotice) -> Result<(), NotifyError>;
}
