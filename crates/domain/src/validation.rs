// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates that a free-text reason is present and non-blank.
///
/// Cancellation and rejection both require a reason; a whitespace-only
/// string does not count.
///
/// # Errors
///
/// Returns `DomainError::BlankReason` naming the offending field.
pub fn validate_reason(reason: &str, field: &'static str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::BlankReason(field));
    }
    Ok(())
}

/// Validates a configured participant ceiling.
///
/// `None` (unlimited) is always valid; a set ceiling must be positive.
///
/// # Errors
///
/// Returns `DomainError::InvalidMaxParticipants` for a zero ceiling.
pub fn validate_max_participants(value: Option<u32>) -> Result<(), DomainError> {
    if let Some(0) = value {
        return Err(DomainError::InvalidMaxParticipants { value: 0 });
    }
    Ok(())
}
