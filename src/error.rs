// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The leave-ledger-rs authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types for leave request processing.
//!
//! [`Rejection`] covers policy decisions made by the validator; the validator
//! never panics, it returns the exact rejection kind. [`EngineError`] adds
//! the record-keeping failures (unknown ids, duplicates) that are not policy
//! rejections and must not be conflated with them.

use thiserror::Error;

/// Validation rejections.
///
/// Each variant represents a data or policy problem with the proposed
/// request, not a transient fault. Nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// End date precedes start date
    #[error("end date precedes start date")]
    InvalidDateRange,

    /// Start date is before today, where the leave type enforces it
    #[error("start date is in the past")]
    PastDate,

    /// Date range intersects an existing request for the same employee
    #[error("date range overlaps an existing request")]
    OverlappingRequest,

    /// Metered balance would go negative
    #[error("insufficient balance ({available} days available)")]
    InsufficientBalance { available: i64 },

    /// Permission end time is not after its start time
    #[error("permission end time must be after start time")]
    InvalidTimeRange,
}

/// Engine processing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The validator rejected the request
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Referenced employee does not exist
    #[error("employee not found")]
    UnknownEmployee,

    /// Employee ID already exists
    #[error("employee already exists")]
    DuplicateEmployee,

    /// Referenced leave request does not exist
    #[error("leave request not found")]
    UnknownRequest,

    /// Duplicate leave request ID
    #[error("duplicate leave request ID")]
    DuplicateRequest,

    /// Edited request names a different employee than the original
    #[error("request does not belong to this employee")]
    EmployeeMismatch,
}
