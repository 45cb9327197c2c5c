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

//! Request validation.
//!
//! Pure decision functions: given a proposed request, the employee's current
//! balances and request history, decide accept or reject and compute the
//! ledger delta the decision implies. No I/O and no clock access; `today`
//! comes in as an argument.
//!
//! The check order is fixed so the first applicable violation is the one
//! reported when several hold at once: date validity, then past-date, then
//! overlap, then balance, then permission duration.

use crate::calendar;
use crate::employee::{BalanceSheet, LedgerDelta};
use crate::error::Rejection;
use crate::leave::{LeaveRequest, LeaveType, Period};
use chrono::NaiveDate;
use std::sync::Arc;

/// Successful outcome of [`validate_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acceptance {
    /// Delta to apply atomically with persisting the request.
    pub delta: LedgerDelta,
}

/// Net balance effect of an edit or delete.
///
/// The reversal undoes the original request's debit; the application debits
/// the edited replacement. On a delete the application leg carries zero
/// days. The two legs may touch different balances when the edit changed
/// the leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub reversal: LedgerDelta,
    pub application: LedgerDelta,
}

impl Adjustment {
    pub fn reversal_for(&self, leave_type: LeaveType) -> i64 {
        if self.reversal.leave_type == leave_type {
            self.reversal.days
        } else {
            0
        }
    }

    pub fn application_for(&self, leave_type: LeaveType) -> i64 {
        if self.application.leave_type == leave_type {
            self.application.days
        } else {
            0
        }
    }

    /// Net signed effect on one balance.
    pub fn net_for(&self, leave_type: LeaveType) -> i64 {
        self.reversal_for(leave_type) + self.application_for(leave_type)
    }
}

/// True when two requests of the same employee cover intersecting days.
///
/// The predicate is symmetric. Permission requests are time-of-day
/// granularity and never conflict, on either side; two permissions on the
/// same calendar day coexist.
pub fn conflicts(a: &LeaveRequest, b: &LeaveRequest) -> bool {
    if a.employee_id != b.employee_id {
        return false;
    }
    if !a.period.is_day_granularity() || !b.period.is_day_granularity() {
        return false;
    }
    let (a_start, a_end) = a.period.bounds();
    let (b_start, b_end) = b.period.bounds();
    a_start <= b_end && b_start <= a_end
}

/// Decides whether a proposed request may be accepted.
///
/// `existing` holds the employee's current requests; `today` is the
/// caller's local calendar date, compared date-only.
///
/// # Errors
///
/// - [`Rejection::InvalidDateRange`] - end date before start date.
/// - [`Rejection::PastDate`] - regular/casual/sick request starting before
///   today. Missions and permissions may be filed retroactively.
/// - [`Rejection::OverlappingRequest`] - day ranges intersect an existing
///   request.
/// - [`Rejection::InsufficientBalance`] - metered balance smaller than the
///   requested day count.
/// - [`Rejection::InvalidTimeRange`] - permission window empty or reversed.
pub fn validate_new(
    balances: &BalanceSheet,
    existing: &[Arc<LeaveRequest>],
    proposed: &LeaveRequest,
    today: NaiveDate,
) -> Result<Acceptance, Rejection> {
    if let Period::Days { start, end, .. } = proposed.period {
        if end < start {
            return Err(Rejection::InvalidDateRange);
        }
        if proposed.leave_type.requires_future_start() && start < today {
            return Err(Rejection::PastDate);
        }
    }

    if existing.iter().any(|other| conflicts(proposed, other)) {
        return Err(Rejection::OverlappingRequest);
    }

    if let Some(available) = balances.available(proposed.leave_type) {
        if available < proposed.day_count() {
            return Err(Rejection::InsufficientBalance { available });
        }
    }

    if let Period::Hours { start, end, .. } = proposed.period {
        if calendar::time_duration(start, end).is_none() {
            return Err(Rejection::InvalidTimeRange);
        }
    }

    Ok(Acceptance {
        delta: LedgerDelta::debit(proposed),
    })
}

/// Decides whether an edit may be applied and computes its net adjustment.
///
/// The reversal of the original is composed with the application of the
/// edit into a single net delta per balance, checked only against the final
/// candidate. An edit that shrinks one leg before growing the other
/// therefore succeeds when the net fits, even where sequential checks would
/// fail.
///
/// The edited dates are re-checked for overlap against the employee's other
/// requests; `existing` must exclude the request being edited. Past-date is
/// not re-enforced, so elapsed leaves stay editable.
pub fn validate_edit(
    balances: &BalanceSheet,
    original: &LeaveRequest,
    edited: &LeaveRequest,
    existing: &[Arc<LeaveRequest>],
) -> Result<Adjustment, Rejection> {
    if let Period::Days { start, end, .. } = edited.period {
        if end < start {
            return Err(Rejection::InvalidDateRange);
        }
    }

    if existing
        .iter()
        .filter(|other| other.id != edited.id)
        .any(|other| conflicts(edited, other))
    {
        return Err(Rejection::OverlappingRequest);
    }

    let adjustment = Adjustment {
        reversal: LedgerDelta::credit(original),
        application: LedgerDelta::debit(edited),
    };

    for leave_type in [LeaveType::Regular, LeaveType::Casual] {
        let current = balances.available(leave_type).unwrap_or(0);
        if current + adjustment.net_for(leave_type) < 0 {
            return Err(Rejection::InsufficientBalance {
                available: current + adjustment.reversal_for(leave_type),
            });
        }
    }

    if let Period::Hours { start, end, .. } = edited.period {
        if calendar::time_duration(start, end).is_none() {
            return Err(Rejection::InvalidTimeRange);
        }
    }

    Ok(adjustment)
}

/// Computes the reversal applied when a request is deleted.
///
/// Always succeeds; deleting a request restores exactly what its creation
/// debited, so delete-then-recreate is balance-neutral.
pub fn validate_delete(original: &LeaveRequest) -> Adjustment {
    Adjustment {
        reversal: LedgerDelta::credit(original),
        application: LedgerDelta {
            leave_type: original.leave_type,
            days: 0,
        },
    }
}
