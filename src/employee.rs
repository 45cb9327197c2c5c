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

//! Employee records and the balance ledger.
//!
//! [`BalanceSheet`] is the unit of truth requests draw down against. Its
//! only sanctioned mutation primitives are [`BalanceSheet::apply`] and
//! [`BalanceSheet::apply_adjustment`]; both refuse to commit a candidate
//! below zero, so `regular >= 0 && casual >= 0` holds after every committed
//! operation.
//!
//! # Example
//!
//! ```
//! use leave_ledger_rs::{BalancePolicy, Employee, EmployeeId, Profile};
//!
//! let employee = Employee::new(
//!     EmployeeId(1),
//!     Profile::new("Ahmed Hassan", "Engineer", "Maintenance"),
//!     &BalancePolicy::default(),
//! );
//! assert_eq!(employee.regular_balance(), 15);
//! ```

use crate::base::EmployeeId;
use crate::error::Rejection;
use crate::leave::{LeaveRequest, LeaveType};
use crate::validator::{self, Acceptance, Adjustment};
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::Arc;

/// Initial balances granted to a newly hired employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancePolicy {
    pub regular_days: i64,
    pub casual_days: i64,
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self {
            regular_days: 15,
            casual_days: 6,
        }
    }
}

/// Current balance of one leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Days(i64),
    Unlimited,
}

/// Signed adjustment against exactly one metered balance.
///
/// Deltas for unlimited types carry zero days and applying them is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerDelta {
    pub leave_type: LeaveType,
    pub days: i64,
}

impl LedgerDelta {
    /// Delta applied when a request is accepted: `-days` for metered types.
    pub fn debit(request: &LeaveRequest) -> Self {
        Self {
            leave_type: request.leave_type,
            days: if request.leave_type.is_metered() {
                -request.day_count()
            } else {
                0
            },
        }
    }

    /// Reversal of [`debit`](Self::debit), applied on delete or edit.
    pub fn credit(request: &LeaveRequest) -> Self {
        Self {
            leave_type: request.leave_type,
            days: if request.leave_type.is_metered() {
                request.day_count()
            } else {
                0
            },
        }
    }

    pub fn is_noop(&self) -> bool {
        self.days == 0
    }
}

/// Per-employee metered balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSheet {
    regular: i64,
    casual: i64,
}

impl BalanceSheet {
    pub fn new(regular: i64, casual: i64) -> Self {
        Self { regular, casual }
    }

    pub fn from_policy(policy: &BalancePolicy) -> Self {
        Self::new(policy.regular_days, policy.casual_days)
    }

    pub fn regular(&self) -> i64 {
        self.regular
    }

    pub fn casual(&self) -> i64 {
        self.casual
    }

    /// Balance of a leave type, `Unlimited` for unmetered ones.
    pub fn balance(&self, leave_type: LeaveType) -> Balance {
        match leave_type {
            LeaveType::Regular => Balance::Days(self.regular),
            LeaveType::Casual => Balance::Days(self.casual),
            _ => Balance::Unlimited,
        }
    }

    /// Days available for a metered type, `None` for unlimited ones.
    pub fn available(&self, leave_type: LeaveType) -> Option<i64> {
        match self.balance(leave_type) {
            Balance::Days(days) => Some(days),
            Balance::Unlimited => None,
        }
    }

    fn set(&mut self, leave_type: LeaveType, days: i64) {
        match leave_type {
            LeaveType::Regular => self.regular = days,
            LeaveType::Casual => self.casual = days,
            _ => {}
        }
    }

    /// Applies a single delta.
    ///
    /// # Errors
    ///
    /// [`Rejection::InsufficientBalance`] when the candidate balance would
    /// go negative; the sheet is left untouched.
    pub fn apply(&mut self, delta: &LedgerDelta) -> Result<Balance, Rejection> {
        let Some(current) = self.available(delta.leave_type) else {
            return Ok(Balance::Unlimited);
        };
        let candidate = current + delta.days;
        if candidate < 0 {
            return Err(Rejection::InsufficientBalance { available: current });
        }
        self.set(delta.leave_type, candidate);
        self.assert_invariants();
        Ok(Balance::Days(candidate))
    }

    /// Applies a reversal/application pair as one net mutation.
    ///
    /// Each touched balance is checked only against its final candidate,
    /// never a sequential intermediate, so an edit that shrinks one side
    /// before growing the other succeeds in net. The reported `available`
    /// is the headroom after the reversal leg.
    pub fn apply_adjustment(&mut self, adjustment: &Adjustment) -> Result<(), Rejection> {
        let mut committed = *self;
        for leave_type in [LeaveType::Regular, LeaveType::Casual] {
            let current = self.available(leave_type).unwrap_or(0);
            let candidate = current + adjustment.net_for(leave_type);
            if candidate < 0 {
                return Err(Rejection::InsufficientBalance {
                    available: current + adjustment.reversal_for(leave_type),
                });
            }
            committed.set(leave_type, candidate);
        }
        *self = committed;
        self.assert_invariants();
        Ok(())
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.regular >= 0,
            "Invariant violated: regular balance went negative: {}",
            self.regular
        );
        debug_assert!(
            self.casual >= 0,
            "Invariant violated: casual balance went negative: {}",
            self.casual
        );
    }
}

/// Descriptive employee attributes, all free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub position: String,
    pub department: String,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            department: department.into(),
        }
    }
}

#[derive(Debug)]
struct EmployeeData {
    employee_id: EmployeeId,
    profile: Profile,
    balances: BalanceSheet,
}

/// Employee record with interior locking.
///
/// The lock spans validate-then-apply, so a request is always validated
/// against the same balances it mutates.
#[derive(Debug)]
pub struct Employee {
    inner: Mutex<EmployeeData>,
}

impl Employee {
    pub fn new(employee_id: EmployeeId, profile: Profile, policy: &BalancePolicy) -> Self {
        Self {
            inner: Mutex::new(EmployeeData {
                employee_id,
                profile,
                balances: BalanceSheet::from_policy(policy),
            }),
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.inner.lock().employee_id
    }

    pub fn profile(&self) -> Profile {
        self.inner.lock().profile.clone()
    }

    pub fn regular_balance(&self) -> i64 {
        self.inner.lock().balances.regular()
    }

    pub fn casual_balance(&self) -> i64 {
        self.inner.lock().balances.casual()
    }

    pub fn balance(&self, leave_type: LeaveType) -> Balance {
        self.inner.lock().balances.balance(leave_type)
    }

    /// Snapshot of the metered balances.
    pub fn balances(&self) -> BalanceSheet {
        self.inner.lock().balances
    }

    /// Validates and accepts a new request, debiting the balance it implies.
    ///
    /// `existing` must hold this employee's current requests; `today` is the
    /// caller's local calendar date.
    pub fn accept(
        &self,
        existing: &[Arc<LeaveRequest>],
        proposed: &LeaveRequest,
        today: NaiveDate,
    ) -> Result<Acceptance, Rejection> {
        let mut data = self.inner.lock();
        let acceptance = validator::validate_new(&data.balances, existing, proposed, today)?;
        data.balances.apply(&acceptance.delta)?;
        Ok(acceptance)
    }

    /// Validates and applies an edit as one net balance adjustment.
    ///
    /// `existing` must exclude the request being edited.
    pub fn reconcile(
        &self,
        original: &LeaveRequest,
        edited: &LeaveRequest,
        existing: &[Arc<LeaveRequest>],
    ) -> Result<Adjustment, Rejection> {
        let mut data = self.inner.lock();
        let adjustment = validator::validate_edit(&data.balances, original, edited, existing)?;
        data.balances.apply_adjustment(&adjustment)?;
        Ok(adjustment)
    }

    /// Reverses a request's balance effect on delete.
    ///
    /// Crediting days back to a non-negative balance cannot fail.
    pub fn release(&self, original: &LeaveRequest) -> Result<Adjustment, Rejection> {
        let adjustment = validator::validate_delete(original);
        let mut data = self.inner.lock();
        data.balances.apply_adjustment(&adjustment)?;
        Ok(adjustment)
    }
}

impl Serialize for Employee {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Employee", 6)?;
        state.serialize_field("employee", &data.employee_id)?;
        state.serialize_field("name", &data.profile.name)?;
        state.serialize_field("position", &data.profile.position)?;
        state.serialize_field("department", &data.profile.department)?;
        state.serialize_field("regular", &data.balances.regular())?;
        state.serialize_field("casual", &data.balances.casual())?;
        state.end()
    }
}
