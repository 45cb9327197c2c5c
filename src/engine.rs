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

//! Leave request processing engine.
//!
//! The [`Engine`] ties the balance ledger, the validator and the request
//! history together. Every mutation applies the validator's ledger delta
//! atomically with the paired request mutation: the per-employee lock is
//! held across validate-then-apply, and a submission reserves its id in the
//! history before the balance is touched, so a duplicate id can never leave
//! a debit behind. A rejected submission rolls its reservation back.
//!
//! # Processing
//!
//! - **Submit**: validate a proposed request, debit the metered balance,
//!   append to the history.
//! - **Amend**: recompute the net balance adjustment of an edit, apply it,
//!   replace the record in place.
//! - **Cancel**: reverse the original debit, remove the record.
//! - **Hire / Dismiss**: create an employee from a balance policy; remove
//!   an employee together with all of their requests.
//!
//! # Concurrency
//!
//! Employees live in a [`DashMap`], so requests for different employees
//! proceed in parallel. A single logical writer per employee is assumed;
//! the per-employee lock makes concurrent writers safe, not serialized
//! against the history snapshot they validated with.

use crate::base::{EmployeeId, RequestId};
use crate::employee::{Balance, BalancePolicy, Employee, Profile};
use crate::error::EngineError;
use crate::leave::{LeaveRequest, LeaveType};
use crate::request_log::RequestLog;
use crate::validator::{Acceptance, Adjustment};
use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Leave ledger engine managing employees and their request history.
///
/// # Invariants
///
/// - Request IDs are globally unique across all leave types.
/// - Metered balances never go negative after a committed operation.
/// - Deleting a request restores exactly the delta its creation applied.
pub struct Engine {
    /// Employees indexed by employee ID.
    employees: DashMap<EmployeeId, Employee>,
    /// Request history shared by all employees.
    requests: RequestLog,
}

impl Engine {
    /// Creates a new engine with no employees or requests.
    pub fn new() -> Self {
        Engine {
            employees: DashMap::new(),
            requests: RequestLog::new(),
        }
    }

    /// Adds an employee with balances taken from the policy.
    ///
    /// # Errors
    ///
    /// [`EngineError::DuplicateEmployee`] if the ID is already taken.
    pub fn hire(
        &self,
        employee_id: EmployeeId,
        profile: Profile,
        policy: &BalancePolicy,
    ) -> Result<(), EngineError> {
        match self.employees.entry(employee_id) {
            Entry::Occupied(_) => Err(EngineError::DuplicateEmployee),
            Entry::Vacant(entry) => {
                tracing::debug!(%employee_id, "hired employee");
                entry.insert(Employee::new(employee_id, profile, policy));
                Ok(())
            }
        }
    }

    /// Removes an employee together with all of their requests.
    ///
    /// Returns the number of requests dropped. No balance bookkeeping
    /// happens; the ledger disappears with the employee.
    pub fn dismiss(&self, employee_id: EmployeeId) -> Result<usize, EngineError> {
        if self.employees.remove(&employee_id).is_none() {
            return Err(EngineError::UnknownEmployee);
        }
        let removed = self.requests.remove_employee(employee_id);
        tracing::debug!(%employee_id, removed, "dismissed employee");
        Ok(removed)
    }

    /// Submits a proposed request.
    ///
    /// On acceptance the implied delta has already been applied to the
    /// employee's balances and the request is part of the history.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownEmployee`] - no such employee.
    /// - [`EngineError::DuplicateRequest`] - request ID already exists.
    /// - [`EngineError::Rejected`] - the validator refused the request;
    ///   the inner [`Rejection`](crate::Rejection) names the exact reason.
    pub fn submit(
        &self,
        request: LeaveRequest,
        today: NaiveDate,
    ) -> Result<Acceptance, EngineError> {
        let employee = self
            .employees
            .get(&request.employee_id)
            .ok_or(EngineError::UnknownEmployee)?;

        // Reserve the id before touching balances: a concurrent duplicate
        // fails here instead of after the debit.
        let request = Arc::new(request);
        self.requests.insert(Arc::clone(&request))?;

        let existing: Vec<_> = self
            .requests
            .for_employee(request.employee_id)
            .into_iter()
            .filter(|other| other.id != request.id)
            .collect();
        let acceptance = match employee.accept(&existing, &request, today) {
            Ok(acceptance) => acceptance,
            Err(rejection) => {
                self.requests.remove(&request.id);
                tracing::debug!(request_id = %request.id, %rejection, "request rejected");
                return Err(rejection.into());
            }
        };

        tracing::debug!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            leave_type = request.leave_type.as_str(),
            delta = acceptance.delta.days,
            "request accepted"
        );
        Ok(acceptance)
    }

    /// Applies an edit to an existing request.
    ///
    /// The edited record must keep its ID and employee; everything else
    /// (dates, type, day count, reason, metadata) may change. The balance
    /// effect is the reversal of the original composed with the application
    /// of the edit, checked in net.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownRequest`] - no request with this ID.
    /// - [`EngineError::EmployeeMismatch`] - the edit names a different
    ///   employee than the original.
    /// - [`EngineError::UnknownEmployee`] - the employee is gone.
    /// - [`EngineError::Rejected`] - the validator refused the edit.
    pub fn amend(&self, edited: LeaveRequest) -> Result<Adjustment, EngineError> {
        let original = self
            .requests
            .get(&edited.id)
            .ok_or(EngineError::UnknownRequest)?;
        if original.employee_id != edited.employee_id {
            return Err(EngineError::EmployeeMismatch);
        }
        let employee = self
            .employees
            .get(&edited.employee_id)
            .ok_or(EngineError::UnknownEmployee)?;

        let existing: Vec<_> = self
            .requests
            .for_employee(edited.employee_id)
            .into_iter()
            .filter(|other| other.id != edited.id)
            .collect();
        let adjustment = match employee.reconcile(&original, &edited, &existing) {
            Ok(adjustment) => adjustment,
            Err(rejection) => {
                tracing::debug!(request_id = %edited.id, %rejection, "edit rejected");
                return Err(rejection.into());
            }
        };

        tracing::debug!(
            request_id = %edited.id,
            reversal = adjustment.reversal.days,
            application = adjustment.application.days,
            "request amended"
        );
        self.requests.replace(Arc::new(edited))?;
        Ok(adjustment)
    }

    /// Removes a request, reversing its balance effect.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownRequest`] - no request with this ID.
    /// - [`EngineError::UnknownEmployee`] - the employee is gone.
    pub fn cancel(&self, request_id: RequestId) -> Result<Adjustment, EngineError> {
        let original = self
            .requests
            .get(&request_id)
            .ok_or(EngineError::UnknownRequest)?;
        let employee = self
            .employees
            .get(&original.employee_id)
            .ok_or(EngineError::UnknownEmployee)?;

        let adjustment = employee.release(&original)?;
        self.requests.remove(&request_id);
        tracing::debug!(
            %request_id,
            restored = adjustment.reversal.days,
            "request cancelled"
        );
        Ok(adjustment)
    }

    /// Current balance of one leave type, [`Balance::Unlimited`] for
    /// unmetered ones. Read-only accessor for export layers.
    pub fn balance(
        &self,
        employee_id: EmployeeId,
        leave_type: LeaveType,
    ) -> Result<Balance, EngineError> {
        let employee = self
            .employees
            .get(&employee_id)
            .ok_or(EngineError::UnknownEmployee)?;
        Ok(employee.balance(leave_type))
    }

    /// All requests of one employee, oldest first. Read-only accessor for
    /// export layers; rendering never mutates the ledger.
    pub fn history_for(&self, employee_id: EmployeeId) -> Vec<Arc<LeaveRequest>> {
        self.requests.for_employee(employee_id)
    }

    /// Retrieves an employee by ID.
    pub fn get_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Option<dashmap::mapref::one::Ref<'_, EmployeeId, Employee>> {
        self.employees.get(employee_id)
    }

    /// Returns an iterator over all employees.
    ///
    /// Useful for generating balance reports.
    pub fn employees(
        &self,
    ) -> impl Iterator<Item = dashmap::mapref::multiple::RefMulti<'_, EmployeeId, Employee>> {
        self.employees.iter()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
