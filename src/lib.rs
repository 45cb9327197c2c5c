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

//! # Leave Ledger
//!
//! This library provides a leave-management ledger engine: per-employee
//! vacation balances, validated leave requests, and the adjustments implied
//! by editing or cancelling them.
//!
//! ## Core Components
//!
//! - [`Engine`]: Central processor managing employees and request history
//! - [`BalanceSheet`]: Per-employee metered balances with the only
//!   sanctioned mutation primitives
//! - [`validator`]: Pure accept/reject decisions with their ledger deltas
//! - [`LeaveType`]: Closed set of leave types, each metered or unlimited
//! - [`Rejection`] / [`EngineError`]: Failure taxonomy
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use leave_ledger_rs::{
//!     BalancePolicy, EmployeeId, Engine, LeaveRequest, LeaveType, Period, Profile, RequestId,
//! };
//!
//! let engine = Engine::new();
//! engine
//!     .hire(
//!         EmployeeId(1),
//!         Profile::new("Ahmed Hassan", "Engineer", "Maintenance"),
//!         &BalancePolicy::default(),
//!     )
//!     .unwrap();
//!
//! // Submit a five-day regular vacation
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let request = LeaveRequest::new(
//!     RequestId(1),
//!     EmployeeId(1),
//!     LeaveType::Regular,
//!     Period::days(
//!         NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
//!         NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(),
//!     ),
//!     today,
//! )
//! .with_reason("family travel");
//! let acceptance = engine.submit(request, today).unwrap();
//! assert_eq!(acceptance.delta.days, -5);
//!
//! // Check the remaining balance
//! let employee = engine.get_employee(&EmployeeId(1)).unwrap();
//! assert_eq!(employee.regular_balance(), 10);
//! ```
//!
//! ## Thread Safety
//!
//! Employees are held behind a concurrent map with per-employee locking, so
//! requests for different employees can be processed in parallel.

mod base;
pub mod calendar;
mod employee;
mod engine;
pub mod error;
mod leave;
mod request_log;
pub mod validator;

pub use base::{EmployeeId, RequestId};
pub use employee::{Balance, BalancePolicy, BalanceSheet, Employee, LedgerDelta, Profile};
pub use engine::Engine;
pub use error::{EngineError, Rejection};
pub use leave::{Attachment, LeaveRequest, LeaveType, Metering, Period, RequestStatus};
pub use request_log::RequestLog;
pub use validator::{Acceptance, Adjustment};
