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

//! Leave types and request records.
//!
//! The leave type enumeration is closed: every request is one of
//! Regular, Casual, Mission, Sick, or Permission. Regular and Casual are
//! metered against a per-employee day balance; the rest are unlimited.

use crate::base::{EmployeeId, RequestId};
use crate::calendar;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether requests of a leave type draw down a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metering {
    /// Validated against, and mutates, a numeric day balance.
    Metered,
    /// No balance participates in validation.
    Unlimited,
}

/// Closed enumeration of leave types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Regular,
    Casual,
    Mission,
    Sick,
    Permission,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Regular => "regular",
            LeaveType::Casual => "casual",
            LeaveType::Mission => "mission",
            LeaveType::Sick => "sick",
            LeaveType::Permission => "permission",
        }
    }

    /// Sick is unlimited: the default employee schema carries no sick
    /// balance, so sick requests are recorded without metering.
    pub fn metering(&self) -> Metering {
        match self {
            LeaveType::Regular | LeaveType::Casual => Metering::Metered,
            LeaveType::Mission | LeaveType::Sick | LeaveType::Permission => Metering::Unlimited,
        }
    }

    pub fn is_metered(&self) -> bool {
        self.metering() == Metering::Metered
    }

    /// Whether a new request of this type must start today or later.
    ///
    /// Missions and permissions may be filed for already-elapsed events;
    /// the other types may not.
    pub(crate) fn requires_future_start(&self) -> bool {
        matches!(
            self,
            LeaveType::Regular | LeaveType::Casual | LeaveType::Sick
        )
    }
}

/// The span a request covers.
///
/// Date-range types use inclusive calendar days; a permission covers a
/// time-of-day window on a single date and counts zero days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Days {
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
    },
    Hours {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },
}

impl Period {
    /// Inclusive date range with the day count computed from the endpoints.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Self {
        Period::Days {
            start,
            end,
            days: calendar::days_between(start, end),
        }
    }

    /// Time-of-day window on a single date.
    pub fn hours(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Period::Hours { date, start, end }
    }

    /// Day count drawn against a metered balance. Zero for permissions,
    /// which are measured in duration, not days.
    pub fn day_count(&self) -> i64 {
        match self {
            Period::Days { days, .. } => *days,
            Period::Hours { .. } => 0,
        }
    }

    /// First and last calendar date covered.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Days { start, end, .. } => (*start, *end),
            Period::Hours { date, .. } => (*date, *date),
        }
    }

    pub fn is_day_granularity(&self) -> bool {
        matches!(self, Period::Days { .. })
    }
}

/// Reference to a binary attachment stored elsewhere.
///
/// Advisory only: the validator never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub reference: String,
}

/// Derived lifecycle status of a request relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Upcoming => "upcoming",
            RequestStatus::Ongoing => "ongoing",
            RequestStatus::Completed => "completed",
        }
    }
}

/// A leave request record.
///
/// Many requests belong to one employee; no request references another.
/// The free-text fields (reason, covering employee, diagnosis, hospital)
/// are advisory and never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: RequestId,
    pub employee_id: EmployeeId,
    pub leave_type: LeaveType,
    pub period: Period,
    pub reason: String,
    pub covering_employee: Option<String>,
    pub diagnosis: Option<String>,
    pub hospital: Option<String>,
    /// Submission date entered on the form, distinct from `created_at`.
    pub request_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub attachment: Option<Attachment>,
    /// Manual status label; when present it wins over the derived status.
    pub status_override: Option<String>,
    /// Set when a date-range leave ended earlier than planned.
    pub actual_end_date: Option<NaiveDate>,
}

impl LeaveRequest {
    pub fn new(
        id: RequestId,
        employee_id: EmployeeId,
        leave_type: LeaveType,
        period: Period,
        request_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            employee_id,
            leave_type,
            period,
            reason: String::new(),
            covering_employee: None,
            diagnosis: None,
            hospital: None,
            request_date,
            created_at: Utc::now(),
            attachment: None,
            status_override: None,
            actual_end_date: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_actual_end_date(mut self, date: NaiveDate) -> Self {
        self.actual_end_date = Some(date);
        self
    }

    pub fn with_status_override(mut self, label: impl Into<String>) -> Self {
        self.status_override = Some(label.into());
        self
    }

    /// Day count this request draws against a metered balance.
    pub fn day_count(&self) -> i64 {
        self.period.day_count()
    }

    /// Status label for rendering: the manual override when present,
    /// otherwise the derived lifecycle status.
    pub fn status(&self, today: NaiveDate) -> &str {
        match &self.status_override {
            Some(label) => label,
            None => self.derived_status(today).as_str(),
        }
    }

    /// Lifecycle status derived from the covered dates.
    ///
    /// An `actual_end_date` shortens the ongoing window. This ignores any
    /// [`status_override`](Self::status_override); [`status`](Self::status)
    /// applies the override.
    pub fn derived_status(&self, today: NaiveDate) -> RequestStatus {
        let (start, end) = self.period.bounds();
        let effective_end = self.actual_end_date.unwrap_or(end);
        if today < start {
            RequestStatus::Upcoming
        } else if today <= effective_end {
            RequestStatus::Ongoing
        } else {
            RequestStatus::Completed
        }
    }
}
