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

//! Pure day-count and time-of-day duration helpers.
//!
//! Calendar arithmetic is done on [`NaiveDate`] values, which carry no time
//! zone. This gives the same result as normalizing both endpoints to noon
//! before subtracting: a daylight-saving shift or a half-day timestamp can
//! never skew the inclusive day count.

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Inclusive day count of a date range, at least 1.
///
/// `days_between(d, d)` is 1; a reversed range also clamps to 1, matching
/// the validator which rejects reversed ranges before counting.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use leave_ledger_rs::calendar::days_between;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
/// assert_eq!(days_between(start, end), 5);
/// ```
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

/// Duration of a same-day time window as `(hours, minutes)`.
///
/// Returns `None` when `end <= start`; a permission measured over a window
/// that is empty or runs backwards is invalid.
pub fn time_duration(start: NaiveTime, end: NaiveTime) -> Option<(i64, i64)> {
    if end <= start {
        return None;
    }
    let minutes = (i64::from(end.num_seconds_from_midnight())
        - i64::from(start.num_seconds_from_midnight()))
        / 60;
    Some((minutes / 60, minutes % 60))
}
