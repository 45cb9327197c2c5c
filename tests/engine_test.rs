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

//! Engine public API integration tests.

use chrono::{NaiveDate, NaiveTime};
use leave_ledger_rs::{
    Balance, BalancePolicy, EmployeeId, Engine, EngineError, LeaveRequest, LeaveType, Period,
    Profile, Rejection, RequestId,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 1, 1)
}

fn engine_with_employee(employee_id: u32) -> Engine {
    let engine = Engine::new();
    engine
        .hire(
            EmployeeId(employee_id),
            Profile::new("Ahmed Hassan", "Engineer", "Maintenance"),
            &BalancePolicy::default(),
        )
        .unwrap();
    engine
}

fn make_ranged(
    employee_id: u32,
    request_id: u64,
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaveRequest {
    LeaveRequest::new(
        RequestId(request_id),
        EmployeeId(employee_id),
        leave_type,
        Period::days(start, end),
        today(),
    )
}

fn make_permission(
    employee_id: u32,
    request_id: u64,
    day: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> LeaveRequest {
    LeaveRequest::new(
        RequestId(request_id),
        EmployeeId(employee_id),
        LeaveType::Permission,
        Period::hours(day, start, end),
        today(),
    )
}

#[test]
fn regular_request_debits_balance() {
    let engine = engine_with_employee(1);
    let request = make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 9), date(2026, 3, 13));

    let acceptance = engine.submit(request, today()).unwrap();
    assert_eq!(acceptance.delta.days, -5);

    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 10);
    assert_eq!(employee.casual_balance(), 6);
}

#[test]
fn request_beyond_balance_is_rejected() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 9), date(2026, 3, 13)),
            today(),
        )
        .unwrap();

    // Balance is now 10; twelve days do not fit.
    let result = engine.submit(
        make_ranged(1, 2, LeaveType::Regular, date(2026, 5, 1), date(2026, 5, 12)),
        today(),
    );
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::InsufficientBalance {
            available: 10
        }))
    );

    // Balance unchanged
    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 10);
}

#[test]
fn overlapping_request_is_rejected() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(
                1,
                1,
                LeaveType::Regular,
                date(2026, 1, 10),
                date(2026, 1, 15),
            ),
            today(),
        )
        .unwrap();

    let result = engine.submit(
        make_ranged(
            1,
            2,
            LeaveType::Regular,
            date(2026, 1, 14),
            date(2026, 1, 20),
        ),
        today(),
    );
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::OverlappingRequest))
    );
}

#[test]
fn overlap_only_applies_within_one_employee() {
    let engine = engine_with_employee(1);
    engine
        .hire(
            EmployeeId(2),
            Profile::new("Mona Adel", "Accountant", "Finance"),
            &BalancePolicy::default(),
        )
        .unwrap();

    engine
        .submit(
            make_ranged(
                1,
                1,
                LeaveType::Regular,
                date(2026, 1, 10),
                date(2026, 1, 15),
            ),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_ranged(
                2,
                2,
                LeaveType::Regular,
                date(2026, 1, 10),
                date(2026, 1, 15),
            ),
            today(),
        )
        .unwrap();
}

#[test]
fn mission_is_unlimited_and_never_debited() {
    let engine = engine_with_employee(1);
    let request = make_ranged(1, 1, LeaveType::Mission, date(2026, 2, 1), date(2026, 2, 3));
    assert_eq!(request.day_count(), 3);

    let acceptance = engine.submit(request, today()).unwrap();
    assert!(acceptance.delta.is_noop());

    assert_eq!(
        engine.balance(EmployeeId(1), LeaveType::Mission).unwrap(),
        Balance::Unlimited
    );
    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 15);
    assert_eq!(employee.casual_balance(), 6);
}

#[test]
fn sick_is_unlimited() {
    let engine = engine_with_employee(1);
    // 30 sick days, far beyond any metered balance
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Sick, date(2026, 2, 1), date(2026, 3, 2)),
            today(),
        )
        .unwrap();
    assert_eq!(
        engine.balance(EmployeeId(1), LeaveType::Sick).unwrap(),
        Balance::Unlimited
    );
}

#[test]
fn past_start_is_rejected_for_regular() {
    let engine = engine_with_employee(1);
    let result = engine.submit(
        make_ranged(
            1,
            1,
            LeaveType::Regular,
            date(2025, 12, 20),
            date(2025, 12, 22),
        ),
        today(),
    );
    assert_eq!(result, Err(EngineError::Rejected(Rejection::PastDate)));
}

#[test]
fn past_start_is_allowed_for_mission() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(
                1,
                1,
                LeaveType::Mission,
                date(2025, 12, 20),
                date(2025, 12, 22),
            ),
            today(),
        )
        .unwrap();
}

#[test]
fn start_today_is_accepted() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Casual, today(), today()),
            today(),
        )
        .unwrap();
    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.casual_balance(), 5);
}

#[test]
fn reversed_range_is_rejected() {
    let engine = engine_with_employee(1);
    let result = engine.submit(
        make_ranged(
            1,
            1,
            LeaveType::Regular,
            date(2026, 3, 13),
            date(2026, 3, 9),
        ),
        today(),
    );
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::InvalidDateRange))
    );
}

#[test]
fn amend_applies_net_delta() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5)),
            today(),
        )
        .unwrap();
    // Balance is 10 after the original -5.

    // Grow the request to eight days: +5 reversal - 8 application = -3 net.
    let adjustment = engine
        .amend(make_ranged(
            1,
            1,
            LeaveType::Regular,
            date(2026, 3, 1),
            date(2026, 3, 8),
        ))
        .unwrap();
    assert_eq!(adjustment.net_for(LeaveType::Regular), -3);

    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 7);
}

#[test]
fn amend_beyond_net_headroom_is_rejected() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5)),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_ranged(
                1,
                2,
                LeaveType::Regular,
                date(2026, 4, 1),
                date(2026, 4, 9),
            ),
            today(),
        )
        .unwrap();
    // Balance is 1; headroom for request 1 is 1 + 5 = 6.

    let result = engine.amend(make_ranged(
        1,
        1,
        LeaveType::Regular,
        date(2026, 3, 1),
        date(2026, 3, 7),
    ));
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::InsufficientBalance {
            available: 6
        }))
    );

    // Balance and history unchanged
    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 1);
    assert_eq!(
        engine.history_for(EmployeeId(1))[0].period.bounds().1,
        date(2026, 3, 5)
    );
}

#[test]
fn amend_round_trip_restores_balance() {
    let engine = engine_with_employee(1);
    let original = make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5));
    engine.submit(original.clone(), today()).unwrap();

    engine
        .amend(make_ranged(
            1,
            1,
            LeaveType::Casual,
            date(2026, 3, 1),
            date(2026, 3, 3),
        ))
        .unwrap();
    engine.amend(original).unwrap();

    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 10);
    assert_eq!(employee.casual_balance(), 6);
}

#[test]
fn amend_type_change_moves_days_between_balances() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 4)),
            today(),
        )
        .unwrap();

    engine
        .amend(make_ranged(
            1,
            1,
            LeaveType::Casual,
            date(2026, 3, 1),
            date(2026, 3, 4),
        ))
        .unwrap();

    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 15);
    assert_eq!(employee.casual_balance(), 2);
}

#[test]
fn amend_rechecks_overlap() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5)),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_ranged(
                1,
                2,
                LeaveType::Casual,
                date(2026, 3, 10),
                date(2026, 3, 12),
            ),
            today(),
        )
        .unwrap();

    let result = engine.amend(make_ranged(
        1,
        1,
        LeaveType::Regular,
        date(2026, 3, 8),
        date(2026, 3, 11),
    ));
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::OverlappingRequest))
    );
}

#[test]
fn amend_keeping_own_dates_is_not_self_overlap() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5)),
            today(),
        )
        .unwrap();

    // Same dates, new reason only.
    engine
        .amend(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5))
                .with_reason("updated reason"),
        )
        .unwrap();

    assert_eq!(engine.history_for(EmployeeId(1))[0].reason, "updated reason");
}

#[test]
fn amend_wrong_employee_is_rejected() {
    let engine = engine_with_employee(1);
    engine
        .hire(
            EmployeeId(2),
            Profile::new("Mona Adel", "Accountant", "Finance"),
            &BalancePolicy::default(),
        )
        .unwrap();
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5)),
            today(),
        )
        .unwrap();

    let result = engine.amend(make_ranged(
        2,
        1,
        LeaveType::Regular,
        date(2026, 3, 1),
        date(2026, 3, 5),
    ));
    assert_eq!(result, Err(EngineError::EmployeeMismatch));
}

#[test]
fn cancel_restores_balance() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Casual, date(2026, 3, 1), date(2026, 3, 3)),
            today(),
        )
        .unwrap();

    let adjustment = engine.cancel(RequestId(1)).unwrap();
    assert_eq!(adjustment.net_for(LeaveType::Casual), 3);

    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.casual_balance(), 6);
    assert!(engine.history_for(EmployeeId(1)).is_empty());
}

#[test]
fn delete_then_recreate_is_balance_neutral() {
    let engine = engine_with_employee(1);
    let request = make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5));
    engine.submit(request.clone(), today()).unwrap();
    let balance_before = engine
        .get_employee(&EmployeeId(1))
        .unwrap()
        .regular_balance();

    engine.cancel(RequestId(1)).unwrap();
    engine.submit(request, today()).unwrap();

    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), balance_before);
}

#[test]
fn permission_with_reversed_window_is_rejected() {
    let engine = engine_with_employee(1);
    let result = engine.submit(
        make_permission(1, 1, date(2026, 2, 10), time(9, 0), time(8, 30)),
        today(),
    );
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::InvalidTimeRange))
    );
}

#[test]
fn permissions_coexist_with_vacations() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(
                1,
                1,
                LeaveType::Regular,
                date(2026, 2, 9),
                date(2026, 2, 13),
            ),
            today(),
        )
        .unwrap();

    // Inside the vacation range, and on the same day as another permission.
    engine
        .submit(
            make_permission(1, 2, date(2026, 2, 10), time(9, 0), time(11, 0)),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_permission(1, 3, date(2026, 2, 10), time(13, 0), time(14, 30)),
            today(),
        )
        .unwrap();

    // Permissions are filed retroactively too.
    engine
        .submit(
            make_permission(1, 4, date(2025, 11, 3), time(9, 0), time(10, 0)),
            today(),
        )
        .unwrap();

    assert_eq!(engine.history_for(EmployeeId(1)).len(), 4);
    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 10);
}

#[test]
fn duplicate_request_id_is_rejected() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 2)),
            today(),
        )
        .unwrap();

    let result = engine.submit(
        make_ranged(1, 1, LeaveType::Casual, date(2026, 4, 1), date(2026, 4, 2)),
        today(),
    );
    assert_eq!(result, Err(EngineError::DuplicateRequest));

    // The duplicate debits nothing and the original record is untouched.
    let employee = engine.get_employee(&EmployeeId(1)).unwrap();
    assert_eq!(employee.regular_balance(), 13);
    assert_eq!(employee.casual_balance(), 6);
    let history = engine.history_for(EmployeeId(1));
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].leave_type, LeaveType::Regular);
}

#[test]
fn rejected_submit_leaves_no_history_record() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 5)),
            today(),
        )
        .unwrap();

    let result = engine.submit(
        make_ranged(1, 2, LeaveType::Regular, date(2026, 3, 3), date(2026, 3, 6)),
        today(),
    );
    assert_eq!(
        result,
        Err(EngineError::Rejected(Rejection::OverlappingRequest))
    );

    // The rejected id is free again, not left reserved in the history.
    assert_eq!(engine.history_for(EmployeeId(1)).len(), 1);
    assert_eq!(engine.cancel(RequestId(2)), Err(EngineError::UnknownRequest));
    engine
        .submit(
            make_ranged(1, 2, LeaveType::Regular, date(2026, 4, 1), date(2026, 4, 2)),
            today(),
        )
        .unwrap();
}

#[test]
fn unknown_employee_and_request_errors() {
    let engine = engine_with_employee(1);
    assert_eq!(
        engine.submit(
            make_ranged(9, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 2)),
            today(),
        ),
        Err(EngineError::UnknownEmployee)
    );
    assert_eq!(engine.cancel(RequestId(42)), Err(EngineError::UnknownRequest));
    assert_eq!(
        engine.amend(make_ranged(
            1,
            42,
            LeaveType::Regular,
            date(2026, 3, 1),
            date(2026, 3, 2)
        )),
        Err(EngineError::UnknownRequest)
    );
    assert_eq!(
        engine.balance(EmployeeId(9), LeaveType::Regular),
        Err(EngineError::UnknownEmployee)
    );
}

#[test]
fn hire_duplicate_employee_is_rejected() {
    let engine = engine_with_employee(1);
    let result = engine.hire(
        EmployeeId(1),
        Profile::new("Someone Else", "", ""),
        &BalancePolicy::default(),
    );
    assert_eq!(result, Err(EngineError::DuplicateEmployee));
}

#[test]
fn custom_policy_sets_initial_balances() {
    let engine = Engine::new();
    engine
        .hire(
            EmployeeId(1),
            Profile::new("Ahmed Hassan", "Engineer", "Maintenance"),
            &BalancePolicy {
                regular_days: 21,
                casual_days: 7,
            },
        )
        .unwrap();

    assert_eq!(
        engine.balance(EmployeeId(1), LeaveType::Regular).unwrap(),
        Balance::Days(21)
    );
    assert_eq!(
        engine.balance(EmployeeId(1), LeaveType::Casual).unwrap(),
        Balance::Days(7)
    );
}

#[test]
fn dismiss_cascades_requests() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 1, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 2)),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_permission(1, 2, date(2026, 3, 10), time(9, 0), time(10, 0)),
            today(),
        )
        .unwrap();

    let removed = engine.dismiss(EmployeeId(1)).unwrap();
    assert_eq!(removed, 2);
    assert!(engine.get_employee(&EmployeeId(1)).is_none());
    assert!(engine.history_for(EmployeeId(1)).is_empty());

    assert_eq!(engine.dismiss(EmployeeId(1)), Err(EngineError::UnknownEmployee));
}

#[test]
fn history_preserves_submission_order() {
    let engine = engine_with_employee(1);
    engine
        .submit(
            make_ranged(1, 5, LeaveType::Regular, date(2026, 3, 1), date(2026, 3, 2)),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_ranged(1, 2, LeaveType::Casual, date(2026, 4, 1), date(2026, 4, 2)),
            today(),
        )
        .unwrap();
    engine
        .submit(
            make_ranged(1, 9, LeaveType::Mission, date(2026, 5, 1), date(2026, 5, 2)),
            today(),
        )
        .unwrap();

    let ids: Vec<u64> = engine
        .history_for(EmployeeId(1))
        .iter()
        .map(|r| r.id.0)
        .collect();
    assert_eq!(ids, vec![5, 2, 9]);
}
