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

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use leave_ledger_rs::{
    BalancePolicy, EmployeeId, Engine, LeaveRequest, LeaveType, Period, Profile, RequestId,
};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Leave Ledger - Process leave operation CSV files
///
/// Reads employee and leave request operations from a CSV file and outputs
/// the resulting balances to stdout. Supports hiring, dismissals,
/// submissions, amendments, and cancellations.
#[derive(Parser, Debug)]
#[command(name = "leave-ledger-rs")]
#[command(about = "A leave ledger that processes operation CSVs", long_about = None)]
struct Args {
    /// Path to CSV file with operations
    ///
    /// Expected format: op,employee,request,leave,start,end,name,position,reason
    /// Example: cargo run -- operations.csv > balances.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Regular days granted to newly hired employees
    #[arg(long, default_value_t = 15)]
    regular_days: i64,

    /// Casual days granted to newly hired employees
    #[arg(long, default_value_t = 6)]
    casual_days: i64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args = Args::parse();
    let policy = BalancePolicy {
        regular_days: args.regular_days,
        casual_days: args.casual_days,
    };

    // Open input file
    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // Process operations from CSV against the caller's local calendar date
    let today = Local::now().date_naive();
    let engine = match process_operations(BufReader::new(file), &policy, today) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error processing operations: {}", e);
            process::exit(1);
        }
    };

    // Write results to stdout
    if let Err(e) = write_balances(&engine, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `op, employee, request, leave, start, end, name, position, reason`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    op: String,
    employee: Option<u32>,
    request: Option<u64>,
    leave: Option<String>,
    start: Option<String>,
    end: Option<String>,
    name: Option<String>,
    position: Option<String>,
    reason: Option<String>,
}

/// One parsed operation against the engine.
#[derive(Debug)]
enum Operation {
    Hire {
        employee_id: EmployeeId,
        profile: Profile,
    },
    Submit(LeaveRequest),
    Amend(LeaveRequest),
    Cancel {
        request_id: RequestId,
    },
    Dismiss {
        employee_id: EmployeeId,
    },
}

fn parse_leave_type(value: &str) -> Option<LeaveType> {
    match value.to_lowercase().as_str() {
        "regular" => Some(LeaveType::Regular),
        "casual" => Some(LeaveType::Casual),
        "mission" => Some(LeaveType::Mission),
        "sick" => Some(LeaveType::Sick),
        "permission" => Some(LeaveType::Permission),
        _ => None,
    }
}

/// Parses the `start`/`end` columns into a period.
///
/// Date-range types carry plain dates; permissions carry
/// `YYYY-MM-DDTHH:MM` stamps whose date comes from the start stamp.
fn parse_period(leave_type: LeaveType, start: &str, end: &str) -> Option<Period> {
    if leave_type == LeaveType::Permission {
        let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M").ok()?;
        let end = NaiveDateTime::parse_from_str(end, "%Y-%m-%dT%H:%M").ok()?;
        Some(Period::hours(start.date(), start.time(), end.time()))
    } else {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").ok()?;
        Some(Period::days(start, end))
    }
}

impl CsvRecord {
    /// Converts a CSV record to an operation.
    ///
    /// Returns `None` for unknown ops or missing required fields.
    fn into_operation(self, today: NaiveDate) -> Option<Operation> {
        match self.op.to_lowercase().as_str() {
            "hire" => Some(Operation::Hire {
                employee_id: EmployeeId(self.employee?),
                profile: Profile::new(
                    self.name.unwrap_or_default(),
                    self.position.unwrap_or_default(),
                    String::new(),
                ),
            }),
            "request" | "amend" => {
                let leave_type = parse_leave_type(self.leave.as_deref()?)?;
                let period =
                    parse_period(leave_type, self.start.as_deref()?, self.end.as_deref()?)?;
                let request = LeaveRequest::new(
                    RequestId(self.request?),
                    EmployeeId(self.employee?),
                    leave_type,
                    period,
                    today,
                )
                .with_reason(self.reason.unwrap_or_default());
                if self.op.eq_ignore_ascii_case("request") {
                    Some(Operation::Submit(request))
                } else {
                    Some(Operation::Amend(request))
                }
            }
            "cancel" => Some(Operation::Cancel {
                request_id: RequestId(self.request?),
            }),
            "dismiss" => Some(Operation::Dismiss {
                employee_id: EmployeeId(self.employee?),
            }),
            _ => None,
        }
    }
}

/// Process operations from a CSV reader.
///
/// Streams the file row by row, so arbitrarily large operation logs never
/// load into memory at once. Malformed rows and rejected operations are
/// skipped; processing continues.
///
/// # CSV Format
///
/// Expected columns: `op, employee, request, leave, start, end, name,
/// position, reason`
/// - `op`: hire, request, amend, cancel, dismiss
/// - `employee`: employee ID (u32)
/// - `request`: request ID (u64, empty for hire/dismiss)
/// - `leave`: regular, casual, mission, sick, permission
/// - `start`/`end`: dates, or `YYYY-MM-DDTHH:MM` stamps for permissions
///
/// # Example
///
/// ```csv
/// op,employee,request,leave,start,end,name,position,reason
/// hire,1,,,,,Ahmed Hassan,Engineer,
/// request,1,101,regular,2026-03-09,2026-03-13,,,family travel
/// cancel,1,101,,,,,,
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
/// Individual rejections are logged but don't stop processing.
pub fn process_operations<R: Read>(
    reader: R,
    policy: &BalancePolicy,
    today: NaiveDate,
) -> Result<Engine, csv::Error> {
    let engine = Engine::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All) // Handle whitespace in fields like " hire "
        .flexible(true) // Allow missing trailing fields
        .has_headers(true) // Skip first row as header
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some(operation) = record.into_operation(today) else {
                    tracing::debug!("skipping invalid operation record");
                    continue;
                };

                // Process the operation; rejections don't stop the run
                let outcome = match operation {
                    Operation::Hire {
                        employee_id,
                        profile,
                    } => engine.hire(employee_id, profile, policy),
                    Operation::Submit(request) => {
                        engine.submit(request, today).map(|_| ())
                    }
                    Operation::Amend(request) => engine.amend(request).map(|_| ()),
                    Operation::Cancel { request_id } => {
                        engine.cancel(request_id).map(|_| ())
                    }
                    Operation::Dismiss { employee_id } => {
                        engine.dismiss(employee_id).map(|_| ())
                    }
                };
                if let Err(e) = outcome {
                    tracing::debug!(error = %e, "skipping operation");
                }
            }
            Err(e) => {
                // Skip malformed rows
                tracing::debug!(error = %e, "skipping malformed row");
                continue;
            }
        }
    }

    Ok(engine)
}

/// Write employee balances to a CSV writer.
///
/// # CSV Format
///
/// Columns: `employee, name, position, department, regular, casual`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_balances<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    // Serialize each employee snapshot
    for employee in engine.employees() {
        wtr.serialize(&*employee)?;
    }

    // Flush to ensure all data is written
    wtr.flush()?;
    Ok(())
}
