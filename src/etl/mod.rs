pub mod dimensions;
pub mod facts;
pub mod load;
pub mod time;

mod transform_tests;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::model::warehouse::{AttendanceFact, DepartmentDim, EmployeeDim, ShiftDim, TimeDim};
use crate::model::{AttendanceEvent, AttendanceRecord};
use crate::source::RawData;

/// The five warehouse tables produced by one transform run.
pub struct WarehouseTables {
    pub employees: Vec<EmployeeDim>,
    pub time: Vec<TimeDim>,
    pub shifts: Vec<ShiftDim>,
    pub departments: Vec<DepartmentDim>,
    pub facts: Vec<AttendanceFact>,
}

/// Validate event dates at the source boundary. An unparseable date is
/// a data-quality drop, logged and skipped, never an error.
pub fn parse_events(records: &[AttendanceRecord]) -> Vec<AttendanceEvent> {
    let mut events = Vec::with_capacity(records.len());

    for record in records {
        match NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") {
            Ok(date) => events.push(AttendanceEvent {
                nip: record.nip.clone(),
                date,
                shift_code: record.shift_code.clone(),
                status: record.status,
                clock_in: record.clock_in,
                clock_out: record.clock_out,
                late_minutes: record.late_minutes,
                overtime_minutes: record.overtime_minutes,
            }),
            Err(_) => {
                warn!(nip = %record.nip, date = %record.date, "skipping event with unparseable date");
            }
        }
    }

    events
}

/// Reshape the raw collections into the star schema: normalized entity
/// dimensions, the derived time dimension, then the fact table joined
/// against all four.
pub fn transform(raw: &RawData) -> Result<WarehouseTables> {
    info!("Transforming data...");

    let events = parse_events(&raw.attendance);
    let employees = dimensions::build_employee_dim(&raw.employees);
    let shifts = dimensions::build_shift_dim(&raw.shifts);
    let departments = dimensions::build_department_dim(&raw.departments);
    let time = time::build_time_dim(&events);
    let facts = facts::build_facts(&events, &employees, &shifts, &departments, &time)?;

    info!(
        employees = employees.rows.len(),
        dates = time.rows.len(),
        shifts = shifts.rows.len(),
        departments = departments.rows.len(),
        facts = facts.len(),
        "Transform completed"
    );

    Ok(WarehouseTables {
        employees: employees.rows,
        time: time.rows,
        shifts: shifts.rows,
        departments: departments.rows,
        facts,
    })
}
