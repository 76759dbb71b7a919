use anyhow::{Result, bail};
use chrono::NaiveTime;
use tracing::{info, warn};

use crate::etl::dimensions::{DepartmentDimension, EmployeeDimension, ShiftDimension};
use crate::etl::time::TimeDimension;
use crate::model::AttendanceEvent;
use crate::model::warehouse::AttendanceFact;

/// Whole minutes `actual` lies past `scheduled`, clamped at zero.
/// Used for lateness (scheduled start vs arrival) and overtime
/// (scheduled end vs departure).
pub fn minutes_after(scheduled: NaiveTime, actual: NaiveTime) -> u32 {
    actual.signed_duration_since(scheduled).num_minutes().max(0) as u32
}

/// Resolve every event against the four dimensions and emit one fact
/// row per event that resolves all four keys.
///
/// The department key is resolved through the employee's normalized
/// department name, not a field on the event itself. Events failing any
/// resolution are dropped, not errors; only empty dimension inputs are
/// catastrophic.
pub fn build_facts(
    events: &[AttendanceEvent],
    employees: &EmployeeDimension,
    shifts: &ShiftDimension,
    departments: &DepartmentDimension,
    time: &TimeDimension,
) -> Result<Vec<AttendanceFact>> {
    if !events.is_empty()
        && (employees.rows.is_empty() || shifts.rows.is_empty() || departments.rows.is_empty())
    {
        bail!("cannot build fact table against empty dimensions");
    }

    let mut facts = Vec::with_capacity(events.len());
    let mut dropped = 0usize;

    for event in events {
        let Some(employee) = employees.lookup(&event.nip) else {
            warn!(nip = %event.nip, "dropping event: no matching employee");
            dropped += 1;
            continue;
        };
        let Some(shift) = shifts.lookup(&event.shift_code) else {
            warn!(shift_code = %event.shift_code, "dropping event: no matching shift");
            dropped += 1;
            continue;
        };
        let Some(time_id) = time.id_for(event.date) else {
            warn!(date = %event.date, "dropping event: date missing from time dimension");
            dropped += 1;
            continue;
        };
        let Some(department_id) = departments.id_for(&employee.department) else {
            warn!(
                nip = %event.nip,
                department = %employee.department,
                "dropping event: employee department not in department dimension"
            );
            dropped += 1;
            continue;
        };

        facts.push(AttendanceFact {
            id: facts.len() as u64 + 1,
            employee_id: employee.id,
            time_id,
            shift_id: shift.id,
            department_id,
            status: event.status.to_string(),
            clock_in: event.clock_in,
            clock_out: event.clock_out,
            late_minutes: event.late_minutes,
            overtime_minutes: event.overtime_minutes,
        });
    }

    if dropped > 0 {
        info!(dropped, kept = facts.len(), "events failed dimension joins and were dropped");
    }

    Ok(facts)
}
