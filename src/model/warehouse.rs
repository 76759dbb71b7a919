use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Employee dimension row. Surrogate `id` is a dense 1..N sequence over
/// the source order; `nip` is the business key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeDim {
    pub id: u64,
    pub nip: String,
    pub name: String,
    pub department: String,
    pub job_title: String,
    pub employment_status: String,
    pub join_date: NaiveDate,
}

/// Time dimension row, one per distinct event date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeDim {
    pub id: u64,
    pub date: NaiveDate,
    pub day_name: String,
    pub month_name: String,
    pub year: i32,
    pub is_workday: bool,
    pub quarter: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShiftDim {
    pub id: u64,
    pub code: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentDim {
    pub id: u64,
    pub name: String,
    pub location: String,
}

/// Fact row. All four foreign keys resolve to dimension rows; clock and
/// minute fields are NULL for non-attendance statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceFact {
    pub id: u64,
    pub employee_id: u64,
    pub time_id: u64,
    pub shift_id: u64,
    pub department_id: u64,
    pub status: String,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub late_minutes: Option<u32>,
    pub overtime_minutes: Option<u32>,
}
