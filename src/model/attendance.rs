use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Attendance outcome for one employee on one day.
///
/// `Hadir` and `Terlambat` denote presence; `Absen` and `Izin` carry no
/// clock times or minute measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum AttendanceStatus {
    Hadir,
    Terlambat,
    Absen,
    Izin,
}

impl AttendanceStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Hadir | AttendanceStatus::Terlambat)
    }
}

/// Attendance record as delivered by the data source. The date is still
/// a string at this point; the transform boundary parses it and skips
/// records it cannot parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub nip: String,
    pub date: String,
    pub shift_code: String,
    pub status: AttendanceStatus,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub late_minutes: Option<u32>,
    pub overtime_minutes: Option<u32>,
}

/// Attendance event with a validated calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub nip: String,
    pub date: NaiveDate,
    pub shift_code: String,
    pub status: AttendanceStatus,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub late_minutes: Option<u32>,
    pub overtime_minutes: Option<u32>,
}
