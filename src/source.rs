use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::Config;
use crate::etl::facts::minutes_after;
use crate::model::{AttendanceRecord, AttendanceStatus, Department, Employee, Shift};

const DEPARTMENTS: [&str; 5] = ["HR", "Finance", "IT", "Operations", "Marketing"];
const LOCATIONS: [&str; 3] = ["Head Office", "Branch 1", "Branch 2"];
const JOB_TITLES: [&str; 3] = ["Staff", "Supervisor", "Manager"];
const EMPLOYMENT_STATUSES: [&str; 2] = ["Permanent", "Contract"];

const STATUSES: [AttendanceStatus; 4] = [
    AttendanceStatus::Hadir,
    AttendanceStatus::Terlambat,
    AttendanceStatus::Absen,
    AttendanceStatus::Izin,
];
const STATUS_WEIGHTS: [f64; 4] = [0.70, 0.15, 0.10, 0.05];

/// The four raw collections a source yields to the core.
pub struct RawData {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub departments: Vec<Department>,
    pub attendance: Vec<AttendanceRecord>,
}

/// Synthetic raw event source: a trailing window of weekday attendance
/// for a small fictitious organization. Seedable so two runs over the
/// same window produce identical collections.
pub struct SampleSource {
    rng: StdRng,
    employee_count: usize,
    history_days: i64,
}

impl SampleSource {
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.generator_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            employee_count: config.employee_count,
            history_days: config.history_days,
        }
    }

    pub fn generate(&mut self) -> RawData {
        info!("Generating sample data...");

        let today = Local::now().date_naive();
        let employees = self.generate_employees(today);
        let shifts = canonical_shifts();
        let departments = self.generate_departments();
        let attendance = self.generate_attendance(today, &employees, &shifts);

        info!(
            employees = employees.len(),
            attendance = attendance.len(),
            "Sample data generated"
        );
        RawData {
            employees,
            shifts,
            departments,
            attendance,
        }
    }

    fn generate_employees(&mut self, today: NaiveDate) -> Vec<Employee> {
        (1..=self.employee_count)
            .map(|i| Employee {
                nip: format!("EMP{i:04}"),
                name: format!("Employee {i}"),
                department: (*DEPARTMENTS.choose(&mut self.rng).unwrap()).to_string(),
                job_title: (*JOB_TITLES.choose(&mut self.rng).unwrap()).to_string(),
                employment_status: (*EMPLOYMENT_STATUSES.choose(&mut self.rng).unwrap())
                    .to_string(),
                join_date: today - Duration::days(self.rng.gen_range(30..=365)),
            })
            .collect()
    }

    fn generate_departments(&mut self) -> Vec<Department> {
        DEPARTMENTS
            .iter()
            .map(|name| Department {
                name: (*name).to_string(),
                location: (*LOCATIONS.choose(&mut self.rng).unwrap()).to_string(),
            })
            .collect()
    }

    fn generate_attendance(
        &mut self,
        today: NaiveDate,
        employees: &[Employee],
        shifts: &[Shift],
    ) -> Vec<AttendanceRecord> {
        let status_dist = WeightedIndex::new(&STATUS_WEIGHTS).unwrap();
        let mut records = Vec::new();

        let mut date = today - Duration::days(self.history_days);
        while date <= today {
            // Weekdays only; the organization does not roster weekends.
            if date.weekday().num_days_from_monday() < 5 {
                for employee in employees {
                    let shift = shifts.choose(&mut self.rng).unwrap();
                    let status = STATUSES[status_dist.sample(&mut self.rng)];
                    records.push(self.generate_event(date, employee, shift, status));
                }
            }
            date += Duration::days(1);
        }

        records
    }

    fn generate_event(
        &mut self,
        date: NaiveDate,
        employee: &Employee,
        shift: &Shift,
        status: AttendanceStatus,
    ) -> AttendanceRecord {
        let date = date.format("%Y-%m-%d").to_string();

        if !status.is_present() {
            return AttendanceRecord {
                nip: employee.nip.clone(),
                date,
                shift_code: shift.code.clone(),
                status,
                clock_in: None,
                clock_out: None,
                late_minutes: None,
                overtime_minutes: None,
            };
        }

        let clock_in = if status == AttendanceStatus::Terlambat {
            shift.start_time + Duration::minutes(self.rng.gen_range(5..=120))
        } else {
            shift.start_time
        };
        let clock_out = shift.end_time + Duration::minutes(self.rng.gen_range(-30..=120));

        AttendanceRecord {
            nip: employee.nip.clone(),
            date,
            shift_code: shift.code.clone(),
            status,
            clock_in: Some(clock_in),
            clock_out: Some(clock_out),
            late_minutes: Some(minutes_after(shift.start_time, clock_in)),
            overtime_minutes: Some(minutes_after(shift.end_time, clock_out)),
        }
    }
}

fn canonical_shifts() -> Vec<Shift> {
    vec![
        Shift {
            code: "PAGI".to_string(),
            start_time: hm(8, 0),
            end_time: hm(16, 0),
            description: "Shift Pagi".to_string(),
        },
        Shift {
            code: "SIANG".to_string(),
            start_time: hm(13, 0),
            end_time: hm(21, 0),
            description: "Shift Siang".to_string(),
        },
        Shift {
            code: "MALAM".to_string(),
            start_time: hm(21, 0),
            end_time: hm(5, 0),
            description: "Shift Malam".to_string(),
        },
    ]
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}
