// src/etl/transform_tests.rs

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::config::Config;
    use crate::etl::dimensions::{
        build_department_dim, build_employee_dim, build_shift_dim, normalize,
    };
    use crate::etl::facts::{build_facts, minutes_after};
    use crate::etl::time::build_time_dim;
    use crate::etl::{parse_events, transform};
    use crate::model::{AttendanceRecord, AttendanceStatus, Department, Employee, Shift};
    use crate::source::{RawData, SampleSource};

    fn hm(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn employee(nip: &str, department: &str) -> Employee {
        Employee {
            nip: nip.to_string(),
            name: format!("Employee {nip}"),
            department: department.to_string(),
            job_title: "Staff".to_string(),
            employment_status: "Permanent".to_string(),
            join_date: date("2024-01-15"),
        }
    }

    fn department(name: &str) -> Department {
        Department {
            name: name.to_string(),
            location: "Head Office".to_string(),
        }
    }

    fn shift_pagi() -> Shift {
        Shift {
            code: "PAGI".to_string(),
            start_time: hm(8, 0),
            end_time: hm(16, 0),
            description: "Shift Pagi".to_string(),
        }
    }

    fn present_record(
        nip: &str,
        day: &str,
        status: AttendanceStatus,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    ) -> AttendanceRecord {
        let shift = shift_pagi();
        AttendanceRecord {
            nip: nip.to_string(),
            date: day.to_string(),
            shift_code: shift.code.clone(),
            status,
            clock_in: Some(clock_in),
            clock_out: Some(clock_out),
            late_minutes: Some(minutes_after(shift.start_time, clock_in)),
            overtime_minutes: Some(minutes_after(shift.end_time, clock_out)),
        }
    }

    fn absent_record(nip: &str, day: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            nip: nip.to_string(),
            date: day.to_string(),
            shift_code: "PAGI".to_string(),
            status,
            clock_in: None,
            clock_out: None,
            late_minutes: None,
            overtime_minutes: None,
        }
    }

    fn seeded_config(seed: u64) -> Config {
        Config {
            database_url: "mysql://unused".to_string(),
            report_dir: "reports".to_string(),
            employee_count: 12,
            history_days: 21,
            generator_seed: Some(seed),
        }
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize("  it "), "IT");
        assert_eq!(normalize("Shift Pagi"), "SHIFT PAGI");
    }

    #[test]
    fn dimension_ids_are_dense_and_fields_normalized() {
        let employees = vec![
            employee(" emp0001 ", "it"),
            employee("EMP0002", "Finance"),
            employee("EMP0003", "IT"),
        ];
        let dim = build_employee_dim(&employees);

        assert_eq!(dim.rows.len(), 3);
        for (idx, row) in dim.rows.iter().enumerate() {
            assert_eq!(row.id, idx as u64 + 1);
        }
        assert_eq!(dim.rows[0].nip, "EMP0001");
        assert_eq!(dim.rows[0].department, "IT");
        assert_eq!(dim.rows[1].department, "FINANCE");
    }

    #[test]
    fn dimension_lookup_is_case_and_whitespace_insensitive() {
        let dim = build_employee_dim(&[employee("EMP0001", "IT")]);

        assert_eq!(dim.lookup("emp0001 ").map(|r| r.id), Some(1));
        assert!(dim.lookup("EMP9999").is_none());
    }

    #[test]
    fn duplicate_business_keys_receive_distinct_ids() {
        let dim = build_employee_dim(&[employee("EMP0001", "IT"), employee("EMP0001", "HR")]);

        assert_eq!(dim.rows.len(), 2);
        assert_eq!(dim.rows[0].id, 1);
        assert_eq!(dim.rows[1].id, 2);
        // Lookup resolves to the first occurrence.
        assert_eq!(dim.lookup("EMP0001").map(|r| r.department.as_str()), Some("IT"));
    }

    #[test]
    fn parse_events_skips_unparseable_dates() {
        let records = vec![
            absent_record("EMP0001", "2025-06-02", AttendanceStatus::Absen),
            absent_record("EMP0002", "not-a-date", AttendanceStatus::Absen),
            absent_record("EMP0003", "2025-13-40", AttendanceStatus::Absen),
        ];
        let events = parse_events(&records);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].nip, "EMP0001");
        assert_eq!(events[0].date, date("2025-06-02"));
    }

    #[test]
    fn time_dimension_derives_calendar_attributes() {
        // 2025-06-02 is a Monday, 2025-06-07 a Saturday.
        let records = vec![
            absent_record("EMP0001", "2025-06-07", AttendanceStatus::Izin),
            absent_record("EMP0001", "2025-06-02", AttendanceStatus::Izin),
            absent_record("EMP0002", "2025-06-02", AttendanceStatus::Izin),
        ];
        let time = build_time_dim(&parse_events(&records));

        assert_eq!(time.rows.len(), 2);
        // Ascending date order regardless of event order.
        assert_eq!(time.rows[0].date, date("2025-06-02"));
        assert_eq!(time.rows[0].id, 1);
        assert_eq!(time.rows[0].day_name, "Monday");
        assert_eq!(time.rows[0].month_name, "June");
        assert_eq!(time.rows[0].year, 2025);
        assert!(time.rows[0].is_workday);
        assert_eq!(time.rows[0].quarter, 2);

        assert_eq!(time.rows[1].date, date("2025-06-07"));
        assert_eq!(time.rows[1].day_name, "Saturday");
        assert!(!time.rows[1].is_workday);

        assert_eq!(time.id_for(date("2025-06-02")), Some(1));
        assert_eq!(time.id_for(date("2025-01-01")), None);
    }

    #[test]
    fn quarter_follows_month_grouping() {
        let days = [
            ("2025-01-15", 1),
            ("2025-03-31", 1),
            ("2025-04-01", 2),
            ("2025-09-30", 3),
            ("2025-10-01", 4),
            ("2025-12-31", 4),
        ];
        let records: Vec<_> = days
            .iter()
            .map(|(day, _)| absent_record("EMP0001", day, AttendanceStatus::Izin))
            .collect();
        let time = build_time_dim(&parse_events(&records));

        for (row, (day, quarter)) in time.rows.iter().zip(days.iter()) {
            assert_eq!(row.date, date(day));
            assert_eq!(row.quarter, *quarter);
        }
    }

    #[test]
    fn late_arrival_and_departure_scenario() {
        // PAGI runs 08:00-16:00; arriving 08:25 is 25 minutes late and
        // leaving 16:10 is 10 minutes of overtime.
        assert_eq!(minutes_after(hm(8, 0), hm(8, 25)), 25);
        assert_eq!(minutes_after(hm(16, 0), hm(16, 10)), 10);
        // Early arrival clamps to zero.
        assert_eq!(minutes_after(hm(8, 0), hm(7, 45)), 0);
    }

    #[test]
    fn fact_row_carries_resolved_keys_and_measures() {
        let raw = RawData {
            employees: vec![employee("EMP0004", "HR"), employee("EMP0005", "IT")],
            shifts: vec![shift_pagi()],
            departments: vec![department("HR"), department("IT")],
            attendance: vec![present_record(
                "EMP0005",
                "2025-06-02",
                AttendanceStatus::Terlambat,
                hm(8, 25),
                hm(16, 10),
            )],
        };
        let tables = transform(&raw).unwrap();

        assert_eq!(tables.facts.len(), 1);
        let fact = &tables.facts[0];
        assert_eq!(fact.id, 1);
        assert_eq!(fact.employee_id, 2);
        assert_eq!(fact.shift_id, 1);
        assert_eq!(fact.time_id, 1);
        assert_eq!(fact.department_id, 2);
        assert_eq!(fact.status, "Terlambat");
        assert_eq!(fact.late_minutes, Some(25));
        assert_eq!(fact.overtime_minutes, Some(10));
    }

    #[test]
    fn absent_fact_row_has_no_clock_or_measures() {
        let raw = RawData {
            employees: vec![employee("EMP0001", "IT")],
            shifts: vec![shift_pagi()],
            departments: vec![department("IT")],
            attendance: vec![absent_record("EMP0001", "2025-06-02", AttendanceStatus::Absen)],
        };
        let tables = transform(&raw).unwrap();

        assert_eq!(tables.facts.len(), 1);
        let fact = &tables.facts[0];
        assert_eq!(fact.status, "Absen");
        assert!(fact.clock_in.is_none());
        assert!(fact.clock_out.is_none());
        assert!(fact.late_minutes.is_none());
        assert!(fact.overtime_minutes.is_none());
    }

    #[test]
    fn unmapped_department_drops_exactly_that_event() {
        let raw = RawData {
            employees: vec![employee("EMP0001", "IT"), employee("EMP0002", "Warehouse")],
            shifts: vec![shift_pagi()],
            departments: vec![department("IT")],
            attendance: vec![
                absent_record("EMP0001", "2025-06-02", AttendanceStatus::Izin),
                absent_record("EMP0002", "2025-06-02", AttendanceStatus::Izin),
            ],
        };
        let tables = transform(&raw).unwrap();

        // One of the two events fails the department join and is dropped.
        assert_eq!(tables.facts.len(), 1);
        assert_eq!(tables.facts[0].employee_id, 1);
    }

    #[test]
    fn unknown_employee_and_shift_are_dropped() {
        let raw = RawData {
            employees: vec![employee("EMP0001", "IT")],
            shifts: vec![shift_pagi()],
            departments: vec![department("IT")],
            attendance: vec![
                absent_record("EMP0001", "2025-06-02", AttendanceStatus::Izin),
                absent_record("EMP0099", "2025-06-02", AttendanceStatus::Izin),
                AttendanceRecord {
                    shift_code: "SORE".to_string(),
                    ..absent_record("EMP0001", "2025-06-02", AttendanceStatus::Izin)
                },
            ],
        };
        let tables = transform(&raw).unwrap();

        assert_eq!(tables.facts.len(), 1);
    }

    #[test]
    fn empty_dimensions_are_catastrophic() {
        let events = parse_events(&[absent_record(
            "EMP0001",
            "2025-06-02",
            AttendanceStatus::Izin,
        )]);
        let employees = build_employee_dim(&[]);
        let shifts = build_shift_dim(&[shift_pagi()]);
        let departments = build_department_dim(&[department("IT")]);
        let time = build_time_dim(&events);

        let result = build_facts(&events, &employees, &shifts, &departments, &time);
        assert!(result.is_err());
    }

    #[test]
    fn no_events_yields_empty_fact_table_without_error() {
        let events = parse_events(&[]);
        let employees = build_employee_dim(&[employee("EMP0001", "IT")]);
        let shifts = build_shift_dim(&[shift_pagi()]);
        let departments = build_department_dim(&[department("IT")]);
        let time = build_time_dim(&events);

        let facts = build_facts(&events, &employees, &shifts, &departments, &time).unwrap();
        assert!(facts.is_empty());
    }

    #[test]
    fn generated_facts_keep_referential_integrity() {
        let raw = SampleSource::from_config(&seeded_config(42)).generate();
        let tables = transform(&raw).unwrap();

        assert!(!tables.facts.is_empty());
        for (idx, fact) in tables.facts.iter().enumerate() {
            assert_eq!(fact.id, idx as u64 + 1);
            assert!(tables.employees.iter().any(|e| e.id == fact.employee_id));
            assert!(tables.time.iter().any(|t| t.id == fact.time_id));
            assert!(tables.shifts.iter().any(|s| s.id == fact.shift_id));
            assert!(
                tables
                    .departments
                    .iter()
                    .any(|d| d.id == fact.department_id)
            );
        }
    }

    #[test]
    fn generated_facts_tie_measures_to_presence() {
        let raw = SampleSource::from_config(&seeded_config(7)).generate();
        let tables = transform(&raw).unwrap();

        for fact in &tables.facts {
            let present = fact.status == "Hadir" || fact.status == "Terlambat";
            assert_eq!(fact.clock_in.is_some(), present);
            assert_eq!(fact.clock_out.is_some(), present);
            assert_eq!(fact.late_minutes.is_some(), present);
            assert_eq!(fact.overtime_minutes.is_some(), present);
        }
    }

    #[test]
    fn transform_is_reproducible_over_the_same_raw_input() {
        let raw = SampleSource::from_config(&seeded_config(99)).generate();

        let first = transform(&raw).unwrap();
        let second = transform(&raw).unwrap();

        assert_eq!(first.employees, second.employees);
        assert_eq!(first.time, second.time);
        assert_eq!(first.shifts, second.shifts);
        assert_eq!(first.departments, second.departments);
        assert_eq!(first.facts, second.facts);
    }
}
