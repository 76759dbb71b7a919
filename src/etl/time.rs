use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::model::AttendanceEvent;
use crate::model::warehouse::TimeDim;

pub struct TimeDimension {
    pub rows: Vec<TimeDim>,
    by_date: HashMap<NaiveDate, u64>,
}

impl TimeDimension {
    pub fn id_for(&self, date: NaiveDate) -> Option<u64> {
        self.by_date.get(&date).copied()
    }
}

/// One row per distinct date appearing in the events. Dates are sorted
/// ascending before id assignment so the surrogate sequence is
/// reproducible across runs.
pub fn build_time_dim(events: &[AttendanceEvent]) -> TimeDimension {
    let distinct: BTreeSet<NaiveDate> = events.iter().map(|e| e.date).collect();

    let mut rows = Vec::with_capacity(distinct.len());
    let mut by_date = HashMap::with_capacity(distinct.len());

    for (idx, date) in distinct.into_iter().enumerate() {
        let id = idx as u64 + 1;
        rows.push(TimeDim {
            id,
            date,
            day_name: date.format("%A").to_string(),
            month_name: date.format("%B").to_string(),
            year: date.year(),
            is_workday: date.weekday().num_days_from_monday() < 5,
            quarter: date.month0() / 3 + 1,
        });
        by_date.insert(date, id);
    }

    TimeDimension { rows, by_date }
}
