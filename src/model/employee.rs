use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw employee record as delivered by the data source, before the
/// dimension builder normalizes its text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub nip: String,
    pub name: String,
    pub department: String,
    pub job_title: String,
    pub employment_status: String,
    pub join_date: NaiveDate,
}
