use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub code: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
}
