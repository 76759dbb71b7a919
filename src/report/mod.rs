pub mod charts;
pub mod quality;
pub mod queries;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use tracing::info;

/// Fixed weekday ordering for the heat map axis.
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const STATUS_ORDER: [&str; 4] = ["Hadir", "Terlambat", "Absen", "Izin"];

/// Reporting layer over the persisted star schema. Runs the aggregate
/// queries and renders the five report artifacts into `out_dir`.
pub struct Dashboard {
    pool: MySqlPool,
    out_dir: PathBuf,
}

impl Dashboard {
    pub fn new(pool: MySqlPool, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            out_dir: out_dir.into(),
        }
    }

    pub async fn render_all(&self) -> Result<Vec<PathBuf>> {
        info!("Generating dashboard...");
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create report dir {}", self.out_dir.display()))?;

        quality::warn_duplicate_nips(&self.pool).await?;

        let written = vec![
            self.monthly_trend().await?,
            self.status_distribution().await?,
            self.shift_lateness().await?,
            self.top_late_employees().await?,
            self.weekday_heatmap().await?,
        ];

        info!("Dashboard saved to {}", self.out_dir.display());
        Ok(written)
    }

    async fn monthly_trend(&self) -> Result<PathBuf> {
        let rows = queries::monthly_summary(&self.pool).await?;

        let mut departments: Vec<&str> = Vec::new();
        for row in &rows {
            if !departments.contains(&row.department.as_str()) {
                departments.push(row.department.as_str());
            }
        }

        let traces: Vec<Value> = departments
            .iter()
            .map(|dept| {
                let points: Vec<_> = rows.iter().filter(|r| r.department == *dept).collect();
                json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": dept,
                    "x": points.iter().map(|r| r.month_year.as_str()).collect::<Vec<_>>(),
                    "y": points.iter().map(|r| r.attendance_pct).collect::<Vec<_>>(),
                })
            })
            .collect();

        let layout = json!({
            "title": "Monthly Attendance Trend per Department",
            "xaxis": { "title": "Month" },
            "yaxis": { "title": "Attendance %", "rangemode": "tozero" },
        });

        self.write(
            "monthly_trend.html",
            "Monthly Attendance Trend",
            Value::Array(traces),
            layout,
        )
    }

    async fn status_distribution(&self) -> Result<PathBuf> {
        let rows = queries::status_distribution(&self.pool).await?;

        let mut departments: Vec<&str> = rows.iter().map(|r| r.department.as_str()).collect();
        departments.sort_unstable();
        departments.dedup();

        let traces: Vec<Value> = STATUS_ORDER
            .iter()
            .map(|status| {
                let counts: Vec<i64> = departments
                    .iter()
                    .map(|dept| {
                        rows.iter()
                            .find(|r| r.department == *dept && r.status == *status)
                            .map_or(0, |r| r.total)
                    })
                    .collect();
                json!({
                    "type": "bar",
                    "name": status,
                    "x": &departments,
                    "y": counts,
                })
            })
            .collect();

        let layout = json!({
            "title": "Attendance Status Distribution per Department",
            "barmode": "group",
            "xaxis": { "title": "Department" },
            "yaxis": { "title": "Events" },
        });

        self.write(
            "status_distribution.html",
            "Status Distribution",
            Value::Array(traces),
            layout,
        )
    }

    async fn shift_lateness(&self) -> Result<PathBuf> {
        let rows = queries::shift_lateness(&self.pool).await?;

        let data = json!([{
            "type": "bar",
            "x": rows.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            "y": rows.iter().map(|r| r.avg_late_minutes).collect::<Vec<_>>(),
            "text": rows.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
        }]);

        let layout = json!({
            "title": "Average Lateness per Shift",
            "xaxis": { "title": "Shift" },
            "yaxis": { "title": "Average late minutes" },
        });

        self.write("shift_lateness.html", "Shift Lateness", data, layout)
    }

    async fn top_late_employees(&self) -> Result<PathBuf> {
        let mut rows = queries::top_late_employees(&self.pool).await?;
        quality::patch_inconsistent_departments(&self.pool, &mut rows).await?;

        let data = json!([{
            "type": "bar",
            "x": rows.iter().map(|r| format!("{} ({})", r.name, r.nip)).collect::<Vec<_>>(),
            "y": rows.iter().map(|r| r.total_late_minutes).collect::<Vec<_>>(),
            "text": rows.iter().map(|r| r.department.as_str()).collect::<Vec<_>>(),
        }]);

        let layout = json!({
            "title": "Top 20 Employees by Total Lateness",
            "xaxis": { "title": "Employee" },
            "yaxis": { "title": "Total late minutes" },
        });

        self.write(
            "top_late_employees.html",
            "Top Late Employees",
            data,
            layout,
        )
    }

    async fn weekday_heatmap(&self) -> Result<PathBuf> {
        let rows = queries::weekday_attendance(&self.pool).await?;

        let mut departments: Vec<&str> = rows.iter().map(|r| r.department.as_str()).collect();
        departments.sort_unstable();
        departments.dedup();

        // One z row per weekday, Monday first; cells without data stay
        // null so plotly leaves a gap instead of plotting zero.
        let z: Vec<Vec<Value>> = WEEKDAYS
            .iter()
            .map(|day| {
                departments
                    .iter()
                    .map(|dept| {
                        rows.iter()
                            .find(|r| r.day_name == *day && r.department == *dept)
                            .and_then(|r| r.attendance_pct)
                            .map_or(Value::Null, |pct| json!(pct))
                    })
                    .collect()
            })
            .collect();

        let data = json!([{
            "type": "heatmap",
            "x": departments,
            "y": WEEKDAYS,
            "z": z,
            "colorbar": { "title": "Attendance %" },
        }]);

        let layout = json!({
            "title": "Attendance % by Weekday and Department",
            "xaxis": { "title": "Department" },
            "yaxis": { "autorange": "reversed" },
        });

        self.write("weekday_heatmap.html", "Weekday Heat Map", data, layout)
    }

    fn write(&self, file: &str, title: &str, data: Value, layout: Value) -> Result<PathBuf> {
        let path = self.out_dir.join(file);
        charts::write_chart(&path, title, &data, &layout)?;
        info!("Report artifact written: {}", path.display());
        Ok(path)
    }
}
