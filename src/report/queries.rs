use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::MySqlPool;

/// One department-month of the monthly summary.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MonthlySummaryRow {
    pub month_year: String,
    pub year: i32,
    pub department: String,
    pub total_events: i64,
    pub present: i64,
    pub late: i64,
    pub avg_late_minutes: Option<f64>,
    pub avg_overtime_minutes: Option<f64>,
    pub attendance_pct: Option<f64>,
}

pub async fn monthly_summary(pool: &MySqlPool) -> Result<Vec<MonthlySummaryRow>> {
    let sql = r#"
        SELECT
            CONCAT(w.month_name, ' ', w.year) AS month_year,
            w.year AS year,
            d.name AS department,
            COUNT(*) AS total_events,
            COUNT(CASE WHEN f.status = 'Hadir' THEN 1 END) AS present,
            COUNT(CASE WHEN f.status = 'Terlambat' THEN 1 END) AS late,
            CAST(ROUND(AVG(f.late_minutes), 1) AS DOUBLE) AS avg_late_minutes,
            CAST(ROUND(AVG(f.overtime_minutes), 1) AS DOUBLE) AS avg_overtime_minutes,
            CAST(ROUND(
                COUNT(CASE WHEN f.status IN ('Hadir', 'Terlambat') THEN 1 END) / COUNT(*) * 100,
                2
            ) AS DOUBLE) AS attendance_pct
        FROM fact_attendance f
        JOIN dim_time w ON f.time_id = w.id
        JOIN dim_department d ON f.department_id = d.id
        GROUP BY w.year, w.month_name, d.name
        ORDER BY w.year, MIN(w.date), d.name
    "#;

    sqlx::query_as::<_, MonthlySummaryRow>(sql)
        .fetch_all(pool)
        .await
        .context("monthly summary query failed")
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct StatusCountRow {
    pub department: String,
    pub status: String,
    pub total: i64,
}

pub async fn status_distribution(pool: &MySqlPool) -> Result<Vec<StatusCountRow>> {
    let sql = r#"
        SELECT d.name AS department, f.status AS status, COUNT(*) AS total
        FROM fact_attendance f
        JOIN dim_department d ON f.department_id = d.id
        GROUP BY d.name, f.status
        ORDER BY d.name, f.status
    "#;

    sqlx::query_as::<_, StatusCountRow>(sql)
        .fetch_all(pool)
        .await
        .context("status distribution query failed")
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ShiftLatenessRow {
    pub code: String,
    pub description: String,
    pub avg_late_minutes: Option<f64>,
}

/// Average lateness per shift over rows where a lateness measure exists
/// (attended rows; on-time arrivals contribute zeroes).
pub async fn shift_lateness(pool: &MySqlPool) -> Result<Vec<ShiftLatenessRow>> {
    let sql = r#"
        SELECT
            s.code AS code,
            s.description AS description,
            CAST(AVG(f.late_minutes) AS DOUBLE) AS avg_late_minutes
        FROM fact_attendance f
        JOIN dim_shift s ON f.shift_id = s.id
        GROUP BY s.code, s.description
        ORDER BY avg_late_minutes DESC
    "#;

    sqlx::query_as::<_, ShiftLatenessRow>(sql)
        .fetch_all(pool)
        .await
        .context("shift lateness query failed")
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EmployeeLatenessRow {
    pub nip: String,
    pub name: String,
    pub department: String,
    pub total_late_minutes: i64,
}

/// Top 20 employees by accumulated lateness. The department column is
/// resolved through the fact rows, so it can disagree with dim_employee
/// when the source data is inconsistent; the quality check patches it
/// before display.
pub async fn top_late_employees(pool: &MySqlPool) -> Result<Vec<EmployeeLatenessRow>> {
    let sql = r#"
        SELECT
            e.nip AS nip,
            e.name AS name,
            MAX(d.name) AS department,
            CAST(COALESCE(SUM(f.late_minutes), 0) AS SIGNED) AS total_late_minutes
        FROM fact_attendance f
        JOIN dim_employee e ON f.employee_id = e.id
        JOIN dim_department d ON f.department_id = d.id
        GROUP BY e.nip, e.name
        ORDER BY total_late_minutes DESC
        LIMIT 20
    "#;

    sqlx::query_as::<_, EmployeeLatenessRow>(sql)
        .fetch_all(pool)
        .await
        .context("top late employees query failed")
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct HeatmapRow {
    pub day_name: String,
    pub department: String,
    pub attendance_pct: Option<f64>,
}

pub async fn weekday_attendance(pool: &MySqlPool) -> Result<Vec<HeatmapRow>> {
    let sql = r#"
        SELECT
            w.day_name AS day_name,
            d.name AS department,
            CAST(ROUND(
                COUNT(CASE WHEN f.status IN ('Hadir', 'Terlambat') THEN 1 END) / COUNT(*) * 100,
                2
            ) AS DOUBLE) AS attendance_pct
        FROM fact_attendance f
        JOIN dim_time w ON f.time_id = w.id
        JOIN dim_department d ON f.department_id = d.id
        GROUP BY w.day_name, d.name
        ORDER BY d.name
    "#;

    sqlx::query_as::<_, HeatmapRow>(sql)
        .fetch_all(pool)
        .await
        .context("weekday attendance query failed")
}
