use anyhow::{Context, Result};
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::info;

use crate::etl::WarehouseTables;
use crate::model::warehouse::{AttendanceFact, DepartmentDim, EmployeeDim, ShiftDim, TimeDim};

/// Handle over the warehouse connection pool. Constructed by the
/// pipeline entrypoint and passed in explicitly; there is no shared
/// module-level engine.
pub struct Warehouse {
    pool: MySqlPool,
}

impl Warehouse {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Replace all five tables with the freshly built ones inside one
    /// transaction.
    ///
    /// Replacement order does not match dependency order, so foreign
    /// key checks are off for the duration of the multi-table write.
    /// The setting is per-session rather than transactional: it must be
    /// restored on the same connection before commit or rollback.
    pub async fn load(&self, tables: &WarehouseTables) -> Result<()> {
        info!("Loading data into data warehouse...");

        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to open warehouse load transaction")?;

        sqlx::query("SET FOREIGN_KEY_CHECKS=0")
            .execute(&mut *tx)
            .await?;
        let written = write_tables(&mut tx, tables).await;
        sqlx::query("SET FOREIGN_KEY_CHECKS=1")
            .execute(&mut *tx)
            .await?;
        written?;

        tx.commit()
            .await
            .context("failed to commit warehouse load")?;
        info!("Data loading completed successfully");
        Ok(())
    }
}

async fn write_tables(tx: &mut Transaction<'_, MySql>, tables: &WarehouseTables) -> Result<()> {
    replace_dim_employee(tx, &tables.employees).await?;
    replace_dim_time(tx, &tables.time).await?;
    replace_dim_shift(tx, &tables.shifts).await?;
    replace_dim_department(tx, &tables.departments).await?;
    replace_fact_attendance(tx, &tables.facts).await?;
    Ok(())
}

async fn replace_dim_employee(tx: &mut Transaction<'_, MySql>, rows: &[EmployeeDim]) -> Result<()> {
    info!("Loading dim_employee...");
    sqlx::query("DROP TABLE IF EXISTS dim_employee")
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE dim_employee (
            id BIGINT UNSIGNED NOT NULL PRIMARY KEY,
            nip VARCHAR(32) NOT NULL,
            name VARCHAR(128) NOT NULL,
            department VARCHAR(64) NOT NULL,
            job_title VARCHAR(64) NOT NULL,
            employment_status VARCHAR(32) NOT NULL,
            join_date DATE NOT NULL
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;

    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO dim_employee
            (id, nip, name, department, job_title, employment_status, join_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.id)
        .bind(&row.nip)
        .bind(&row.name)
        .bind(&row.department)
        .bind(&row.job_title)
        .bind(&row.employment_status)
        .bind(row.join_date)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn replace_dim_time(tx: &mut Transaction<'_, MySql>, rows: &[TimeDim]) -> Result<()> {
    info!("Loading dim_time...");
    sqlx::query("DROP TABLE IF EXISTS dim_time")
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE dim_time (
            id BIGINT UNSIGNED NOT NULL PRIMARY KEY,
            date DATE NOT NULL,
            day_name VARCHAR(16) NOT NULL,
            month_name VARCHAR(16) NOT NULL,
            year INT NOT NULL,
            is_workday BOOLEAN NOT NULL,
            quarter INT UNSIGNED NOT NULL
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;

    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO dim_time
            (id, date, day_name, month_name, year, is_workday, quarter)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.id)
        .bind(row.date)
        .bind(&row.day_name)
        .bind(&row.month_name)
        .bind(row.year)
        .bind(row.is_workday)
        .bind(row.quarter)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn replace_dim_shift(tx: &mut Transaction<'_, MySql>, rows: &[ShiftDim]) -> Result<()> {
    info!("Loading dim_shift...");
    sqlx::query("DROP TABLE IF EXISTS dim_shift")
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE dim_shift (
            id BIGINT UNSIGNED NOT NULL PRIMARY KEY,
            code VARCHAR(16) NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            description VARCHAR(64) NOT NULL
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;

    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO dim_shift (id, code, start_time, end_time, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.id)
        .bind(&row.code)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(&row.description)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn replace_dim_department(
    tx: &mut Transaction<'_, MySql>,
    rows: &[DepartmentDim],
) -> Result<()> {
    info!("Loading dim_department...");
    sqlx::query("DROP TABLE IF EXISTS dim_department")
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE dim_department (
            id BIGINT UNSIGNED NOT NULL PRIMARY KEY,
            name VARCHAR(64) NOT NULL,
            location VARCHAR(64) NOT NULL
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;

    for row in rows {
        sqlx::query("INSERT INTO dim_department (id, name, location) VALUES (?, ?, ?)")
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.location)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn replace_fact_attendance(
    tx: &mut Transaction<'_, MySql>,
    rows: &[AttendanceFact],
) -> Result<()> {
    info!("Loading fact_attendance...");
    sqlx::query("DROP TABLE IF EXISTS fact_attendance")
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE fact_attendance (
            id BIGINT UNSIGNED NOT NULL PRIMARY KEY,
            employee_id BIGINT UNSIGNED NOT NULL,
            time_id BIGINT UNSIGNED NOT NULL,
            shift_id BIGINT UNSIGNED NOT NULL,
            department_id BIGINT UNSIGNED NOT NULL,
            status VARCHAR(16) NOT NULL,
            clock_in TIME NULL,
            clock_out TIME NULL,
            late_minutes INT UNSIGNED NULL,
            overtime_minutes INT UNSIGNED NULL,
            FOREIGN KEY (employee_id) REFERENCES dim_employee (id),
            FOREIGN KEY (time_id) REFERENCES dim_time (id),
            FOREIGN KEY (shift_id) REFERENCES dim_shift (id),
            FOREIGN KEY (department_id) REFERENCES dim_department (id)
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;

    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO fact_attendance
            (id, employee_id, time_id, shift_id, department_id,
             status, clock_in, clock_out, late_minutes, overtime_minutes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.id)
        .bind(row.employee_id)
        .bind(row.time_id)
        .bind(row.shift_id)
        .bind(row.department_id)
        .bind(&row.status)
        .bind(row.clock_in)
        .bind(row.clock_out)
        .bind(row.late_minutes)
        .bind(row.overtime_minutes)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
