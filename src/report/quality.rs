use anyhow::{Context, Result};
use sqlx::MySqlPool;
use tracing::warn;

use crate::report::queries::EmployeeLatenessRow;

#[derive(Debug, sqlx::FromRow)]
struct DuplicateNipRow {
    nip: String,
    dup_count: i64,
}

/// Duplicate business keys are a source data-quality condition the
/// dimension builder passes through unchanged; surface them post-load.
pub async fn warn_duplicate_nips(pool: &MySqlPool) -> Result<()> {
    let rows = sqlx::query_as::<_, DuplicateNipRow>(
        "SELECT nip, COUNT(*) AS dup_count FROM dim_employee GROUP BY nip HAVING COUNT(*) > 1",
    )
    .fetch_all(pool)
    .await
    .context("duplicate business key check failed")?;

    for row in &rows {
        warn!(nip = %row.nip, rows = row.dup_count, "duplicate business key in dim_employee");
    }
    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
struct InconsistentDepartmentRow {
    nip: String,
    department_count: i64,
}

/// Detect employees whose fact rows resolve to more than one department
/// and patch the report rows in place with the authoritative value from
/// dim_employee. Display-only; the warehouse itself is not rewritten.
pub async fn patch_inconsistent_departments(
    pool: &MySqlPool,
    rows: &mut [EmployeeLatenessRow],
) -> Result<()> {
    let inconsistent = sqlx::query_as::<_, InconsistentDepartmentRow>(
        r#"
        SELECT e.nip AS nip, COUNT(DISTINCT f.department_id) AS department_count
        FROM fact_attendance f
        JOIN dim_employee e ON f.employee_id = e.id
        GROUP BY e.nip
        HAVING COUNT(DISTINCT f.department_id) > 1
        "#,
    )
    .fetch_all(pool)
    .await
    .context("department consistency check failed")?;

    for finding in &inconsistent {
        warn!(
            nip = %finding.nip,
            departments = finding.department_count,
            "inconsistent department assignment across fact rows"
        );

        let authoritative = sqlx::query_scalar::<_, String>(
            "SELECT department FROM dim_employee WHERE nip = ? ORDER BY id LIMIT 1",
        )
        .bind(&finding.nip)
        .fetch_optional(pool)
        .await
        .context("authoritative department lookup failed")?;

        if let Some(department) = authoritative {
            for row in rows.iter_mut().filter(|r| r.nip == finding.nip) {
                row.department = department.clone();
            }
        }
    }
    Ok(())
}
