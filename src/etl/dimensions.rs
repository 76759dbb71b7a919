use std::collections::HashMap;

use crate::model::warehouse::{DepartmentDim, EmployeeDim, ShiftDim};
use crate::model::{Department, Employee, Shift};

/// Trim + uppercase. Applied to every dimension text field before
/// surrogate keys are assigned, so joins on those fields are case and
/// whitespace insensitive.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Employee dimension plus its business-key lookup. Duplicate nips pass
/// through with distinct surrogate ids; the lookup keeps the first
/// occurrence and the post-load quality check warns.
pub struct EmployeeDimension {
    pub rows: Vec<EmployeeDim>,
    by_nip: HashMap<String, usize>,
}

impl EmployeeDimension {
    pub fn lookup(&self, nip: &str) -> Option<&EmployeeDim> {
        self.by_nip.get(&normalize(nip)).map(|&idx| &self.rows[idx])
    }
}

pub struct ShiftDimension {
    pub rows: Vec<ShiftDim>,
    by_code: HashMap<String, usize>,
}

impl ShiftDimension {
    pub fn lookup(&self, code: &str) -> Option<&ShiftDim> {
        self.by_code.get(&normalize(code)).map(|&idx| &self.rows[idx])
    }
}

pub struct DepartmentDimension {
    pub rows: Vec<DepartmentDim>,
    by_name: HashMap<String, usize>,
}

impl DepartmentDimension {
    pub fn id_for(&self, name: &str) -> Option<u64> {
        self.by_name.get(&normalize(name)).map(|&idx| self.rows[idx].id)
    }
}

pub fn build_employee_dim(employees: &[Employee]) -> EmployeeDimension {
    let mut rows = Vec::with_capacity(employees.len());
    let mut by_nip = HashMap::with_capacity(employees.len());

    for (idx, emp) in employees.iter().enumerate() {
        let row = EmployeeDim {
            id: idx as u64 + 1,
            nip: normalize(&emp.nip),
            name: normalize(&emp.name),
            department: normalize(&emp.department),
            job_title: normalize(&emp.job_title),
            employment_status: normalize(&emp.employment_status),
            join_date: emp.join_date,
        };
        by_nip.entry(row.nip.clone()).or_insert(idx);
        rows.push(row);
    }

    EmployeeDimension { rows, by_nip }
}

pub fn build_shift_dim(shifts: &[Shift]) -> ShiftDimension {
    let mut rows = Vec::with_capacity(shifts.len());
    let mut by_code = HashMap::with_capacity(shifts.len());

    for (idx, shift) in shifts.iter().enumerate() {
        let row = ShiftDim {
            id: idx as u64 + 1,
            code: normalize(&shift.code),
            start_time: shift.start_time,
            end_time: shift.end_time,
            description: normalize(&shift.description),
        };
        by_code.entry(row.code.clone()).or_insert(idx);
        rows.push(row);
    }

    ShiftDimension { rows, by_code }
}

pub fn build_department_dim(departments: &[Department]) -> DepartmentDimension {
    let mut rows = Vec::with_capacity(departments.len());
    let mut by_name = HashMap::with_capacity(departments.len());

    for (idx, dept) in departments.iter().enumerate() {
        let row = DepartmentDim {
            id: idx as u64 + 1,
            name: normalize(&dept.name),
            location: normalize(&dept.location),
        };
        by_name.entry(row.name.clone()).or_insert(idx);
        rows.push(row);
    }

    DepartmentDimension { rows, by_name }
}
