//! Queries shared by both backends, written with `?` placeholders.

use crate::model::attendance::AttendanceFilter;

pub const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id TEXT UNIQUE NOT NULL,
        full_name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        department TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id TEXT NOT NULL,
        date TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('Present', 'Absent')),
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (employee_id, date),
        FOREIGN KEY (employee_id) REFERENCES employees (employee_id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_employee ON attendance (employee_id)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance (date)",
];

pub const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id BIGSERIAL PRIMARY KEY,
        employee_id TEXT UNIQUE NOT NULL,
        full_name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        department TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id BIGSERIAL PRIMARY KEY,
        employee_id TEXT NOT NULL,
        date TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('Present', 'Absent')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (employee_id, date),
        FOREIGN KEY (employee_id) REFERENCES employees (employee_id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_employee ON attendance (employee_id)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance (date)",
];

pub const LIST_EMPLOYEES: &str = r#"
    SELECT id, employee_id, full_name, email, department, created_at
    FROM employees
    ORDER BY created_at DESC, id DESC
"#;

pub const INSERT_EMPLOYEE: &str = r#"
    INSERT INTO employees (employee_id, full_name, email, department)
    VALUES (?, ?, ?, ?)
    RETURNING id, employee_id, full_name, email, department, created_at
"#;

pub const DELETE_EMPLOYEE: &str = "DELETE FROM employees WHERE id = ?";

pub const FIND_EMPLOYEE_BY_CODE: &str = "SELECT id FROM employees WHERE employee_id = ?";

pub const UPSERT_ATTENDANCE: &str = r#"
    INSERT INTO attendance (employee_id, date, status)
    VALUES (?, ?, ?)
    ON CONFLICT (employee_id, date) DO UPDATE SET status = excluded.status
"#;

pub const ATTENDANCE_STATS: &str = r#"
    SELECT
        COUNT(*) AS total_days,
        COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0) AS present_days,
        COALESCE(SUM(CASE WHEN status = 'Absent' THEN 1 ELSE 0 END), 0) AS absent_days
    FROM attendance
    WHERE employee_id = ?
"#;

const SELECT_ATTENDANCE: &str = r#"
    SELECT a.id, a.employee_id, e.full_name, a.date, a.status, a.created_at
    FROM attendance a
    LEFT JOIN employees e ON a.employee_id = e.employee_id
"#;

/// Attendance listing with the filter's conditions and their bindings, in order.
pub fn attendance_query(filter: &AttendanceFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if let Some(employee_id) = &filter.employee_id {
        conditions.push("a.employee_id = ?");
        bindings.push(employee_id.clone());
    }

    if let Some(date) = &filter.date {
        conditions.push("a.date = ?");
        bindings.push(date.clone());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "{} {} ORDER BY a.date DESC, a.created_at DESC, a.id DESC",
        SELECT_ATTENDANCE, where_clause
    );

    (sql, bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_attendance_has_no_where_clause() {
        let (sql, bindings) = attendance_query(&AttendanceFilter::default());
        assert!(!sql.contains("WHERE"));
        assert!(bindings.is_empty());
    }

    #[test]
    fn filters_bind_in_condition_order() {
        let filter = AttendanceFilter {
            employee_id: Some("EMP001".into()),
            date: Some("2026-01-05".into()),
        };
        let (sql, bindings) = attendance_query(&filter);
        assert!(sql.contains("WHERE a.employee_id = ? AND a.date = ?"));
        assert_eq!(bindings, vec!["EMP001", "2026-01-05"]);
    }

    #[test]
    fn date_only_filter() {
        let filter = AttendanceFilter {
            employee_id: None,
            date: Some("2026-01-05".into()),
        };
        let (sql, bindings) = attendance_query(&filter);
        assert!(sql.contains("WHERE a.date = ?"));
        assert!(!sql.contains("a.employee_id = ?"));
        assert_eq!(bindings, vec!["2026-01-05"]);
    }
}
