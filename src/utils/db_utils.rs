use crate::store::DuplicateField;

/// ===============================
/// Placeholder rewriting
/// ===============================
///
/// Queries are written once with `?` placeholders. PostgreSQL wants `$1, $2, ...`,
/// so this rewrites every `?` outside a quoted literal to its 1-based position.
pub fn numbered_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut index = 0usize;
    let mut quote: Option<char> = None;

    for c in sql.chars() {
        match (quote, c) {
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                out.push(c);
            }
            (Some(q), c) if c == q => {
                quote = None;
                out.push(c);
            }
            (None, '?') => {
                index += 1;
                out.push('$');
                out.push_str(&index.to_string());
            }
            _ => out.push(c),
        }
    }

    out
}

/// ===============================
/// Unique violation classification
/// ===============================
///
/// Maps a unique-constraint failure on `employees` to the offending column.
/// PostgreSQL reports the constraint name; SQLite only names the column in
/// the message (`UNIQUE constraint failed: employees.email`).
pub fn duplicate_field(err: &sqlx::Error) -> Option<DuplicateField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };

    if !db_err.is_unique_violation() {
        return None;
    }

    let haystack = match db_err.constraint() {
        Some(constraint) => constraint.to_string(),
        None => db_err.message().to_string(),
    };

    classify(&haystack)
}

fn classify(haystack: &str) -> Option<DuplicateField> {
    if haystack.contains("employee_id") {
        Some(DuplicateField::EmployeeCode)
    } else if haystack.contains("email") {
        Some(DuplicateField::Email)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sql;

    #[test]
    fn rewrites_placeholders_in_order() {
        let sql = "SELECT * FROM attendance WHERE employee_id = ? AND date = ?";
        assert_eq!(
            numbered_placeholders(sql),
            "SELECT * FROM attendance WHERE employee_id = $1 AND date = $2"
        );
    }

    #[test]
    fn leaves_quoted_question_marks_alone() {
        let sql = "SELECT '?' AS q, status FROM attendance WHERE status = ? AND date = ?";
        assert_eq!(
            numbered_placeholders(sql),
            "SELECT '?' AS q, status FROM attendance WHERE status = $1 AND date = $2"
        );
    }

    #[test]
    fn sql_without_placeholders_is_unchanged() {
        let sql = "SELECT COUNT(*) FROM employees";
        assert_eq!(numbered_placeholders(sql), sql);
    }

    #[test]
    fn store_queries_rewrite_for_postgres() {
        let upsert = numbered_placeholders(sql::UPSERT_ATTENDANCE);
        assert!(upsert.contains("VALUES ($1, $2, $3)"));
        assert!(!upsert.contains('?'));

        let stats = numbered_placeholders(sql::ATTENDANCE_STATS);
        assert!(stats.contains("status = 'Present'"));
        assert!(stats.contains("status = 'Absent'"));
        assert!(stats.trim_end().ends_with("WHERE employee_id = $1"));
        assert!(!stats.contains("$2"));

        let insert = numbered_placeholders(sql::INSERT_EMPLOYEE);
        assert!(insert.contains("VALUES ($1, $2, $3, $4)"));
    }

    #[test]
    fn classifies_sqlite_messages() {
        assert_eq!(
            classify("UNIQUE constraint failed: employees.employee_id"),
            Some(DuplicateField::EmployeeCode)
        );
        assert_eq!(
            classify("UNIQUE constraint failed: employees.email"),
            Some(DuplicateField::Email)
        );
    }

    #[test]
    fn classifies_postgres_constraints() {
        assert_eq!(
            classify("employees_employee_id_key"),
            Some(DuplicateField::EmployeeCode)
        );
        assert_eq!(classify("employees_email_key"), Some(DuplicateField::Email));
        assert_eq!(classify("employees_pkey"), None);
    }
}
