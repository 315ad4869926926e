use hrms_lite::{
    model::{
        attendance::{AttendanceFilter, AttendanceStatus, NewAttendance},
        employee::NewEmployee,
    },
    store::{DuplicateField, SqliteStore, Store, StoreError},
};
use tempfile::tempdir;

fn new_employee(code: &str, email: &str) -> NewEmployee {
    NewEmployee {
        employee_id: code.to_string(),
        full_name: format!("Employee {code}"),
        email: email.to_string(),
        department: "Operations".to_string(),
    }
}

fn mark(code: &str, date: &str, status: AttendanceStatus) -> NewAttendance {
    NewAttendance {
        employee_id: code.to_string(),
        date: date.to_string(),
        status,
    }
}

#[actix_web::test]
async fn file_database_survives_reconnect_and_reinit() {
    let dir = tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("hrms.db").display());

    {
        let store = SqliteStore::connect(&url, 2).await.expect("connect");
        store.init_schema().await.expect("init schema");
        store
            .create_employee(&new_employee("EMP001", "one@example.com"))
            .await
            .expect("create");
        store
            .mark_attendance(&mark("EMP001", "2026-03-02", AttendanceStatus::Present))
            .await
            .expect("mark");
    }

    let store = SqliteStore::connect(&url, 2).await.expect("reconnect");
    // running the schema again must not disturb existing rows
    store.init_schema().await.expect("re-init schema");

    let employees = store.list_employees().await.expect("list");
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].employee_id, "EMP001");

    let records = store
        .list_attendance(&AttendanceFilter::default())
        .await
        .expect("attendance");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Present);
    assert_eq!(records[0].full_name.as_deref(), Some("Employee EMP001"));
}

#[actix_web::test]
async fn store_reports_duplicates_and_missing_employees() {
    let store = SqliteStore::connect("sqlite::memory:", 1).await.expect("connect");
    store.init_schema().await.expect("init schema");

    store
        .create_employee(&new_employee("EMP001", "one@example.com"))
        .await
        .expect("create");

    let err = store
        .create_employee(&new_employee("EMP001", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(DuplicateField::EmployeeCode)));

    let err = store
        .create_employee(&new_employee("EMP002", "one@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(DuplicateField::Email)));

    let err = store
        .mark_attendance(&mark("EMP404", "2026-03-02", AttendanceStatus::Absent))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EmployeeNotFound));

    assert!(!store.delete_employee(9999).await.expect("delete"));
}

#[actix_web::test]
async fn upsert_overwrites_status() {
    let store = SqliteStore::connect("sqlite::memory:", 1).await.expect("connect");
    store.init_schema().await.expect("init schema");
    store
        .create_employee(&new_employee("EMP001", "one@example.com"))
        .await
        .expect("create");

    let first = store
        .mark_attendance(&mark("EMP001", "2026-03-02", AttendanceStatus::Present))
        .await
        .expect("first mark");
    let second = store
        .mark_attendance(&mark("EMP001", "2026-03-02", AttendanceStatus::Absent))
        .await
        .expect("second mark");

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, AttendanceStatus::Absent);

    let stats = store.attendance_stats("EMP001").await.expect("stats");
    assert_eq!(stats.total_days, 1);
    assert_eq!(stats.present_days, 0);
    assert_eq!(stats.absent_days, 1);
}
