//! Persistence behind one interface, backed by SQLite or PostgreSQL.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    attendance::{AttendanceFilter, AttendanceRecord, AttendanceStats, NewAttendance},
    employee::{Employee, NewEmployee},
};

pub mod postgres;
pub mod sql;
pub mod sqlite;

pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    EmployeeCode,
    Email,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for {0:?}")]
    Duplicate(DuplicateField),

    #[error("employee not found")]
    EmployeeNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Create tables and indexes if they do not exist yet.
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// All employees, newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, StoreError>;

    /// Returns `false` when no employee has this id. Attendance rows go with it.
    async fn delete_employee(&self, id: i64) -> Result<bool, StoreError>;

    async fn list_attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Zero-filled when the employee code has no marks.
    async fn attendance_stats(&self, employee_code: &str) -> Result<AttendanceStats, StoreError>;

    /// Insert or overwrite the mark for `(employee_id, date)`.
    async fn mark_attendance(&self, mark: &NewAttendance) -> Result<AttendanceRecord, StoreError>;
}
