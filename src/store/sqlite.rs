use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::{sql, Store, StoreError};
use crate::{
    model::{
        attendance::{AttendanceFilter, AttendanceRecord, AttendanceStats, NewAttendance},
        employee::{Employee, NewEmployee},
    },
    utils::db_utils::duplicate_field,
};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl SqliteStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // every connection to :memory: is a fresh database, so keep exactly one alive
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        info!(database_url, "Connected to SQLite");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in sql::SQLITE_SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(sql::LIST_EMPLOYEES)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, StoreError> {
        let result = sqlx::query_as::<_, Employee>(sql::INSERT_EMPLOYEE)
            .bind(&employee.employee_id)
            .bind(&employee.full_name)
            .bind(&employee.email)
            .bind(&employee.department)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(created) => Ok(created),
            Err(e) => match duplicate_field(&e) {
                Some(field) => Err(StoreError::Duplicate(field)),
                None => Err(e.into()),
            },
        }
    }

    async fn delete_employee(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(sql::DELETE_EMPLOYEE)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let (query_sql, bindings) = sql::attendance_query(filter);
        debug!(sql = %query_sql, bindings = ?bindings, "Fetching attendance");

        let mut query = sqlx::query_as::<_, AttendanceRecord>(&query_sql);
        for b in &bindings {
            query = query.bind(b);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn attendance_stats(&self, employee_code: &str) -> Result<AttendanceStats, StoreError> {
        let stats = sqlx::query_as::<_, AttendanceStats>(sql::ATTENDANCE_STATS)
            .bind(employee_code)
            .fetch_one(&self.pool)
            .await?;
        Ok(stats)
    }

    async fn mark_attendance(&self, mark: &NewAttendance) -> Result<AttendanceRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let employee = sqlx::query_scalar::<_, i64>(sql::FIND_EMPLOYEE_BY_CODE)
            .bind(&mark.employee_id)
            .fetch_optional(&mut *tx)
            .await?;
        if employee.is_none() {
            return Err(StoreError::EmployeeNotFound);
        }

        sqlx::query(sql::UPSERT_ATTENDANCE)
            .bind(&mark.employee_id)
            .bind(&mark.date)
            .bind(mark.status.as_ref())
            .execute(&mut *tx)
            .await?;

        let (query_sql, bindings) = sql::attendance_query(&AttendanceFilter {
            employee_id: Some(mark.employee_id.clone()),
            date: Some(mark.date.clone()),
        });
        let mut query = sqlx::query_as::<_, AttendanceRecord>(&query_sql);
        for b in &bindings {
            query = query.bind(b);
        }
        let record = query.fetch_one(&mut *tx).await?;

        tx.commit().await?;
        Ok(record)
    }
}
