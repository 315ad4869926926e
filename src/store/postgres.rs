use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tracing::{debug, info};

use super::{sql, Store, StoreError};
use crate::{
    model::{
        attendance::{AttendanceFilter, AttendanceRecord, AttendanceStats, NewAttendance},
        employee::{Employee, NewEmployee},
    },
    utils::db_utils::{duplicate_field, numbered_placeholders},
};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// `ssl`: `Some(true)` requires TLS, `Some(false)` disables it, `None`
    /// keeps whatever the URL asks for.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        ssl: Option<bool>,
    ) -> Result<Self, sqlx::Error> {
        let mut options = PgConnectOptions::from_str(database_url)?;
        match ssl {
            Some(true) => options = options.ssl_mode(PgSslMode::Require),
            Some(false) => options = options.ssl_mode(PgSslMode::Disable),
            None => {}
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        info!("Connected to PostgreSQL");

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in sql::POSTGRES_SCHEMA {
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
        let insert_sql = numbered_placeholders(sql::INSERT_EMPLOYEE);
        let result = sqlx::query_as::<_, Employee>(&insert_sql)
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
        let delete_sql = numbered_placeholders(sql::DELETE_EMPLOYEE);
        let result = sqlx::query(&delete_sql)
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
        let query_sql = numbered_placeholders(&query_sql);
        debug!(sql = %query_sql, bindings = ?bindings, "Fetching attendance");

        let mut query = sqlx::query_as::<_, AttendanceRecord>(&query_sql);
        for b in &bindings {
            query = query.bind(b);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn attendance_stats(&self, employee_code: &str) -> Result<AttendanceStats, StoreError> {
        let stats_sql = numbered_placeholders(sql::ATTENDANCE_STATS);
        let stats = sqlx::query_as::<_, AttendanceStats>(&stats_sql)
            .bind(employee_code)
            .fetch_one(&self.pool)
            .await?;
        Ok(stats)
    }

    async fn mark_attendance(&self, mark: &NewAttendance) -> Result<AttendanceRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let find_sql = numbered_placeholders(sql::FIND_EMPLOYEE_BY_CODE);
        let employee = sqlx::query_scalar::<_, i64>(&find_sql)
            .bind(&mark.employee_id)
            .fetch_optional(&mut *tx)
            .await?;
        if employee.is_none() {
            return Err(StoreError::EmployeeNotFound);
        }

        let upsert_sql = numbered_placeholders(sql::UPSERT_ATTENDANCE);
        sqlx::query(&upsert_sql)
            .bind(&mark.employee_id)
            .bind(&mark.date)
            .bind(mark.status.as_ref())
            .execute(&mut *tx)
            .await?;

        let (query_sql, bindings) = sql::attendance_query(&AttendanceFilter {
            employee_id: Some(mark.employee_id.clone()),
            date: Some(mark.date.clone()),
        });
        let query_sql = numbered_placeholders(&query_sql);
        let mut query = sqlx::query_as::<_, AttendanceRecord>(&query_sql);
        for b in &bindings {
            query = query.bind(b);
        }
        let record = query.fetch_one(&mut *tx).await?;

        tx.commit().await?;
        Ok(record)
    }
}
