use crate::{
    error::ApiError,
    model::attendance::{AttendanceFilter, AttendanceRecord, AttendanceStats},
    store::Store,
    utils::validation::{AttendancePayload, validate_attendance},
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[schema(example = "EMP001")]
    /// Filter by employee code
    pub employee_id: Option<String>,
    #[schema(example = "2026-01-05")]
    /// Filter by exact date (YYYY-MM-DD)
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DateQuery {
    #[schema(example = "2026-01-05")]
    /// Filter by exact date (YYYY-MM-DD)
    pub date: Option<String>,
}

// empty query values mean "no filter"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// List attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance marks, latest date first", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Internal Server Error",
            "message": "Failed to fetch attendance"
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<dyn Store>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let filter = AttendanceFilter {
        employee_id: non_empty(query.employee_id),
        date: non_empty(query.date),
    };

    let records = store
        .list_attendance(&filter)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch attendance"))?;

    Ok(HttpResponse::Ok().json(records))
}

/// Attendance of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee code"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Attendance marks of the employee", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = AttendanceFilter {
        employee_id: Some(path.into_inner()),
        date: non_empty(query.into_inner().date),
    };

    let records = store
        .list_attendance(&filter)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch attendance"))?;

    Ok(HttpResponse::Ok().json(records))
}

/// Attendance totals of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/stats/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee code")
    ),
    responses(
        (status = 200, description = "Day counts, zero when nothing is marked", body = AttendanceStats),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Internal Server Error",
            "message": "Failed to fetch stats"
        }))
    ),
    tag = "Attendance"
)]
pub async fn attendance_stats(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_code = path.into_inner();

    let stats = store
        .attendance_stats(&employee_code)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch stats"))?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Mark attendance
///
/// Marking the same employee twice on one date overwrites the status.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Attendance stored", body = AttendanceRecord),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Validation Error",
            "messages": ["Date must be in YYYY-MM-DD format"]
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Not Found",
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    store: web::Data<dyn Store>,
    payload: web::Json<AttendancePayload>,
) -> Result<HttpResponse, ApiError> {
    let mark = validate_attendance(&payload).map_err(ApiError::Validation)?;

    let record = store
        .mark_attendance(&mark)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to mark attendance"))?;

    info!(
        employee_id = %record.employee_id,
        date = %record.date,
        status = %record.status,
        "Attendance marked"
    );
    Ok(HttpResponse::Created().json(record))
}
