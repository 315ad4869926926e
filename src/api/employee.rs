use crate::{
    error::ApiError,
    model::employee::Employee,
    store::Store,
    utils::validation::{EmployeePayload, validate_employee},
};
use actix_web::{HttpResponse, web};
use tracing::{debug, info};

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [Employee]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Internal Server Error",
            "message": "Failed to fetch employees"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let employees = store
        .list_employees()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch employees"))?;

    debug!(count = employees.len(), "Fetched employees");
    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Validation Error",
            "messages": ["Invalid email format"]
        })),
        (status = 409, description = "Employee ID or email already in use", body = Object, example = json!({
            "error": "Duplicate Email",
            "message": "An employee with this email already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn Store>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    let new_employee = validate_employee(&payload).map_err(ApiError::Validation)?;

    let employee = store
        .create_employee(&new_employee)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to add employee"))?;

    info!(id = employee.id, employee_id = %employee.employee_id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// Delete Employee
///
/// Attendance marks of the employee are deleted with it.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee id")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 400, description = "Id is not a number", body = Object, example = json!({
            "error": "Invalid ID",
            "message": "Employee ID must be a valid number"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Not Found",
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn Store>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let deleted = store
        .delete_employee(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete employee"))?;

    if !deleted {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    info!(id, "Employee deleted");
    Ok(HttpResponse::NoContent().finish())
}
