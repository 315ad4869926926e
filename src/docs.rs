use crate::api::attendance::{AttendanceQuery, DateQuery};
use crate::model::attendance::{AttendanceRecord, AttendanceStats, AttendanceStatus};
use crate::model::employee::Employee;
use crate::utils::validation::{AttendancePayload, EmployeePayload};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small human-resources record keeper: employee records and daily attendance.

### Key Features
- **Employee Management**
  - Add, list and delete employees
- **Attendance Management**
  - Mark an employee Present or Absent for a day (re-marking overwrites)
  - Filter attendance by employee or date, and view per-employee totals

### Response Format
- JSON bodies
- Errors are `{error, message}`, or `{error, messages}` for validation failures

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::attendance_stats,
        crate::api::attendance::mark_attendance
    ),
    components(
        schemas(
            Employee,
            EmployeePayload,
            AttendanceRecord,
            AttendanceStats,
            AttendanceStatus,
            AttendancePayload,
            AttendanceQuery,
            DateQuery
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
