use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl TryFrom<String> for AttendanceStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An attendance mark joined with the employee's name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP001",
        "full_name": "John Doe",
        "date": "2026-01-05",
        "status": "Present",
        "created_at": "2026-01-05T09:00:00Z"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    /// Null when the employee row is gone
    #[schema(example = "John Doe", nullable = true)]
    pub full_name: Option<String>,

    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: String,

    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,

    #[schema(
        example = "2026-01-05T09:00:00Z",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceStats {
    #[schema(example = 20)]
    pub total_days: i64,
    #[schema(example = 18)]
    pub present_days: i64,
    #[schema(example = 2)]
    pub absent_days: i64,
}

/// A validated attendance mark ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: String,
    pub status: AttendanceStatus,
}

/// Exact-match filters for attendance listings. `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date: Option<String>,
}
