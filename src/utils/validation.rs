use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::{
    attendance::{AttendanceStatus, NewAttendance},
    employee::NewEmployee,
};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Accepts any JSON value; anything but a string becomes `None` and is then
/// reported like a missing field.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// Raw employee form. Every field is optional so that missing fields are
/// reported alongside the other problems instead of failing deserialization.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EmployeePayload {
    #[schema(example = "EMP001")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub employee_id: Option<String>,
    #[schema(example = "John Doe")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub full_name: Option<String>,
    #[schema(example = "john.doe@company.com", format = "email")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[schema(example = "Engineering")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub department: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AttendancePayload {
    #[schema(example = "EMP001")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub employee_id: Option<String>,
    #[schema(example = "2026-01-05", format = "date")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub date: Option<String>,
    #[schema(example = "Present")]
    #[serde(default, deserialize_with = "string_or_none")]
    pub status: Option<String>,
}

fn required_text(
    value: Option<&str>,
    missing: &str,
    empty: &str,
    errors: &mut Vec<String>,
) -> String {
    match value {
        None | Some("") => {
            errors.push(missing.to_string());
            String::new()
        }
        Some(v) if v.trim().is_empty() => {
            errors.push(empty.to_string());
            String::new()
        }
        Some(v) => v.trim().to_string(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// `YYYY-MM-DD` and an actual calendar day (rejects `2026-02-30`).
pub fn is_valid_date(date: &str) -> bool {
    DATE_REGEX.is_match(date) && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

pub fn validate_employee(payload: &EmployeePayload) -> Result<NewEmployee, Vec<String>> {
    let mut errors = Vec::new();

    let employee_id = required_text(
        payload.employee_id.as_deref(),
        "Employee ID is required",
        "Employee ID cannot be empty",
        &mut errors,
    );
    let full_name = required_text(
        payload.full_name.as_deref(),
        "Full name is required",
        "Full name cannot be empty",
        &mut errors,
    );

    let email = match payload.email.as_deref() {
        None | Some("") => {
            errors.push("Email is required".to_string());
            String::new()
        }
        Some(v) if !is_valid_email(v.trim()) => {
            errors.push("Invalid email format".to_string());
            String::new()
        }
        Some(v) => v.trim().to_lowercase(),
    };

    let department = required_text(
        payload.department.as_deref(),
        "Department is required",
        "Department cannot be empty",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewEmployee {
        employee_id,
        full_name,
        email,
        department,
    })
}

pub fn validate_attendance(payload: &AttendancePayload) -> Result<NewAttendance, Vec<String>> {
    let mut errors = Vec::new();

    let employee_id = match payload.employee_id.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push("Employee ID is required".to_string());
            String::new()
        }
    };

    let date = match payload.date.as_deref() {
        None | Some("") => {
            errors.push("Date is required".to_string());
            String::new()
        }
        Some(v) if !is_valid_date(v.trim()) => {
            errors.push("Date must be in YYYY-MM-DD format".to_string());
            String::new()
        }
        Some(v) => v.trim().to_string(),
    };

    // exact match only, "present" is rejected
    let status = payload
        .status
        .as_deref()
        .and_then(|s| s.parse::<AttendanceStatus>().ok());
    if status.is_none() {
        errors.push("Status must be either Present or Absent".to_string());
    }

    match status {
        Some(status) if errors.is_empty() => Ok(NewAttendance {
            employee_id,
            date,
            status,
        }),
        _ => Err(errors),
    }
}
