use crate::{
    api::{attendance, employee, health},
    config::Config,
    error::ApiError,
    utils::validation::{AttendancePayload, EmployeePayload, validate_attendance, validate_employee},
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpRequest, HttpResponse, Resource, error::JsonPayloadError, middleware::Condition, web,
};
use std::sync::Arc;
use tracing::debug;

pub type ApiLimiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP limiter for the API scope. Build it once and clone it into each
/// worker so the quota is shared.
pub fn build_limiter(requests_per_min: u32) -> ApiLimiter {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Arc::new(Governor::new(&cfg))
}

/// Bodies are parsed as JSON whatever the content type. An empty body goes
/// through validation as an empty form, so the client gets the list of
/// required fields; anything else unparseable is a plain 400.
fn json_config(empty_body: fn() -> Vec<String>) -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(move |err, _req| match err {
            JsonPayloadError::Deserialize(e) if e.is_eof() && e.line() == 1 && e.column() == 0 => {
                ApiError::Validation(empty_body()).into()
            }
            err => {
                debug!(error = %err, "rejected request body");
                ApiError::BadRequest("Request body must be valid JSON".to_string()).into()
            }
        })
}

fn empty_employee() -> Vec<String> {
    validate_employee(&EmployeePayload::default()).err().unwrap_or_default()
}

fn empty_attendance() -> Vec<String> {
    validate_attendance(&AttendancePayload::default()).err().unwrap_or_default()
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| ApiError::InvalidId.into())
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(format!(
        "Cannot {} {}",
        req.method(),
        req.path()
    )))
}

/// Resource whose unsupported methods fall through to [`not_found`].
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(not_found))
}

/// `limiter` is applied only when `config.rate_api_per_min` is non-zero.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: ApiLimiter) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Condition::new(config.rate_api_per_min > 0, limiter))
            .app_data(path_config())
            .service(resource("/health").route(web::get().to(health::health)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        resource("")
                            .app_data(json_config(empty_employee))
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        resource("/{id}").route(web::delete().to(employee::delete_employee)),
                    )
                    .default_service(web::to(not_found)),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        resource("")
                            .app_data(json_config(empty_attendance))
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::mark_attendance)),
                    )
                    // /attendance/employee/{employee_id}
                    .service(
                        resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    )
                    // /attendance/stats/{employee_id}
                    .service(
                        resource("/stats/{employee_id}")
                            .route(web::get().to(attendance::attendance_stats)),
                    )
                    .default_service(web::to(not_found)),
            ),
    );
}
