// Route exports
pub mod jobs;

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .configure(jobs::configure),
    );
}

/// Answer malformed query strings with the JSON error shape
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        "invalid_query",
        format!("Invalid query: {}", err),
        400,
    ));
    error::InternalError::from_response(err, response).into()
}
