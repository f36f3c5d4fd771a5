use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::core::Recommender;
use crate::models::{ErrorResponse, HealthResponse, RecommendRequest};
use crate::services::SupabaseClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub recommender: Recommender,
    pub limits: RecommendationSettings,
}

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/jobs/recommendations", web::get().to(recommend_jobs_query))
        .route("/jobs/recommendations", web::post().to(recommend_jobs_body));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommended jobs for the authenticated seeker
///
/// GET /api/v1/jobs/recommendations?limit=20
async fn recommend_jobs_query(
    state: web::Data<AppState>,
    query: web::Query<RecommendRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    recommend_jobs(&state, query.into_inner(), &http_req).await
}

/// Recommended jobs for the authenticated seeker
///
/// POST /api/v1/jobs/recommendations
///
/// Request body (optional):
/// ```json
/// { "limit": 20 }
/// ```
///
/// An empty body means defaults; anything else must be a valid request.
async fn recommend_jobs_body(
    state: web::Data<AppState>,
    body: web::Bytes,
    http_req: HttpRequest,
) -> HttpResponse {
    let req = match parse_body(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::info!("Invalid JSON body on {}: {}", http_req.path(), e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_json",
                format!("Invalid JSON: {}", e),
                400,
            ));
        }
    };

    recommend_jobs(&state, req, &http_req).await
}

fn parse_body(body: &[u8]) -> Result<RecommendRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecommendRequest::default());
    }
    serde_json::from_slice(body)
}

async fn recommend_jobs(state: &AppState, req: RecommendRequest, http_req: &HttpRequest) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(state.limits.default_limit)
        .min(state.limits.max_limit);

    let Some(token) = bearer_token(http_req) else {
        return unauthorized();
    };

    let user = match state.supabase.get_user(token).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized(),
        Err(e) => {
            tracing::warn!("Failed to resolve user from token: {}", e);
            return unauthorized();
        }
    };

    tracing::info!("Recommending jobs for user: {}, limit: {}", user.id, limit);

    let profile = match state.supabase.get_seeker_profile(token, &user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            tracing::info!("No seeker profile for user {}", user.id);
            return profile_not_found();
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user.id, e);
            return profile_not_found();
        }
    };

    let jobs = match state
        .supabase
        .list_active_jobs(token, state.limits.candidate_limit)
        .await
    {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!("Failed to list jobs for {}: {}", user.id, e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Failed to list jobs",
                e.to_string(),
                400,
            ));
        }
    };

    let result = state.recommender.recommend(&profile, jobs, limit);

    tracing::info!(
        "Returning {} jobs for user {} (from {} candidates)",
        result.jobs.len(),
        user.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(result.jobs)
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        "Unauthorized",
        "A valid access token is required",
        401,
    ))
}

fn profile_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "Profile not found",
        "No job seeker profile exists for this user",
        404,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap().limit, None);
        assert_eq!(parse_body(b"  \n").unwrap().limit, None);
        assert_eq!(parse_body(br#"{"limit": 5}"#).unwrap().limit, Some(5));
        assert_eq!(parse_body(b"{}").unwrap().limit, None);

        assert!(parse_body(b"not json").is_err());
        assert!(parse_body(br#"{"limit": -1}"#).is_err());
        assert!(parse_body(br#"{"limit": 70000}"#).is_err());
        assert!(parse_body(br#"{"limit": "abc"}"#).is_err());
    }
}
