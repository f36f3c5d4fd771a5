// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeoPoint, SeekerProfile, JobPosting, WorkMode, ScoredJobPosting, ScoringRules, DEFAULT_PREFERRED_DISTANCE_KM};
pub use requests::RecommendRequest;
pub use responses::{HealthResponse, ErrorResponse};
