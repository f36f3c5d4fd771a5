// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod recommender;
pub mod scoring;

pub use distance::{haversine_distance, distance_between};
pub use filters::is_recommendable;
pub use recommender::{recommend, Recommender, RecommendationResult, DEFAULT_LIMIT, PARALLEL_THRESHOLD};
pub use scoring::{calculate_job_score, location_points, skill_match_count, work_mode_points, ScoringContext};
