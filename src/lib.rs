//! Job Board Recommend - job recommendation service for the job board app
//!
//! This library provides the scoring engine that ranks active job postings for
//! a job seeker by distance, skill overlap and work mode, plus the thin HTTP and
//! Supabase glue that serves it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{recommend, Recommender, RecommendationResult, distance::haversine_distance};
pub use models::{SeekerProfile, JobPosting, WorkMode, ScoredJobPosting, ScoringRules};
