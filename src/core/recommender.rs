use rayon::prelude::*;

use crate::models::{JobPosting, ScoredJobPosting, ScoringRules, SeekerProfile};
use crate::core::{
    filters::is_recommendable,
    scoring::{calculate_job_score, ScoringContext},
};

/// Number of results returned when the caller does not ask for a limit
pub const DEFAULT_LIMIT: usize = 20;

/// Candidate count from which jobs are scored on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 512;

/// Result of a recommendation run
#[derive(Debug)]
pub struct RecommendationResult {
    pub jobs: Vec<ScoredJobPosting>,
    pub total_candidates: usize,
}

/// Job recommendation engine
///
/// Stateless: scores every candidate against the seeker, sorts by score
/// (descending, ties keep input order) and truncates.
#[derive(Debug, Clone)]
pub struct Recommender {
    rules: ScoringRules,
    skip_ineligible: bool,
}

impl Recommender {
    pub fn new(rules: ScoringRules) -> Self {
        Self {
            rules,
            skip_ineligible: false,
        }
    }

    pub fn with_default_rules() -> Self {
        Self::new(ScoringRules::default())
    }

    /// Drop inactive and admin-disabled postings before scoring
    pub fn skip_ineligible(mut self, skip: bool) -> Self {
        self.skip_ineligible = skip;
        self
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Rank jobs for a seeker
    ///
    /// # Arguments
    /// * `profile` - The seeker being recommended to
    /// * `jobs` - Candidate postings, expected active and not admin-disabled
    /// * `limit` - Maximum number of jobs to return
    ///
    /// # Returns
    /// RecommendationResult with at most `limit` scored jobs
    pub fn recommend(
        &self,
        profile: &SeekerProfile,
        jobs: Vec<JobPosting>,
        limit: usize,
    ) -> RecommendationResult {
        let total_candidates = jobs.len();
        let context = ScoringContext::new(profile, &self.rules);

        let jobs: Vec<JobPosting> = if self.skip_ineligible {
            jobs.into_iter().filter(is_recommendable).collect()
        } else {
            jobs
        };

        let score = |job: JobPosting| {
            let (score, distance_km) = calculate_job_score(&job, &context, &self.rules);
            ScoredJobPosting { job, score, distance_km }
        };

        // Indexed collect keeps input order, so both paths sort identically
        let mut scored: Vec<ScoredJobPosting> = if jobs.len() >= PARALLEL_THRESHOLD {
            jobs.into_par_iter().map(score).collect()
        } else {
            jobs.into_iter().map(score).collect()
        };

        // Stable: equal scores stay in input order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);

        tracing::debug!(
            "Recommended {} of {} jobs for seeker {}",
            scored.len(),
            total_candidates,
            profile.user_id
        );

        RecommendationResult {
            jobs: scored,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Rank jobs with the default rules
pub fn recommend(profile: &SeekerProfile, jobs: Vec<JobPosting>, limit: usize) -> Vec<ScoredJobPosting> {
    Recommender::default().recommend(profile, jobs, limit).jobs
}
