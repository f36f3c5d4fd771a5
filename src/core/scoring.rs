use std::collections::HashSet;

use crate::models::{GeoPoint, JobPosting, ScoringRules, SeekerProfile};
use crate::core::distance::distance_between;

/// Seeker-side inputs prepared once per recommendation run
#[derive(Debug, Clone)]
pub struct ScoringContext {
    location: Option<GeoPoint>,
    skills: HashSet<String>,
    preferred_distance_km: f64,
}

impl ScoringContext {
    pub fn new(profile: &SeekerProfile, rules: &ScoringRules) -> Self {
        Self {
            location: profile.location(),
            skills: normalize_skills(&profile.skills),
            preferred_distance_km: profile.preferred_distance_or(rules.default_preferred_distance_km),
        }
    }

    pub fn preferred_distance_km(&self) -> f64 {
        self.preferred_distance_km
    }
}

/// Calculate the relevance score of a job for a seeker
///
/// Scoring formula:
/// score = (
///     location_points +            # 15 / 10 / 5 / 0 by distance tier
///     5 * matching_skills +        # case-insensitive, job list not deduped
///     remote_points                # flat 5 for remote jobs
/// )
///
/// Returns the score and the distance in km (0 when either location is unknown).
pub fn calculate_job_score(
    job: &JobPosting,
    context: &ScoringContext,
    rules: &ScoringRules,
) -> (u32, f64) {
    let (location_score, distance_km) = match distance_between(context.location, job.location()) {
        Some(distance_km) => (
            location_points(distance_km, context.preferred_distance_km, rules),
            distance_km,
        ),
        None => (0, 0.0),
    };

    let skill_score = skill_match_count(&context.skills, &job.skills()) as u32 * rules.points_per_skill;

    let mode_score = work_mode_points(job, rules);

    (location_score + skill_score + mode_score, distance_km)
}

/// Points for a known distance; first matching tier wins
///
/// Jobs past the preferred distance get nothing but are not excluded.
#[inline]
pub fn location_points(distance_km: f64, preferred_distance_km: f64, rules: &ScoringRules) -> u32 {
    if distance_km <= rules.near_km {
        rules.near_points
    } else if distance_km <= rules.mid_km {
        rules.mid_points
    } else if distance_km <= preferred_distance_km {
        rules.within_preferred_points
    } else {
        0
    }
}

/// Lowercased skill set
pub fn normalize_skills(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Count job skills the seeker has
///
/// Every entry of the job's list is checked on its own, so a skill the job
/// lists twice counts twice.
#[inline]
pub fn skill_match_count<S: AsRef<str>>(seeker_skills: &HashSet<String>, job_skills: &[S]) -> usize {
    job_skills
        .iter()
        .filter(|skill| seeker_skills.contains(&skill.as_ref().to_lowercase()))
        .count()
}

/// Flat bonus for remote jobs
///
/// Seekers have no work-mode preference yet, so every seeker gets it.
#[inline]
pub fn work_mode_points(job: &JobPosting, rules: &ScoringRules) -> u32 {
    if job.is_remote() {
        rules.remote_points
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkMode;

    fn create_test_profile(skills: &[&str]) -> SeekerProfile {
        SeekerProfile {
            user_id: "seeker".to_string(),
            latitude: Some(0.0),
            longitude: Some(0.0),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            preferred_distance: None,
        }
    }

    fn create_test_job(lat: Option<f64>, lon: Option<f64>, skills: &[&str], mode: WorkMode) -> JobPosting {
        JobPosting::new("job")
            .with_coordinates(lat, lon)
            .with_skills(skills)
            .with_work_mode(mode)
    }

    #[test]
    fn test_location_tiers() {
        let rules = ScoringRules::default();

        assert_eq!(location_points(0.0, 50.0, &rules), 15);
        assert_eq!(location_points(5.0, 50.0, &rules), 15);
        assert_eq!(location_points(5.0001, 50.0, &rules), 10);
        assert_eq!(location_points(20.0, 50.0, &rules), 10);
        assert_eq!(location_points(20.0001, 50.0, &rules), 5);
        assert_eq!(location_points(50.0, 50.0, &rules), 5);
        assert_eq!(location_points(50.0001, 50.0, &rules), 0);
    }

    #[test]
    fn test_preferred_distance_below_mid_tier() {
        // A 10 km preference does not shrink the fixed 20 km tier
        let rules = ScoringRules::default();
        assert_eq!(location_points(15.0, 10.0, &rules), 10);
        assert_eq!(location_points(25.0, 10.0, &rules), 0);
    }

    #[test]
    fn test_skill_match_counts_duplicates() {
        let seeker = normalize_skills(&["Python".to_string()]);
        let job = ["python", "PYTHON", "rust"];

        assert_eq!(skill_match_count(&seeker, &job), 2);
    }

    #[test]
    fn test_calculate_job_score() {
        let rules = ScoringRules::default();
        let profile = create_test_profile(&["sql"]);
        let context = ScoringContext::new(&profile, &rules);

        let job = create_test_job(Some(0.0), Some(0.03), &["SQL", "excel"], WorkMode::Onsite);
        let (score, distance) = calculate_job_score(&job, &context, &rules);

        assert_eq!(score, 20);
        assert!((distance - 3.336).abs() < 0.01, "got {}", distance);
    }

    #[test]
    fn test_remote_job_without_location() {
        let rules = ScoringRules::default();
        let profile = create_test_profile(&[]);
        let context = ScoringContext::new(&profile, &rules);

        let job = create_test_job(None, None, &[], WorkMode::Remote);
        assert_eq!(calculate_job_score(&job, &context, &rules), (5, 0.0));
    }

    #[test]
    fn test_hybrid_gets_no_bonus() {
        let rules = ScoringRules::default();
        let job = create_test_job(None, None, &[], WorkMode::Hybrid);
        assert_eq!(work_mode_points(&job, &rules), 0);
    }
}
