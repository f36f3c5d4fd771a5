// Unit tests for the scoring components

use jobboard_recommend::core::{
    distance::haversine_distance,
    scoring::{calculate_job_score, location_points, normalize_skills, skill_match_count, ScoringContext},
};
use jobboard_recommend::models::{JobPosting, ScoringRules, SeekerProfile, WorkMode};

fn seeker_at(lat: f64, lon: f64) -> SeekerProfile {
    SeekerProfile {
        user_id: "seeker".to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
        skills: vec![],
        preferred_distance: None,
    }
}

/// Longitude offset on the equator that is `km` away from the origin
fn equator_lon_for(km: f64) -> f64 {
    (km / 6371.0).to_degrees()
}

fn job_at(lat: Option<f64>, lon: Option<f64>) -> JobPosting {
    JobPosting::new("job")
        .with_coordinates(lat, lon)
        .with_work_mode(WorkMode::Onsite)
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_nyc_to_la() {
    let distance = haversine_distance(40.7128, -74.0060, 34.0522, -118.2437);
    assert!((distance - 3944.0).abs() < 100.0, "Expected ~3944km, got {}", distance);
}

#[test]
fn test_tier_boundaries() {
    let rules = ScoringRules::default();

    assert_eq!(location_points(5.0, 50.0, &rules), 15);
    assert_eq!(location_points(5.0001, 50.0, &rules), 10);
    assert_eq!(location_points(20.0001, 50.0, &rules), 5);
    assert_eq!(location_points(50.0001, 50.0, &rules), 0);
}

#[test]
fn test_tiers_from_coordinates() {
    let rules = ScoringRules::default();
    let context = ScoringContext::new(&seeker_at(0.0, 0.0), &rules);

    let cases: [(f64, u32); 7] = [(4.9, 15), (5.0001, 10), (19.9, 10), (20.0001, 5), (49.9, 5), (50.0001, 0), (400.0, 0)];

    for (km, expected) in cases {
        let job = job_at(Some(0.0), Some(equator_lon_for(km)));
        let (score, distance) = calculate_job_score(&job, &context, &rules);

        assert!((distance - km).abs() < 1e-6, "Expected {}km, got {}", km, distance);
        assert_eq!(score, expected, "Wrong location points at {}km", km);
    }
}

#[test]
fn test_custom_preferred_distance() {
    let rules = ScoringRules::default();
    let mut seeker = seeker_at(0.0, 0.0);
    seeker.preferred_distance = Some(100.0);
    let context = ScoringContext::new(&seeker, &rules);

    let job = job_at(Some(0.0), Some(equator_lon_for(80.0)));
    assert_eq!(calculate_job_score(&job, &context, &rules).0, 5);
}

#[test]
fn test_missing_job_coordinate() {
    let rules = ScoringRules::default();
    let context = ScoringContext::new(&seeker_at(0.0, 0.0), &rules);

    let job = job_at(Some(0.0), None);
    assert_eq!(calculate_job_score(&job, &context, &rules), (0, 0.0));
}

#[test]
fn test_skill_matching_is_case_insensitive() {
    let seeker = normalize_skills(&["Python".to_string()]);
    let job = vec!["python".to_string(), "python".to_string()];

    // The job list is not deduplicated: both entries count
    assert_eq!(skill_match_count(&seeker, &job), 2);

    let rules = ScoringRules::default();
    let mut profile = SeekerProfile::default();
    profile.skills = vec!["Python".to_string()];
    let context = ScoringContext::new(&profile, &rules);

    let posting = JobPosting::new("py").with_skills(&job);
    assert_eq!(calculate_job_score(&posting, &context, &rules).0, 10);
}

#[test]
fn test_duplicate_seeker_skills_count_once() {
    let seeker = normalize_skills(&["SQL".to_string(), "sql".to_string()]);
    let job = vec!["Sql".to_string()];

    assert_eq!(skill_match_count(&seeker, &job), 1);
}

#[test]
fn test_custom_rules() {
    let rules = ScoringRules {
        points_per_skill: 3,
        remote_points: 0,
        ..ScoringRules::default()
    };
    let mut profile = SeekerProfile::default();
    profile.skills = vec!["go".to_string()];
    let context = ScoringContext::new(&profile, &rules);

    let job = JobPosting::new("go")
        .with_skills(&["Go"])
        .with_work_mode(WorkMode::Remote);

    assert_eq!(calculate_job_score(&job, &context, &rules).0, 3);
}
