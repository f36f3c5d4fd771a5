use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringRules;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
    #[serde(default = "default_jobs_table")]
    pub jobs_table: String,
}

fn default_profiles_table() -> String { "job_seeker_profiles".to_string() }
fn default_jobs_table() -> String { "job_posts".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    #[serde(default)]
    pub skip_ineligible_jobs: bool,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            candidate_limit: default_candidate_limit(),
            skip_ineligible_jobs: false,
        }
    }
}

fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }
fn default_candidate_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_near_km")]
    pub near_km: f64,
    #[serde(default = "default_near_points")]
    pub near_points: u32,
    #[serde(default = "default_mid_km")]
    pub mid_km: f64,
    #[serde(default = "default_mid_points")]
    pub mid_points: u32,
    #[serde(default = "default_within_preferred_points")]
    pub within_preferred_points: u32,
    #[serde(default = "default_preferred_distance_km")]
    pub default_preferred_distance_km: f64,
    #[serde(default = "default_points_per_skill")]
    pub points_per_skill: u32,
    #[serde(default = "default_remote_points")]
    pub remote_points: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            near_km: default_near_km(),
            near_points: default_near_points(),
            mid_km: default_mid_km(),
            mid_points: default_mid_points(),
            within_preferred_points: default_within_preferred_points(),
            default_preferred_distance_km: default_preferred_distance_km(),
            points_per_skill: default_points_per_skill(),
            remote_points: default_remote_points(),
        }
    }
}

impl From<&ScoringSettings> for ScoringRules {
    fn from(settings: &ScoringSettings) -> Self {
        Self {
            near_km: settings.near_km,
            near_points: settings.near_points,
            mid_km: settings.mid_km,
            mid_points: settings.mid_points,
            within_preferred_points: settings.within_preferred_points,
            default_preferred_distance_km: settings.default_preferred_distance_km,
            points_per_skill: settings.points_per_skill,
            remote_points: settings.remote_points,
        }
    }
}

fn default_near_km() -> f64 { 5.0 }
fn default_near_points() -> u32 { 15 }
fn default_mid_km() -> f64 { 20.0 }
fn default_mid_points() -> u32 { 10 }
fn default_within_preferred_points() -> u32 { 5 }
fn default_preferred_distance_km() -> f64 { 50.0 }
fn default_points_per_skill() -> u32 { 5 }
fn default_remote_points() -> u32 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBREC_)
    /// 5. SUPABASE_URL / SUPABASE_ANON_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JOBREC__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("JOBREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_supabase_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("JOBREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_rules(&self) -> ScoringRules {
        ScoringRules::from(&self.scoring)
    }
}

/// Let the standard Supabase variables win over file values
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Ok(anon_key) = env::var("SUPABASE_ANON_KEY") {
        builder = builder.set_override("supabase.anon_key", anon_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_scoring_matches_rules() {
        let rules = ScoringRules::from(&ScoringSettings::default());
        assert_eq!(rules, ScoringRules::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [supabase]
            url = "https://project.supabase.test"
            anon_key = "anon"

            [scoring]
            remote_points = 8
        "#;

        let settings: Settings = Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.supabase.jobs_table, "job_posts");
        assert_eq!(settings.recommendation.default_limit, 20);
        assert_eq!(settings.recommendation.candidate_limit, 100);
        assert!(!settings.recommendation.skip_ineligible_jobs);
        assert_eq!(settings.scoring_rules().remote_points, 8);
        assert_eq!(settings.scoring_rules().near_points, 15);
    }
}
