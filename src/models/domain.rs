use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Preferred distance used when a seeker never set one
pub const DEFAULT_PREFERRED_DISTANCE_KM: f64 = 50.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point only when both halves are present and finite
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Self { latitude, longitude })
            }
            _ => None,
        }
    }
}

/// Job seeker profile as stored in `job_seeker_profiles`
///
/// Fields decode leniently: a malformed column reads as missing instead of
/// failing the row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeekerProfile {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub preferred_distance: Option<f64>,
}

impl SeekerProfile {
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }

    /// Preferred distance in km, falling back to `default_km` when unset
    ///
    /// Zero and non-finite values count as unset. Negative values are kept,
    /// which leaves only the fixed 5 km and 20 km tiers.
    pub fn preferred_distance_or(&self, default_km: f64) -> f64 {
        match self.preferred_distance {
            Some(km) if km.is_finite() && km != 0.0 => km,
            _ => default_km,
        }
    }
}

/// How a job is worked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Onsite,
    Remote,
    Hybrid,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Onsite => "onsite",
            WorkMode::Remote => "remote",
            WorkMode::Hybrid => "hybrid",
        }
    }

    /// Exact, case-sensitive match on the stored value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "onsite" => Some(WorkMode::Onsite),
            "remote" => Some(WorkMode::Remote),
            "hybrid" => Some(WorkMode::Hybrid),
            _ => None,
        }
    }
}

/// Job posting as stored in `job_posts`
///
/// The row is kept exactly as fetched so it serializes back unchanged. The
/// columns used for scoring are read through accessors that treat a
/// malformed value as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPosting {
    attributes: Map<String, Value>,
}

static NULL: Value = Value::Null;

impl JobPosting {
    /// Minimal posting with only an id
    pub fn new(id: impl Into<Value>) -> Self {
        Self::default().with_attribute("id", id)
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Set whichever coordinate halves are known
    pub fn with_coordinates(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        if let Some(latitude) = latitude {
            self = self.with_attribute("latitude", latitude);
        }
        if let Some(longitude) = longitude {
            self = self.with_attribute("longitude", longitude);
        }
        self
    }

    pub fn with_location(self, latitude: f64, longitude: f64) -> Self {
        self.with_coordinates(Some(latitude), Some(longitude))
    }

    pub fn with_skills<S: AsRef<str>>(self, skills: &[S]) -> Self {
        let skills: Vec<Value> = skills.iter().map(|s| Value::from(s.as_ref())).collect();
        self.with_attribute("skills", skills)
    }

    pub fn with_work_mode(self, mode: WorkMode) -> Self {
        self.with_attribute("work_mode", mode.as_str())
    }

    /// Identifier as stored (string, number or null)
    pub fn id(&self) -> &Value {
        self.attributes.get("id").unwrap_or(&NULL)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Missing or non-boolean reads as active
    pub fn is_active(&self) -> bool {
        self.get("is_active").and_then(Value::as_bool).unwrap_or(true)
    }

    /// Missing or non-boolean reads as not disabled
    pub fn admin_disabled(&self) -> bool {
        self.get("admin_disabled").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(
            self.get("latitude").and_then(Value::as_f64),
            self.get("longitude").and_then(Value::as_f64),
        )
    }

    /// String entries of `skills`; anything other than an array reads as empty
    pub fn skills(&self) -> Vec<&str> {
        match self.get("skills") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn work_mode(&self) -> Option<WorkMode> {
        self.get("work_mode").and_then(Value::as_str).and_then(WorkMode::parse)
    }

    pub fn is_remote(&self) -> bool {
        self.work_mode() == Some(WorkMode::Remote)
    }
}

impl From<Map<String, Value>> for JobPosting {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => String::new(),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(skill) => Some(skill),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A job posting with its computed relevance
///
/// Serializes as the job's row plus `score` and `distance_km`, which replace
/// any columns of the same name.
#[derive(Debug, Clone)]
pub struct ScoredJobPosting {
    pub job: JobPosting,
    pub score: u32,
    pub distance_km: f64,
}

impl Serialize for ScoredJobPosting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.job.attributes() {
            if key != "score" && key != "distance_km" {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("score", &self.score)?;
        map.serialize_entry("distance_km", &self.distance_km)?;
        map.end()
    }
}

/// Points awarded by the scoring engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRules {
    pub near_km: f64,
    pub near_points: u32,
    pub mid_km: f64,
    pub mid_points: u32,
    pub within_preferred_points: u32,
    pub default_preferred_distance_km: f64,
    pub points_per_skill: u32,
    pub remote_points: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            near_km: 5.0,
            near_points: 15,
            mid_km: 20.0,
            mid_points: 10,
            within_preferred_points: 5,
            default_preferred_distance_km: DEFAULT_PREFERRED_DISTANCE_KM,
            points_per_skill: 5,
            remote_points: 5,
        }
    }
}
