use crate::models::{JobPosting, SeekerProfile};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Authenticated user as returned by `/auth/v1/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Table names in the Supabase database
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub profiles: String,
    pub jobs: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            profiles: "job_seeker_profiles".to_string(),
            jobs: "job_posts".to_string(),
        }
    }
}

/// Supabase REST client
///
/// Every call runs with the caller's access token so row-level security
/// applies exactly as it would for the app itself:
/// - Resolving the authenticated user
/// - Fetching the seeker profile
/// - Listing active job postings
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        anon_key: String,
        tables: SupabaseTables,
        timeout: Duration,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client,
            tables,
        })
    }

    fn authorized(&self, request: RequestBuilder, access_token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }

    /// Resolve the user behind an access token
    ///
    /// Returns `Ok(None)` when the token is rejected.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, SupabaseError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .authorized(self.client.get(&url), access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                return Err(SupabaseError::ApiError(format!(
                    "Failed to fetch user: {}",
                    status
                )));
            }
            _ => {}
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse user: {}", e)))?;

        Ok(Some(user))
    }

    /// Fetch the seeker profile owned by `user_id`
    pub async fn get_seeker_profile(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Option<SeekerProfile>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&user_id=eq.{}&limit=1",
            self.base_url,
            self.tables.profiles,
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching seeker profile from: {}", url);

        let response = self
            .authorized(self.client.get(&url), access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let profiles: Vec<SeekerProfile> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        Ok(profiles.into_iter().next())
    }

    /// List active, non-disabled job postings
    pub async fn list_active_jobs(
        &self,
        access_token: &str,
        limit: usize,
    ) -> Result<Vec<JobPosting>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&is_active=eq.true&admin_disabled=eq.false&limit={}",
            self.base_url, self.tables.jobs, limit
        );

        let response = self
            .authorized(self.client.get(&url), access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to list jobs: {}",
                response.status()
            )));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse jobs: {}", e)))?;

        let total_rows = rows.len();
        let jobs: Vec<JobPosting> = rows
            .into_iter()
            .filter_map(|row| match row {
                Value::Object(attributes) => Some(JobPosting::from(attributes)),
                other => {
                    tracing::warn!("Skipping job row that is not an object: {}", other);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} active jobs ({} rows)", jobs.len(), total_rows);

        Ok(jobs)
    }
}
