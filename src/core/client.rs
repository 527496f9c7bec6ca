//! Cursor Admin API client
//!
//! One authenticated HTTP channel to the team admin endpoints. Every
//! outbound call goes through [`CursorAdminClient::send`], which turns any
//! transport or HTTP failure into a [`CursorApiError`].

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::error::{ClientError, CursorApiError, ValidationError};
use super::types::{
    DailyUsageData, SpendingData, SpendingOptions, TeamMember, TeamMembersResponse, DAY_MS,
    MAX_USAGE_RANGE_DAYS,
};
use crate::config::ApiConfig;

const NO_RESPONSE_MESSAGE: &str = "No response received from Cursor API";

pub struct CursorAdminClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CursorAdminClient {
    /// Create a client against the production API
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(api_key, &ApiConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: &ApiConfig) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the team's members
    pub async fn get_team_members(&self) -> Result<Vec<TeamMember>, ClientError> {
        let request = self.client.get(self.url("/teams/members"));
        let response: TeamMembersResponse = self.send(request, "get team members").await?;
        Ok(response.team_members)
    }

    /// Fetch per-user daily metrics between two epoch-millisecond instants.
    ///
    /// The range is checked locally first; an invalid range never reaches the network.
    pub async fn get_daily_usage_data(
        &self,
        start_date: i64,
        end_date: i64,
    ) -> Result<DailyUsageData, ClientError> {
        validate_usage_range(start_date, end_date)?;

        let request = self
            .client
            .post(self.url("/teams/daily-usage-data"))
            .json(&json!({
                "startDate": start_date,
                "endDate": end_date,
            }));

        Ok(self.send(request, "get daily usage data").await?)
    }

    /// Fetch per-member spend. `None` sends an empty object.
    pub async fn get_spending_data(
        &self,
        options: Option<&SpendingOptions>,
    ) -> Result<SpendingData, ClientError> {
        let request = self.client.post(self.url("/teams/spend"));
        let request = match options {
            Some(options) => request.json(options),
            None => request.json(&json!({})),
        };

        Ok(self.send(request, "get spending data").await?)
    }

    /// Liveness check. A 401 becomes [`ClientError::InvalidApiKey`].
    pub async fn test_connection(&self) -> Result<bool, ClientError> {
        match self.get_team_members().await {
            Ok(_) => Ok(true),
            Err(ClientError::Api(e)) if e.is_unauthorized() => Err(ClientError::InvalidApiKey),
            Err(e) => Err(e),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticate, send and decode one request
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T, CursorApiError> {
        let request = request.basic_auth(&self.api_key, Some(""));

        let response = request.send().await.map_err(|e| {
            let err = normalize_transport_error(e);
            tracing::warn!("[CursorAdminClient] Failed to {}: {}", operation, err);
            err
        })?;

        let status = response.status();
        tracing::debug!(
            "[CursorAdminClient] {} {} -> {}",
            operation,
            response.url().path(),
            status
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = normalize_error_response(status, &body);
            tracing::warn!(
                "[CursorAdminClient] API returned error status {}: {}",
                err.status_code,
                err.message
            );
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CursorApiError::new(500, format!("Failed to {}: {}", operation, e)))
    }
}

/// Check the daily usage range contract: both bounds non-negative,
/// ordered, and at most 90 days apart (inclusive).
pub fn validate_usage_range(start_date: i64, end_date: i64) -> Result<(), ValidationError> {
    if start_date < 0 {
        return Err(ValidationError::InvalidStartDate);
    }
    if end_date < 0 {
        return Err(ValidationError::InvalidEndDate);
    }
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart);
    }
    if exceeds_max_range(start_date, end_date) {
        return Err(ValidationError::RangeTooLong);
    }
    Ok(())
}

/// True when the span is strictly longer than 90 days
pub fn exceeds_max_range(start_date: i64, end_date: i64) -> bool {
    (end_date as f64 - start_date as f64) / DAY_MS as f64 > MAX_USAGE_RANGE_DAYS as f64
}

/// Failure before any HTTP response arrived
fn normalize_transport_error(err: reqwest::Error) -> CursorApiError {
    if err.is_builder() {
        return CursorApiError::new(0, err.to_string());
    }

    let request = json!({
        "url": err.url().map(|u| u.to_string()),
        "timeout": err.is_timeout(),
        "error": err.to_string(),
    });
    CursorApiError::new(0, NO_RESPONSE_MESSAGE).with_response(request)
}

/// Non-2xx response. Prefers the server's `message` field.
fn normalize_error_response(status: StatusCode, body: &str) -> CursorApiError {
    let data = serde_json::from_str::<Value>(body).ok();

    let message = data
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    let err = CursorApiError::new(status.as_u16(), message);
    match data {
        Some(data) => err.with_response(data),
        None if !body.is_empty() => err.with_response(Value::String(body.to_string())),
        None => err,
    }
}
