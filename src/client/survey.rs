//! Survey backend API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::OrganizationApi;
use super::models::{EvaluationAssignment, Organization, ParentKey};
use crate::error::{ApiError, Result};

/// Organization listing endpoint
const ORGANIZATIONS_PATH: &str = "/api/organizations";

/// Evaluation assignment endpoint
const EVALUATE_PATH: &str = "/api/organizations/evaluate";

/// HTTP client for the survey backend
pub struct SurveyClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl SurveyClient {
    /// Create a client with an explicit requests-per-second limit
    pub fn with_rate_limit(base_url: impl Into<String>, per_second: u32) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a successful response body, or map the failure status
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Map non-success statuses to [`ApiError`]
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl OrganizationApi for SurveyClient {
    async fn list_children(&self, up_code: &ParentKey) -> Result<Vec<Organization>> {
        self.rate_limiter.until_ready().await;

        debug!("GET {} upCode={}", ORGANIZATIONS_PATH, up_code);
        let response = self
            .http
            .get(self.url(ORGANIZATIONS_PATH))
            .query(&[("upCode", up_code.as_str())])
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::read_json(response).await
    }

    async fn assign_evaluation(&self, assignment: &EvaluationAssignment) -> Result<()> {
        self.rate_limiter.until_ready().await;

        debug!(
            "POST {} with {} organizations for period {}",
            EVALUATE_PATH,
            assignment.organization_ids.len(),
            assignment.period_id
        );
        let response = self
            .http
            .post(self.url(EVALUATE_PATH))
            .json(assignment)
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::check_status(response).await?;
        Ok(())
    }
}
