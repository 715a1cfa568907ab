use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::types::{ApiStatus, SynthesisRequest, SynthesisResponse};
use crate::cache::{MemoryResultCache, ResultCache};
use crate::config::{ApiConfig, Config, RequestConfig};
use crate::demo::DemoGenerator;
use crate::error::{ApiError, ApiResult};

/// Client for the synthesis API.
///
/// Submission is fail-open: any failure of the single outbound call is
/// replaced by a demo response and never reaches the caller. Fetching a
/// result by id is not: failures are returned as [`ApiError`].
#[derive(Clone)]
pub struct SynthesisClient {
    client: Client,
    base_url: String,
    request_config: RequestConfig,
    cache: Arc<dyn ResultCache>,
    generator: Arc<Mutex<DemoGenerator>>,
}

impl SynthesisClient {
    /// Create a new synthesis client
    pub fn new(
        config: &ApiConfig,
        request_config: RequestConfig,
        cache: Arc<dyn ResultCache>,
        generator: DemoGenerator,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(request_config.timeout())
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_config,
            cache,
            generator: Arc::new(Mutex::new(generator)),
        })
    }

    /// Client with an in-memory session cache and a generator built from
    /// `config.demo`.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(
            &config.api,
            config.request.clone(),
            Arc::new(MemoryResultCache::new()),
            DemoGenerator::from_config(&config.demo),
        )
    }

    /// Submit a synthesis request.
    ///
    /// Makes one attempt with the configured timeout and no retries. On
    /// network errors, timeouts, non-2xx statuses or undecodable bodies a
    /// demo response is generated instead. Either way a completed or failed
    /// response is cached under its `request_id` before being returned.
    pub async fn submit(&self, request: &SynthesisRequest) -> SynthesisResponse {
        let url = format!("{}/api/v1/synthesize", self.base_url);
        let start = Instant::now();

        let response = match self.execute_submit(&url, request).await {
            Ok(response) => {
                info!(
                    request_id = %response.request_id,
                    latency_ms = start.elapsed().as_millis(),
                    "Synthesis request succeeded"
                );
                response
            }
            Err(e) => {
                warn!(
                    error = %e,
                    latency_ms = start.elapsed().as_millis(),
                    desired_trait = %request.desired_trait,
                    "Synthesis API unavailable, using demo response"
                );
                self.generator.lock().await.generate(request)
            }
        };

        self.remember(&response).await;
        response
    }

    /// Fetch the service status. Failures are returned, not masked.
    pub async fn get_status(&self) -> ApiResult<ApiStatus> {
        let url = format!("{}/api/v1/status", self.base_url);
        let status = self.get_json::<ApiStatus>(&url).await?;
        debug!(status = %status.status, "Fetched API status");
        Ok(status)
    }

    /// Resolve a result by id: the cache first, then
    /// `GET /api/v1/results/{id}`. A fetched result is cached once its
    /// status is terminal, so polling a running job keeps reaching the API.
    pub async fn get_result(&self, request_id: &str) -> ApiResult<SynthesisResponse> {
        match self.cache.get(request_id).await {
            Ok(Some(response)) => {
                debug!(request_id = %request_id, "Result cache hit");
                return Ok(response);
            }
            Ok(None) => debug!(request_id = %request_id, "Result cache miss"),
            Err(e) => warn!(request_id = %request_id, error = %e, "Result cache unavailable"),
        }

        let url = self.result_url(request_id)?;
        let start = Instant::now();

        match self.get_json::<SynthesisResponse>(url).await {
            Ok(response) => {
                info!(
                    request_id = %request_id,
                    latency_ms = start.elapsed().as_millis(),
                    "Fetched synthesis result"
                );
                self.remember(&response).await;
                Ok(response)
            }
            Err(ApiError::Api { status: 404, .. }) => {
                error!(request_id = %request_id, "Synthesis result not found");
                Err(ApiError::NotFound {
                    request_id: request_id.to_string(),
                })
            }
            Err(e) => {
                error!(request_id = %request_id, error = %e, "Failed to fetch synthesis result");
                Err(e)
            }
        }
    }

    /// Emergency substitute for a result that could not be resolved. Not
    /// cached.
    pub async fn emergency_record(&self, request_id: &str) -> SynthesisResponse {
        self.generator.lock().await.emergency(request_id)
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session cache backing this client.
    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    // Only terminal records: the cache is write-once and a pending entry
    // would shadow the finished job.
    async fn remember(&self, response: &SynthesisResponse) {
        if !response.status.is_terminal() {
            debug!(request_id = %response.request_id, status = %response.status, "Result not final, not cached");
            return;
        }
        if let Err(e) = self
            .cache
            .put(&response.request_id, response.clone())
            .await
        {
            debug!(request_id = %response.request_id, error = %e, "Result not cached");
        }
    }

    /// `{base}/api/v1/results/{id}` with the id as one encoded path segment.
    fn result_url(&self, request_id: &str) -> ApiResult<Url> {
        let invalid = |message: String| ApiError::InvalidRequest { message };
        let mut url = Url::parse(&format!("{}/api/v1/results", self.base_url))
            .map_err(|e| invalid(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("Base URL cannot have a path: {}", self.base_url)))?
            .push(request_id);
        Ok(url)
    }

    async fn execute_submit(
        &self,
        url: &str,
        request: &SynthesisRequest,
    ) -> ApiResult<SynthesisResponse> {
        debug!(
            host_organism = %request.host_organism,
            desired_trait = %request.desired_trait,
            optimize = request.optimize,
            safety_check = request.safety_check,
            "Calling synthesis API"
        );

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: impl reqwest::IntoUrl) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::decode(response).await
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_ms: self.request_config.timeout_ms,
            }
        } else {
            ApiError::Http(e)
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                message: format!("Failed to parse response: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
        };

        let client = SynthesisClient::new(
            &config,
            RequestConfig::default(),
            Arc::new(MemoryResultCache::new()),
            DemoGenerator::seeded(1),
        );
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_result_url_encodes_request_id() {
        let config = ApiConfig {
            base_url: "http://localhost:8000".to_string(),
        };
        let client = SynthesisClient::new(
            &config,
            RequestConfig::default(),
            Arc::new(MemoryResultCache::new()),
            DemoGenerator::seeded(1),
        )
        .unwrap();

        let url = client.result_url("../status?x=1").unwrap();
        assert_eq!(url.path(), "/api/v1/results/..%2Fstatus%3Fx=1");
        assert!(url.query().is_none());

        let url = client.result_url("job-1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/results/job-1");
    }
}
