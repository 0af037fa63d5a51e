//! Tubular Labs HTTP client.

use std::fmt;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tubetrend_models::{TrendPoint, VideoDetail, VideoId};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::normalize::{normalize_details, normalize_rate_limits, normalize_trends, RateLimitDetails};
use crate::request::{build_detail_request, TrendSearchRequest};

pub const DEFAULT_BASE_URL: &str = "https://tubularlabs.com/api/";

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "Api-Key";

pub const TRENDS_ENDPOINT: &str = "v3.1/video.trends";
pub const VIDEO_SEARCH_ENDPOINT: &str = "v3/video.search";
pub const RATE_LIMIT_ENDPOINT: &str = "v3/rate_limit.details";

/// Configuration for the analytics client.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root; endpoint paths are joined onto it
    pub base_url: Url,
    /// Static API key
    pub api_key: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    /// Create a config, normalizing the base URL to end with `/`.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> ClientResult<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| ClientError::config(format!("invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Create config from environment variables.
    ///
    /// `TUBULAR_API_KEY` is required; `TUBULAR_BASE_URL` defaults to the
    /// public API root.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("TUBULAR_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ClientError::config("TUBULAR_API_KEY is not set"))?;
        let base_url =
            std::env::var("TUBULAR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::new(&base_url, api_key)
    }
}

/// Client for the analytics API.
///
/// Every call is a single POST: no retries, no rate-limit handling, and
/// only the transport's default timeouts.
pub struct TubularClient {
    http: Client,
    config: ClientConfig,
}

impl TubularClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().build().map_err(ClientError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint_url(&self, endpoint: &str) -> ClientResult<Url> {
        self.config
            .base_url
            .join(endpoint)
            .map_err(|e| ClientError::config(format!("invalid endpoint '{}': {}", endpoint, e)))
    }

    /// POST a JSON payload and parse the JSON body.
    ///
    /// Non-2xx statuses fail with [`ClientError::Http`] carrying the body.
    pub async fn post<P>(&self, endpoint: &str, payload: &P) -> ClientResult<Value>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint)?;
        let body = serde_json::to_value(payload)?;
        debug!(url = %url, payload = %body, "POST to analytics API");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(value)
    }

    /// Run a trend search and flatten the result into points.
    pub async fn fetch_trends(&self, request: &TrendSearchRequest) -> ClientResult<Vec<TrendPoint>> {
        let response = self.post(TRENDS_ENDPOINT, request).await?;
        let points = normalize_trends(&response)?;
        debug!(points = points.len(), "Normalized trend response");
        Ok(points)
    }

    /// Look up metadata for one video. An unknown id yields an empty list.
    pub async fn fetch_video_details(&self, video_id: &VideoId) -> ClientResult<Vec<VideoDetail>> {
        let request = build_detail_request(video_id);
        let response = self.post(VIDEO_SEARCH_ENDPOINT, &request).await?;
        normalize_details(&response)
    }

    /// Current API allowance.
    pub async fn rate_limit_details(&self) -> ClientResult<RateLimitDetails> {
        let response = self.post(RATE_LIMIT_ENDPOINT, &serde_json::json!({})).await?;
        normalize_rate_limits(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::build_trend_request;
    use chrono::NaiveDate;
    use serde_json::json;
    use tubetrend_models::{DateRange, SearchTerms};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> TubularClient {
        TubularClient::new(ClientConfig::new(&server.uri(), "test-key").unwrap()).unwrap()
    }

    fn trend_request() -> TrendSearchRequest {
        let terms: SearchTerms = ["rust"].into_iter().collect();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        build_trend_request(&terms, range)
    }

    #[test]
    fn test_config_normalizes_base_url() {
        let config = ClientConfig::new("https://tubularlabs.com/api", "k").unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(ClientConfig::new("not a url", "k").is_err());
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, "super-secret").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_post_sends_api_key_and_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3.1/video.trends"))
            .and(header("Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "trends": [{
                    "id": "abc",
                    "platform": "youtube",
                    "points": [{ "date": "2024-01-01", "views": 100, "engagements": 2 }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let points = client.fetch_trends(&trend_request()).await.unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].views, 100);
    }

    #[tokio::test]
    async fn test_post_non_success_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_trends(&trend_request()).await.unwrap_err();

        match err {
            ClientError::Http { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post(TRENDS_ENDPOINT, &json!({})).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_fetch_video_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/video.search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "videos": [{
                    "video_id": { "id": "abc" },
                    "title": "Stream VOD",
                    "duration": 5400,
                    "publish_date": "2024-01-01",
                    "thumbnail_url": "https://i.ytimg.com/vi/abc/default.jpg",
                    "video_url": "https://www.youtube.com/watch?v=abc",
                    "video_was_live": true
                }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let details = client.fetch_video_details(&VideoId::from("abc")).await.unwrap();

        assert_eq!(details.len(), 1);
        assert!(details[0].was_live);

        let received = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["query"]["include_filter"]["video_gids"], json!(["ytv_abc"]));
    }

    #[tokio::test]
    async fn test_rate_limit_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/rate_limit.details"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rate_limits": { "Concurrency": { "remaining": 2 } }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let details = client.rate_limit_details().await.unwrap();
        assert_eq!(details.concurrency_remaining, 2);
    }
}
