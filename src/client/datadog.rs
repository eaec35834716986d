//! Datadog API client implementation

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use flate2::Compression;
use flate2::write::{GzEncoder, ZlibEncoder};
use log::{debug, trace, warn};
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, USER_AGENT,
};
use reqwest::{Client as HttpClient, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::models::ContentEncoding;
use super::rate_limit::{EndpointFamily, RateLimiterSet, RateQuota, header_u64};
use crate::config::{Config, RetryConfig};
use crate::error::{ApiError, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest wait between two retries
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(300);

/// User agent sent with every request.
pub fn default_user_agent() -> String {
    format!(
        "ddop/{} (rust; os {}; arch {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Host an operation is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Server {
    /// `https://api.<site>`
    Api,
    /// `https://http-intake.logs.<site>`
    LogsIntake,
}

/// Keys an operation authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `DD-API-KEY` only (intake, key validation)
    ApiKey,
    /// `DD-API-KEY` and `DD-APPLICATION-KEY`
    ApiAndAppKey,
}

/// Resolved client settings
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_base_url: String,
    pub logs_intake_url: String,
    pub api_key: Option<String>,
    pub app_key: Option<String>,
    pub user_agent: String,
    /// Accept compressed responses
    pub compress: bool,
    pub unstable_operations: BTreeMap<String, bool>,
    pub retry: RetryConfig,
    pub timeout: Duration,
}

impl ClientOptions {
    /// Options for a single base URL serving both the API and the logs intake.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            logs_intake_url: base_url.clone(),
            api_base_url: base_url,
            api_key: None,
            app_key: None,
            user_agent: default_user_agent(),
            compress: true,
            unstable_operations: BTreeMap::new(),
            retry: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Options resolved from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base_url: config.api_base_url(),
            logs_intake_url: config.logs_intake_url(),
            api_key: config.api_key.clone(),
            app_key: config.app_key.clone(),
            user_agent: default_user_agent(),
            compress: config.compress,
            unstable_operations: config.unstable_operations.clone(),
            retry: config.retry.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    pub fn logs_intake_url(mut self, url: impl Into<String>) -> Self {
        self.logs_intake_url = url.into();
        self
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Switch an unstable operation on or off.
    pub fn set_unstable_operation(mut self, operation_id: impl Into<String>, enabled: bool) -> Self {
        self.unstable_operations.insert(operation_id.into(), enabled);
        self
    }

    pub fn is_unstable_operation_enabled(&self, operation_id: &str) -> bool {
        self.unstable_operations
            .get(operation_id)
            .copied()
            .unwrap_or(false)
    }
}

/// One REST call, built by an API method and run by [`DatadogClient::execute`].
///
/// `path` is a template such as `/api/v2/incidents/{incident_id}`; every
/// `{name}` is replaced by the percent-encoded value of the matching path
/// parameter.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub operation_id: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub path_params: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
    pub content_encoding: Option<ContentEncoding>,
    pub auth: AuthScheme,
    pub server: Server,
    pub unstable: bool,
}

impl ApiRequest {
    pub fn new(operation_id: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            operation_id,
            method,
            path,
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
            content_encoding: None,
            auth: AuthScheme::ApiAndAppKey,
            server: Server::Api,
            unstable: false,
        }
    }

    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push((name, value.to_string()));
        }
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn content_encoding(mut self, encoding: Option<ContentEncoding>) -> Self {
        self.content_encoding = encoding;
        self
    }

    pub fn auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn server(mut self, server: Server) -> Self {
        self.server = server;
        self
    }

    /// Mark the operation as unstable; it then runs only when enabled.
    pub fn unstable(mut self) -> Self {
        self.unstable = true;
        self
    }
}

/// Datadog API client
///
/// Cheap to clone: clones share the HTTP connection pool and rate limiters.
#[derive(Clone)]
pub struct DatadogClient {
    http: HttpClient,
    options: Arc<ClientOptions>,
    rate_limiters: Arc<RateLimiterSet>,
}

impl DatadogClient {
    /// Create a new Datadog API client
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .gzip(options.compress)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            options: Arc::new(options),
            rate_limiters: Arc::new(RateLimiterSet::new()),
        })
    }

    /// Create a client from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(ClientOptions::from_config(config))
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn rate_limiters(&self) -> &RateLimiterSet {
        &self.rate_limiters
    }

    /// Run a request and decode its JSON response.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.check_unstable(&request)?;

        let url = self.build_url(&request)?;
        let body = match (&request.body, &request.content_encoding) {
            (Some(body), Some(encoding)) => Some(compress(body, encoding)?),
            (Some(body), None) => Some(body.clone()),
            (None, _) => None,
        };
        let family = EndpointFamily::from_request(request.path, &request.method);

        let mut attempt = 0u32;
        loop {
            self.rate_limiters.wait_for(family).await;

            let started = Instant::now();
            debug!(
                "--> {} {} [{}]",
                request.method, url, request.operation_id
            );
            let response = self
                .build_request(&request, &url, body.as_deref())
                .send()
                .await
                .map_err(ApiError::from)?;

            let status = response.status();
            let headers = response.headers().clone();
            let text = response.text().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to read response: {}", e))
            })?;
            debug!(
                "<-- {} {} ({} ms)",
                status.as_u16(),
                url,
                started.elapsed().as_millis()
            );
            trace!("Response body: {}", self.redact(&text));

            if status.as_u16() < 300 {
                return decode_body(&text);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                self.rate_limiters
                    .activate(family, RateQuota::from_headers(&headers))
                    .await;
            }

            if let Some(delay) = self.retry_delay(status, &headers, attempt) {
                attempt += 1;
                warn!(
                    "{} returned {}; retry {}/{} in {:?}",
                    request.operation_id,
                    status.as_u16(),
                    attempt,
                    self.options.retry.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let retry_after = header_u64(&headers, "x-ratelimit-reset").map(Duration::from_secs);
            return Err(ApiError::from_status(status.as_u16(), text, retry_after).into());
        }
    }

    fn check_unstable(&self, request: &ApiRequest) -> Result<()> {
        if !request.unstable {
            return Ok(());
        }
        if self.options.is_unstable_operation_enabled(request.operation_id) {
            warn!("Using unstable operation '{}'", request.operation_id);
            Ok(())
        } else {
            Err(ApiError::UnstableOperationDisabled(request.operation_id.to_string()).into())
        }
    }

    fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        let base = match request.server {
            Server::Api => &self.options.api_base_url,
            Server::LogsIntake => &self.options.logs_intake_url,
        };
        let mut url = Url::parse(base)
            .map_err(|e| ApiError::InvalidParameter(format!("Invalid base URL '{}': {}", base, e)))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidParameter(format!("Base URL '{}' cannot carry a path", base))
            })?;
            segments.pop_if_empty();

            for segment in request.path.trim_start_matches('/').split('/') {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        let value = request
                            .path_params
                            .iter()
                            .find(|(key, _)| *key == name)
                            .map(|(_, value)| value.as_str())
                            .filter(|value| !value.is_empty())
                            .ok_or_else(|| {
                                ApiError::InvalidParameter(format!(
                                    "Missing required parameter '{}'",
                                    name
                                ))
                            })?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        Ok(url)
    }

    fn build_request(
        &self,
        request: &ApiRequest,
        url: &Url,
        body: Option<&[u8]>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.options.user_agent);

        if let Some(key) = &self.options.api_key {
            builder = builder.header("DD-API-KEY", key);
        }
        if request.auth == AuthScheme::ApiAndAppKey
            && let Some(key) = &self.options.app_key
        {
            builder = builder.header("DD-APPLICATION-KEY", key);
        }

        if !self.options.compress {
            builder = builder.header(ACCEPT_ENCODING, "identity");
        }

        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
            if let Some(encoding) = &request.content_encoding {
                builder = builder.header(CONTENT_ENCODING, encoding.as_str());
            }
        }

        builder
    }

    fn retry_delay(&self, status: StatusCode, headers: &HeaderMap, attempt: u32) -> Option<Duration> {
        let retry = &self.options.retry;
        if !retry.enabled || attempt >= retry.max_retries {
            return None;
        }

        if status == StatusCode::TOO_MANY_REQUESTS
            && let Some(reset) = header_u64(headers, "x-ratelimit-reset")
        {
            return Some(Duration::from_secs(reset).min(MAX_RETRY_DELAY));
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let secs = retry.backoff_base as f64 * retry.backoff_multiplier.powi(attempt as i32);
            // Overflowing or infinite backoffs are capped
            let delay = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(MAX_RETRY_DELAY);
            return Some(delay.min(MAX_RETRY_DELAY));
        }

        None
    }

    /// Replace configured keys in `text` before it reaches the logs.
    fn redact(&self, text: &str) -> String {
        [&self.options.api_key, &self.options.app_key]
            .into_iter()
            .flatten()
            .filter(|key| !key.is_empty())
            .fold(text.to_string(), |acc, key| acc.replace(key.as_str(), "REDACTED"))
    }
}

/// Compress a request body for the given `Content-Encoding`.
fn compress(body: &[u8], encoding: &ContentEncoding) -> Result<Vec<u8>> {
    match encoding {
        ContentEncoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(body)?;
            Ok(encoder.finish()?)
        }
        ContentEncoding::Deflate => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(body)?;
            Ok(encoder.finish()?)
        }
        ContentEncoding::UnparsedObject(other) => Err(ApiError::InvalidParameter(format!(
            "Unsupported content encoding '{}'",
            other
        ))
        .into()),
    }
}

/// Decode a 2xx body; an empty body decodes as JSON `null`.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into())
}
