//! API key validation

use async_trait::async_trait;
use reqwest::Method;

use crate::client::datadog::{ApiRequest, AuthScheme, DatadogClient};
use crate::client::models::ApiKeyValidation;
use crate::error::Result;

#[async_trait]
pub trait ValidationApi: Send + Sync {
    /// Check the configured API key; an invalid key answers 403.
    async fn validate_api_key(&self) -> Result<ApiKeyValidation>;
}

#[async_trait]
impl ValidationApi for DatadogClient {
    async fn validate_api_key(&self) -> Result<ApiKeyValidation> {
        let request = ApiRequest::new("v1.Validate", Method::GET, "/api/v1/validate")
            .auth(AuthScheme::ApiKey);
        self.execute(request).await
    }
}
