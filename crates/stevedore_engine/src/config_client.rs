use std::time::Duration;

use ingest_logging::ingest_info;

use crate::{ConfigError, ConfigFailure, ConfigPayload};

/// Timeouts for the config endpoint.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Backend configuration endpoint.
#[async_trait::async_trait]
pub trait ConfigApi: Send + Sync {
    /// Submit the configuration. The response body is opaque; its presence
    /// is the only success signal.
    async fn set_config(&self, payload: &ConfigPayload) -> Result<serde_json::Value, ConfigError>;
}

/// reqwest-backed [`ConfigApi`] against `{api_host}/api/set_config`.
#[derive(Debug, Clone)]
pub struct ReqwestConfigClient {
    api_host: String,
    settings: ClientSettings,
}

impl ReqwestConfigClient {
    pub fn new(api_host: impl Into<String>, settings: ClientSettings) -> Self {
        Self {
            api_host: api_host.into(),
            settings,
        }
    }

    fn endpoint(&self) -> Result<url::Url, ConfigError> {
        let base = url::Url::parse(&self.api_host)
            .map_err(|err| ConfigError::new(ConfigFailure::InvalidHost, err.to_string()))?;
        base.join("/api/set_config")
            .map_err(|err| ConfigError::new(ConfigFailure::InvalidHost, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ConfigError::new(ConfigFailure::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ConfigApi for ReqwestConfigClient {
    async fn set_config(&self, payload: &ConfigPayload) -> Result<serde_json::Value, ConfigError> {
        let endpoint = self.endpoint()?;
        let client = self.build_client()?;

        let response = client
            .post(endpoint.as_str())
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::new(
                ConfigFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| ConfigError::new(ConfigFailure::MalformedResponse, err.to_string()))?;
        ingest_info!("set_config acknowledged: {body}");
        Ok(body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ConfigError {
    if err.is_timeout() {
        return ConfigError::new(ConfigFailure::Timeout, err.to_string());
    }
    ConfigError::new(ConfigFailure::Network, err.to_string())
}
