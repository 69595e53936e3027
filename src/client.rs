//! Thin adapter over the simulation service's HTTP surface.
//!
//! One request per call, no retries or queueing; failures come back as
//! typed errors the caller can print. The live-update channel is decoded by
//! [`crate::live`] and is not opened here.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::wire::WireConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("service returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("service response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Handle to a model created on the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelHandle {
    pub model_id: String,
}

pub struct SimulationClient {
    base_url: String,
    http: Client,
}

impl SimulationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Downloads the service's default configuration.
    pub async fn fetch_template(&self) -> Result<WireConfig, ClientError> {
        let url = format!("{}/api/template", self.base_url);
        debug!(%url, "fetching template config");
        let body = self.send(self.http.get(&url), &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Creates a model from a built wire config.
    pub async fn create_model(&self, config: &WireConfig) -> Result<ModelHandle, ClientError> {
        let url = format!("{}/api/models", self.base_url);
        info!(%url, "creating model");
        let body = self.send(self.http.post(&url).json(config), &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn start_run(&self, model: &ModelHandle) -> Result<(), ClientError> {
        let url = format!("{}/api/models/{}/start", self.base_url, model.model_id);
        info!(%url, "starting run");
        self.send(self.http.post(&url), &url).await?;
        Ok(())
    }

    pub async fn stop_run(&self, model: &ModelHandle) -> Result<(), ClientError> {
        let url = format!("{}/api/models/{}/stop", self.base_url, model.model_id);
        info!(%url, "stopping run");
        self.send(self.http.post(&url), &url).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<String, ClientError> {
        let response = request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }
        Ok(body)
    }
}
