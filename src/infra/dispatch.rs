//! HTTP job dispatcher
//!
//! Client for a Jenkins-style build backend: `connect` verifies the
//! backend is reachable, `invoke` fires a one-shot build trigger for a
//! named job. No retry and no queue tracking; the trigger engine owns
//! the decision whether a rejection matters.

use std::time::Duration;

use crate::config::defaults;
use crate::core::trigger::JobDispatcher;
use crate::error::DispatchError;

/// Dispatcher connected to a build backend
#[derive(Debug)]
pub struct HttpDispatcher {
    /// HTTP client
    client: reqwest::Client,
    /// Backend base URL, without trailing slash
    base_url: String,
}

impl HttpDispatcher {
    /// Connect to a build backend and verify it is reachable.
    ///
    /// An unreachable backend is fatal for the whole run; nothing has
    /// been dispatched yet at this point.
    pub async fn connect(url: &str) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT))
            .connect_timeout(Duration::from_secs(defaults::HTTP_CONNECT_TIMEOUT))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let base_url = url.trim_end_matches('/').to_string();

        let response = client
            .get(format!("{base_url}/api/json"))
            .send()
            .await
            .map_err(|e| DispatchError::ConnectError {
                url: base_url.clone(),
                error: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(DispatchError::ConnectError {
                url: base_url,
                error: format!("HTTP {}", response.status()),
            });
        }

        Ok(Self { client, base_url })
    }

    /// The backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl JobDispatcher for HttpDispatcher {
    async fn invoke(&mut self, job_name: &str) -> Result<bool, DispatchError> {
        let url = format!("{}/job/{job_name}/build", self.base_url);
        let response =
            self.client
                .post(&url)
                .send()
                .await
                .map_err(|e| DispatchError::RequestError {
                    job: job_name.to_string(),
                    error: e.to_string(),
                })?;
        Ok(response.status().is_success())
    }
}
