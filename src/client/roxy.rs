use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::{ClientError, FlagApi, Method, Response};
use crate::config::Config;
use crate::flags::UpdateFlagRequest;

const FLAGS_PREFIX: &str = "/flags";

/// HTTP client for a Roxy server's `/flags` API.
///
/// Idle connections are never pooled, so each call dials the server afresh.
/// That keeps health polling honest while the container is still starting.
#[derive(Debug, Clone)]
pub struct RoxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl RoxyClient {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url: format!("http://{host}:{port}"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.host, config.port, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request against `/flags{path}`.
    ///
    /// Error statuses come back as `Ok` with no payload; only transport and
    /// decode problems are `Err`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&UpdateFlagRequest>,
    ) -> Result<Response, ClientError> {
        let path = format!("{FLAGS_PREFIX}{path}");
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.as_reqwest(), &url);
        if method.is_data_method() {
            request = request.header(CONTENT_TYPE, "application/json");
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let res = request.send().await.map_err(|source| ClientError::Transport {
            path: path.clone(),
            source,
        })?;

        let status = res.status().as_u16();
        debug!(method = ?method, path = %path, status, "Roxy responded");

        if status >= 400 {
            return Ok(Response::new(status, None));
        }

        let raw = res.bytes().await.map_err(|source| ClientError::Transport {
            path: path.clone(),
            source,
        })?;

        let data = serde_json::from_slice(&raw)
            .map_err(|source| ClientError::Decode { path, source })?;

        Ok(Response::new(status, Some(data)))
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&UpdateFlagRequest>,
    ) -> Response {
        let result = self.send(method, path, body).await;
        if let Err(e) = &result {
            debug!(error = %e, "Roxy request failed, reporting synthetic status");
        }
        Response::from(result)
    }
}

#[async_trait]
impl FlagApi for RoxyClient {
    async fn get_all_flags(&self) -> Response {
        self.dispatch(Method::Get, "/", None).await
    }

    async fn get_flag(&self, name: &str) -> Response {
        self.dispatch(Method::Get, &format!("/{name}"), None).await
    }

    async fn delete_all_flags(&self) -> Response {
        self.dispatch(Method::Delete, "/", None).await
    }

    async fn delete_flag(&self, name: &str) -> Response {
        self.dispatch(Method::Delete, &format!("/{name}"), None).await
    }

    async fn update_flag(&self, name: &str, expression: &str) -> Response {
        let body = UpdateFlagRequest {
            expression: expression.to_string(),
        };
        self.dispatch(Method::Post, &format!("/{name}"), Some(&body))
            .await
    }
}
