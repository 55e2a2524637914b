//! Client side of the Roxy flag API.
//!
//! Every call resolves to a [`Response`]. Failures that never produced an HTTP
//! exchange (connect errors, timeouts, unparseable bodies) are folded into a
//! synthetic `418` response that still carries the [`ClientError`] behind it.

mod roxy;

pub use roxy::RoxyClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Verbs that carry a JSON request body.
    pub fn is_data_method(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Why a request never produced a usable response.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {path} is not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct Response {
    status: u16,
    data: Option<Value>,
    failure: Option<ClientError>,
}

impl Response {
    /// Status used for failures that have no real HTTP status.
    pub const SYNTHETIC_FAILURE: u16 = 418;

    pub fn new(status: u16, data: Option<Value>) -> Self {
        Self {
            status,
            data,
            failure: None,
        }
    }

    pub fn failed(error: ClientError) -> Self {
        Self {
            status: Self::SYNTHETIC_FAILURE,
            data: None,
            failure: Some(error),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn failure(&self) -> Option<&ClientError> {
        self.failure.as_ref()
    }

    pub fn is_success(&self) -> bool {
        !self.is_error()
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

impl From<Result<Response, ClientError>> for Response {
    fn from(result: Result<Response, ClientError>) -> Self {
        result.unwrap_or_else(Response::failed)
    }
}

/// Operations the seeding run needs from a flag server.
#[async_trait]
pub trait FlagApi: Send + Sync {
    async fn get_all_flags(&self) -> Response;

    async fn get_flag(&self, name: &str) -> Response;

    async fn delete_all_flags(&self) -> Response;

    async fn delete_flag(&self, name: &str) -> Response;

    async fn update_flag(&self, name: &str, expression: &str) -> Response;
}
