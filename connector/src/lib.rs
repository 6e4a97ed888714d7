/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod auth;
pub mod colleges;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod programmes;
pub mod resource;
pub mod search;
pub mod staffs;
pub mod tasks;
pub mod user;

pub use auth::User;
pub use colleges::College;
pub use courses::Course;
pub use departments::Department;
pub use programmes::Programme;
pub use resource::{FieldKind, FieldSpec, Resource, ResourceKind, SelectOption};
pub use staffs::Staff;
pub use tasks::Task;

use serde::de::DeserializeOwned;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/api";

/// HTTP client bound to one backend base URL. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub server_url: String,
    http: reqwest::Client,
}

impl RequestConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();

        Self {
            server_url,
            http: reqwest::Client::new(),
        }
    }

    /// Scheme, host and port of the server URL. Uploaded profile images are
    /// served relative to it rather than to the API prefix.
    pub fn origin(&self) -> String {
        match url::Url::parse(&self.server_url) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(_) => self.server_url.clone(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ConnectorError {
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ConnectorError::Status { status, .. } => Some(*status),
            ConnectorError::Request(e) => e.status(),
            ConnectorError::Decode(_) => None,
        }
    }
}

pub type RequestType = reqwest::Method;

fn get_client(
    config: &RequestConfig,
    endpoint: &str,
    request_type: RequestType,
) -> reqwest::RequestBuilder {
    let endpoint = endpoint.trim_start_matches('/');
    tracing::debug!(method = %request_type, endpoint, "sending request");

    config
        .http
        .request(request_type, format!("{}/{}", config.server_url, endpoint))
        .header(reqwest::header::ACCEPT, "application/json")
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ConnectorError> {
    Ok(request.send().await?)
}

async fn read_body(res: reqwest::Response) -> Result<Vec<u8>, ConnectorError> {
    let status = res.status();
    let bytes = res.bytes().await?;

    if !status.is_success() {
        return Err(ConnectorError::Status {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Ok(bytes.to_vec())
}

async fn parse_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ConnectorError> {
    let body = read_body(res).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Like `parse_response`, but an empty or foreign body is not an error.
async fn parse_optional<T: DeserializeOwned>(
    res: reqwest::Response,
) -> Result<Option<T>, ConnectorError> {
    let body = read_body(res).await?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice(&body) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!("ignoring response body: {}", e);
            Ok(None)
        }
    }
}

async fn expect_success(res: reqwest::Response) -> Result<(), ConnectorError> {
    read_body(res).await.map(|_| ())
}
