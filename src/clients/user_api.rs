use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

use crate::domain::User;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::make_http_client;

/// Failure kinds for a single call against the user API. Never retried here;
/// the caller decides how to surface each kind.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("user API request timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("user API returned status {0}")]
    Status(StatusCode),
    #[error("user not found")]
    NotFound,
    #[error("malformed envelope: {0}")]
    Envelope(String),
}

impl ApiError {
    /// Stable tag for surfacing the failure kind across the protocol boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Timeout => "timeout",
            ApiError::Transport(_) => "transport",
            ApiError::Status(_) => "upstream-status",
            ApiError::NotFound => "not-found",
            ApiError::Envelope(_) => "envelope",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// The user API wraps every payload as `{"success":…,"message":…,"data":…}`.
/// Only `data` is load-bearing for the gateway.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Serialize)]
struct NewUserReq<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Clone)]
pub struct UserApiClient {
    base: String,
    http: Client,
}

impl UserApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let http = make_http_client();
        Self { base: base.into(), http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    pub async fn health(&self) -> bool {
        let url = self.url("/health");
        let (builder, _rid) = add_standard_headers(self.http.get(url), None);
        match builder.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.url("/users");
        tracing::debug!(endpoint = %url, "user_api.list request");
        let start = Instant::now();
        let (builder, _rid) = add_standard_headers(self.http.get(url), None);
        let res = async {
            let resp = builder.send().await.map_err(ApiError::from)?;
            let env = decode::<Vec<User>>(resp).await?;
            // A nil slice serializes as a null `data`; an empty store is still success.
            Ok(env.data.unwrap_or_default())
        }
        .await;
        observe("users.list", start, &res);
        res
    }

    pub async fn list_users_by_name(&self, name: &str) -> Result<Vec<User>, ApiError> {
        let url = self.url("/users");
        tracing::debug!(endpoint = %url, name = name, "user_api.list_by_name request");
        let start = Instant::now();
        let (builder, _rid) =
            add_standard_headers(self.http.get(url).query(&[("name", name)]), None);
        let res = async {
            let resp = builder.send().await.map_err(ApiError::from)?;
            match decode::<Vec<User>>(resp).await {
                // The backend 404s a name filter with no matches; an empty set is not an error.
                Err(ApiError::NotFound) => Ok(Vec::new()),
                Err(e) => Err(e),
                Ok(env) => Ok(env.data.unwrap_or_default()),
            }
        }
        .await;
        observe("users.list_by_name", start, &res);
        res
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<User, ApiError> {
        let url = self.url(&format!("/users/{id}"));
        tracing::debug!(endpoint = %url, "user_api.get_by_id request");
        let start = Instant::now();
        let (builder, _rid) = add_standard_headers(self.http.get(url), None);
        let res = async {
            let resp = builder.send().await.map_err(ApiError::from)?;
            let env = decode::<User>(resp).await?;
            // A success envelope with null `data` means the id is unknown.
            env.data.ok_or(ApiError::NotFound)
        }
        .await;
        observe("users.get_by_id", start, &res);
        res
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, ApiError> {
        let url = self.url("/users");
        tracing::debug!(endpoint = %url, "user_api.create request");
        let start = Instant::now();
        let payload = NewUserReq { name, email };
        let (builder, _rid) = add_standard_headers(self.http.post(url), None);
        let res = async {
            let resp = builder
                .json(&payload)
                .send()
                .await
                .map_err(ApiError::from)?;
            let env = decode::<User>(resp).await?;
            env.data
                .ok_or_else(|| ApiError::Envelope("create response missing data".into()))
        }
        .await;
        observe("users.create", start, &res);
        res
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Envelope<T>, ApiError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    resp.json::<Envelope<T>>()
        .await
        .map_err(|e| ApiError::Envelope(e.to_string()))
}

fn observe<T>(op: &str, start: Instant, res: &Result<T, ApiError>) {
    if res.is_err() {
        crate::infra::logging::log_metric(op, "remote_error_total", 1.0);
    }
    let elapsed_ms = start.elapsed().as_millis() as f64;
    crate::infra::logging::log_metric(op, "remote_latency_ms", elapsed_ms);
}
