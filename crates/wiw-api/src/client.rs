//! When I Work API client: login and the authenticated request primitive.

use std::sync::RwLock;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use wiw_types::{ApiError, ConfigError};

use crate::credentials::Credentials;

/// Header carrying the developer API key on login.
const W_KEY: &str = "w-key";

/// Header carrying the session token on every other call.
const W_TOKEN: &str = "w-token";

/// Per-call overrides for [`WhenIWorkClient::request`].
///
/// Headers set here replace the defaults of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: &Value) -> Self {
        self.body = Some(body.clone());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Client for the When I Work REST API.
///
/// The session token is obtained at most once and then reused for the life
/// of the client. There is no refresh and no expiry detection.
pub struct WhenIWorkClient {
    http: reqwest::Client,
    credentials: Credentials,
    token: RwLock<Option<String>>,
}

impl WhenIWorkClient {
    /// Create a new client. A pre-issued token in `credentials` is adopted
    /// as the session token.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let token = credentials.token.clone();
        Ok(Self {
            http,
            credentials,
            token: RwLock::new(token),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The current session token, if one is held.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn set_token(&self, token: String) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    /// Log in with username and password and keep the returned token.
    ///
    /// A no-op when a token is already held. Concurrent first calls may both
    /// log in; the last token written wins.
    pub async fn authenticate(&self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            return Ok(());
        }

        let (Some(username), Some(password)) = (
            self.credentials.username.as_deref(),
            self.credentials.password.as_deref(),
        ) else {
            return Err(ConfigError::MissingCredentials.into());
        };

        let mut body = json!({
            "username": username,
            "password": password,
        });
        // An id of 0 means "no account chosen" and is left out.
        if let Some(account_id) = self.credentials.account_id.filter(|id| *id != 0) {
            body["account_id"] = json!(account_id);
        }

        let url = self.url_for("/login");
        tracing::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header(W_KEY, header_value(W_KEY, &self.credentials.api_key)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let data: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        let token = data
            .pointer("/login/token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());

        match token {
            Some(token) if status.is_success() => {
                self.set_token(token.to_string());
                tracing::info!("Authenticated with When I Work");
                Ok(())
            }
            _ => Err(ApiError::Authentication {
                message: server_error(&data).unwrap_or_else(|| status_text(status).to_string()),
            }),
        }
    }

    /// Make an authenticated API request and return the parsed JSON body.
    ///
    /// `endpoint` is either an absolute URL or a path relative to the base
    /// URL. Fails with [`ApiError::NotAuthenticated`] without touching the
    /// network when no token is held.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let token = self.token().ok_or(ApiError::NotAuthenticated)?;
        let url = self.url_for(endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(W_TOKEN, header_value(W_TOKEN, &token)?);
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }

        tracing::debug!("{} {url}", options.method);

        let mut builder = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let data: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: server_error(&data)
                    .unwrap_or_else(|| format!("API Error: {}", status_text(status))),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Resolve an endpoint against the base URL.
    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!(
                "{}{}",
                self.credentials.base_url.trim_end_matches('/'),
                endpoint
            )
        }
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.to_string()))
}

/// The `error` field of a response body, when it carries something.
fn server_error(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}
