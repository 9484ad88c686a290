//! Session credentials for the When I Work API.

use std::fmt;

/// The default When I Work API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.wheniwork.com/2";

/// Everything the client needs to reach and authenticate against the API.
///
/// Either `token` is set, or both `username` and `password` are. That is
/// checked when the configuration is resolved and again by
/// [`WhenIWorkClient::authenticate`](crate::WhenIWorkClient::authenticate),
/// not encoded in the type.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub base_url: String,
    pub account_id: Option<i64>,
}

impl Credentials {
    /// Credentials with only an API key, pointing at the default base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            username: None,
            password: None,
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            account_id: None,
        }
    }

    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_base_url() {
        let creds = Credentials::new("key");
        assert_eq!(creds.base_url, DEFAULT_BASE_URL);
        assert!(creds.token.is_none());
        assert!(creds.username.is_none());
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("secret-key")
            .with_login("alice", "hunter2")
            .with_token("tok-123");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("alice"));
    }
}
