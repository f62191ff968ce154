//! Backend location and credentials.
//!
//! Base URLs are baked in at build time from `LAB_SAMPLES_API_URL` and
//! `LAB_USERS_API_URL`, falling back to local development servers when those
//! variables were unset. Callers may override them at runtime.

use std::fmt;

/// Samples, results and analysis catalog service.
pub const DEFAULT_SAMPLES_API_URL: &str = "http://localhost:5000/api";

/// Users service.
pub const DEFAULT_USERS_API_URL: &str = "http://localhost:5001/api";

pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Upper bound on pages requested by one accumulation.
pub const DEFAULT_MAX_PAGES: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub samples_base_url: String,
    pub users_base_url: String,
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            samples_base_url: option_env!("LAB_SAMPLES_API_URL")
                .unwrap_or(DEFAULT_SAMPLES_API_URL)
                .to_string(),
            users_base_url: option_env!("LAB_USERS_API_URL")
                .unwrap_or(DEFAULT_USERS_API_URL)
                .to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl ApiConfig {
    pub fn with_samples_url(mut self, url: impl Into<String>) -> Self {
        self.samples_base_url = url.into();
        self
    }

    pub fn with_users_url(mut self, url: impl Into<String>) -> Self {
        self.users_base_url = url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Join a base URL and a path without doubling or dropping the slash.
    pub fn join(base: &str, path: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Bearer credentials for the current operator.
///
/// Constructed explicitly and handed to the client; nothing reads tokens
/// from ambient storage.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: if token.trim().is_empty() {
                None
            } else {
                Some(token.trim().to_string())
            },
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn from_optional(token: Option<String>) -> Self {
        token.map(Session::new).unwrap_or_default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_slashes() {
        assert_eq!(ApiConfig::join("http://x/api/", "/muestras"), "http://x/api/muestras");
        assert_eq!(ApiConfig::join("http://x/api", "muestras"), "http://x/api/muestras");
    }

    #[test]
    fn blank_token_is_anonymous() {
        assert!(!Session::new("   ").is_authenticated());
        assert!(!Session::from_optional(None).is_authenticated());
        assert_eq!(Session::new(" abc ").token(), Some("abc"));
    }

    #[test]
    fn debug_redacts_token() {
        let shown = format!("{:?}", Session::new("secret-token"));
        assert!(!shown.contains("secret-token"));
    }

    #[test]
    fn page_size_never_zero() {
        assert_eq!(ApiConfig::default().with_page_size(0).page_size, 1);
    }
}
