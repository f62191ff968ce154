/// Error types for the lab backend client
use thiserror::Error;

use crate::validation::ValidationResult;

/// Main error type for lab data operations
#[derive(Error, Debug)]
pub enum LabError {
    /// No bearer token was supplied in the session
    #[error("No session token available; sign in before loading data")]
    Unauthenticated,

    /// Backend rejected the token (401/403)
    #[error("Authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    /// HTTP request failed at the transport level
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded into the expected record
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Draft failed client-side validation; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(ValidationResult),

    /// Request was superseded by a newer one
    #[error("Request cancelled")]
    Cancelled,
}

impl LabError {
    /// Missing or rejected credentials. Further loads should be skipped.
    pub fn is_auth(&self) -> bool {
        matches!(self, LabError::Unauthenticated | LabError::Auth { .. })
    }

    /// Short text for an error banner.
    pub fn banner_message(&self) -> String {
        match self {
            LabError::Unauthenticated | LabError::Auth { .. } => {
                "Your session is missing or expired. Please sign in again.".to_string()
            }
            LabError::Validation(result) => format!("Please correct the form: {}", result),
            LabError::Cancelled => "The request was replaced by a newer one.".to_string(),
            other => format!("Could not load data: {}", other),
        }
    }
}

/// Type alias for Results using LabError
pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_classified() {
        assert!(LabError::Unauthenticated.is_auth());
        assert!(LabError::Auth {
            status: 401,
            message: "expired".into()
        }
        .is_auth());
        assert!(!LabError::Cancelled.is_auth());
        assert!(!LabError::Status {
            status: 500,
            message: "boom".into()
        }
        .is_auth());
    }

    #[test]
    fn banner_message_hides_auth_detail() {
        let msg = LabError::Auth {
            status: 403,
            message: "jwt malformed".into(),
        }
        .banner_message();
        assert!(msg.contains("sign in"));
        assert!(!msg.contains("jwt"));
    }
}
