use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the notification client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response from {endpoint}")]
    Malformed { endpoint: &'static str, raw: Value },

    #[error("Validation error: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Server-reported client-side failure (4xx).
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if (400..500).contains(status))
    }

    /// Short human-readable text for a transient status banner.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Network error, please try again".to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Malformed { endpoint, .. } => {
                format!("Unexpected response from {}", endpoint)
            }
            ClientError::InvalidRequest(_) => "Please check the entered values".to_string(),
            ClientError::InvalidBaseUrl(_) => "Client is misconfigured".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation_only_for_4xx() {
        let validation = ClientError::Api {
            status: 422,
            message: "title must not be empty".to_string(),
        };
        assert!(validation.is_validation());

        let server = ClientError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(!server.is_validation());

        let malformed = ClientError::Malformed {
            endpoint: "/notifications",
            raw: serde_json::json!({}),
        };
        assert!(!malformed.is_validation());
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::Api {
            status: 400,
            message: "recipient 99 does not exist".to_string(),
        };
        assert_eq!(err.user_message(), "recipient 99 does not exist");
    }

    #[test]
    fn test_display() {
        let err = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }
}
