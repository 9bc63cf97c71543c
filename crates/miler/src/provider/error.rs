//! Provider error taxonomy.

use thiserror::Error;

/// Convenience alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors surfaced by milestone providers and the HTTP layer beneath them.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure: connection refused, timeout, TLS, or a body
    /// that could not be read.
    #[error("network error: {message}")]
    Network { message: String },

    /// The provider answered, but the payload did not decode as expected.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// The requested resource does not exist on the provider.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The provider rejected the request or returned an error envelope.
    #[error("API error: {message}")]
    Api { message: String },
}

impl ProviderError {
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[inline]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    #[inline]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status to the matching variant. `context` names
    /// the resource or operation for the error message.
    pub fn from_status(status: reqwest::StatusCode, context: impl Into<String>) -> Self {
        let context = context.into();
        if status == reqwest::StatusCode::NOT_FOUND {
            Self::not_found(context)
        } else {
            Self::api(format!("{context}: HTTP {status}"))
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
