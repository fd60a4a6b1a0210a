//! # Provider Error Types Module
//!
//! This module defines the error types produced while talking to the recipe
//! provider. The HTTP client recovers from all of them by serving the fallback
//! dataset; they surface as the reason attached to that fallback, or as the
//! load error message when a provider implementation rejects outright.

/// Custom error types for provider operations
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Connection, DNS, TLS, or timeout failures
    Transport(String),
    /// Non-success HTTP status
    Status(u16),
    /// Response body did not match the expected shape
    Decode(String),
    /// Provider declined the request for another reason
    Rejected(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ProviderError::Status(code) => write!(f, "Network response was not ok (status {code})"),
            ProviderError::Decode(msg) => write!(f, "Decode error: {msg}"),
            ProviderError::Rejected(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Status(status.as_u16())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<anyhow::Error> for ProviderError {
    fn from(err: anyhow::Error) -> Self {
        ProviderError::Rejected(err.to_string())
    }
}
