use thiserror::Error;

use crate::{config::PROVIDER, utils::format_duration_ms};

/// Why a fetch produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Nothing came back within the request deadline.
    #[error("request timed out after {}", format_duration_ms(*.after_ms))]
    Timeout { after_ms: u64 },

    /// Non-2xx response, network failure or an undecodable body.
    #[error("{reason}")]
    Failed { status: Option<u16>, reason: String },

    /// The request succeeded but no usable points survived filtering.
    #[error("{what} returned no usable points")]
    EmptySeries { what: &'static str },
}

impl FetchError {
    pub fn status(status: u16) -> Self {
        Self::Failed {
            status: Some(status),
            reason: format!("API Error: {}", status),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn timeout() -> Self {
        Self::Timeout {
            after_ms: PROVIDER.client.timeout_ms,
        }
    }

    /// Empty series are a benign state, not something to retry.
    pub fn is_empty_series(&self) -> bool {
        matches!(self, Self::EmptySeries { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout();
        }
        match err.status() {
            Some(status) => Self::status(status.as_u16()),
            None => Self::failed(format!("network error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::failed(format!("could not decode response: {}", err))
    }
}

impl From<csv::Error> for FetchError {
    fn from(err: csv::Error) -> Self {
        Self::failed(format!("could not read CSV: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_matches_api_wording() {
        assert_eq!(FetchError::status(503).to_string(), "API Error: 503");
    }

    #[test]
    fn timeout_uses_client_deadline() {
        assert_eq!(FetchError::timeout(), FetchError::Timeout { after_ms: 10_000 });
        assert_eq!(FetchError::timeout().to_string(), "request timed out after 10s");
    }
}
