//! Typed errors for the remote-service adapters.
//!
//! Every adapter returns one of these instead of letting transport errors
//! escape; the controller renders them next to a retry control.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No API key configured; checked before any request is sent.
    #[error("no Gemini API key configured (set GEMINI_API_KEY or use Settings)")]
    MissingApiKey,
    #[error("the service rejected the configured API key")]
    InvalidApiKey,
    #[error("request failed: {0}")]
    Http(String),
    #[error("could not parse the service response: {0}")]
    MalformedResponse(String),
    #[error("the service returned no usable content")]
    EmptyResponse,
}

impl ApiError {
    pub(crate) fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(401) | ureq::Error::StatusCode(403) => {
                ApiError::InvalidApiKey
            }
            other => ApiError::Http(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_status_codes_map_to_invalid_key() {
        assert!(matches!(
            ApiError::from_ureq(ureq::Error::StatusCode(401)),
            ApiError::InvalidApiKey
        ));
        assert!(matches!(
            ApiError::from_ureq(ureq::Error::StatusCode(403)),
            ApiError::InvalidApiKey
        ));
        assert!(matches!(
            ApiError::from_ureq(ureq::Error::StatusCode(500)),
            ApiError::Http(_)
        ));
    }
}
