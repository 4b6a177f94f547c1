use thiserror::Error;

/// Ways a backend call can fail. A body that is not valid JSON is not an
/// error: it reads as a `null` payload (see `payload::parse_payload`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not read {endpoint} response body: {message}")]
    Body { endpoint: String, message: String },
}

impl ApiError {
    pub(super) fn transport(endpoint: &str, err: ureq::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub(super) fn body(endpoint: &str, err: ureq::Error) -> Self {
        Self::Body {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
