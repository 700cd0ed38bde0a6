use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Which remote dependency a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Weather,
    Spotify,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Weather => write!(f, "OpenWeatherMap"),
            Upstream::Spotify => write!(f, "Spotify"),
        }
    }
}

/// How a remote call failed
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Offending field name mapped to its message
    #[error("validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    #[error("{service} API error: {failure}")]
    Upstream {
        service: Upstream,
        failure: UpstreamFailure,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, PlaylistError>;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;
pub const STATUS_BAD_GATEWAY: u16 = 502;
pub const STATUS_GATEWAY_TIMEOUT: u16 = 504;

impl PlaylistError {
    pub fn upstream(service: Upstream, failure: UpstreamFailure) -> Self {
        PlaylistError::Upstream { service, failure }
    }

    pub fn field(name: &str, message: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(name.to_string(), message.to_string());
        PlaylistError::Validation(fields)
    }

    /// Status reported to the caller. Upstream statuses are never passed through.
    pub fn http_status(&self) -> u16 {
        match self {
            PlaylistError::Validation(_) => STATUS_BAD_REQUEST,
            PlaylistError::Upstream { .. } => STATUS_BAD_GATEWAY,
            PlaylistError::Unexpected(_) => STATUS_INTERNAL_ERROR,
        }
    }

    /// Status echoed inside the error payload for diagnostics
    pub fn diagnostic_status(&self) -> u16 {
        match self {
            PlaylistError::Upstream { failure, .. } => match failure {
                UpstreamFailure::Status { status, .. } => *status,
                UpstreamFailure::Timeout => STATUS_GATEWAY_TIMEOUT,
                UpstreamFailure::Transport(_) | UpstreamFailure::Malformed(_) => STATUS_BAD_GATEWAY,
            },
            other => other.http_status(),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            PlaylistError::Validation(fields) => ErrorBody {
                error: "Validation failed".to_string(),
                message: "Request validation failed".to_string(),
                status: self.diagnostic_status(),
                field_errors: Some(fields.clone()),
                details: None,
            },
            PlaylistError::Upstream { service, failure } => ErrorBody {
                error: "External API error".to_string(),
                message: "Failed to fetch data from external service".to_string(),
                status: self.diagnostic_status(),
                field_errors: None,
                details: Some(format!("{service}: {failure}")),
            },
            PlaylistError::Unexpected(_) => ErrorBody {
                error: "Internal server error".to_string(),
                message: "An unexpected error occurred".to_string(),
                status: self.diagnostic_status(),
                field_errors: None,
                details: None,
            },
        }
    }
}

/// Caller-facing error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_echoed_but_not_passed_through() {
        let err = PlaylistError::upstream(
            Upstream::Weather,
            UpstreamFailure::Status {
                status: 404,
                body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
            },
        );

        assert_eq!(err.http_status(), 502);
        let body = err.to_body();
        assert_eq!(body.error, "External API error");
        assert_eq!(body.status, 404);
        assert!(body.details.unwrap().contains("city not found"));
    }

    #[test]
    fn test_timeout_reports_gateway_timeout() {
        let err = PlaylistError::upstream(Upstream::Spotify, UpstreamFailure::Timeout);
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.to_body().status, 504);
    }

    #[test]
    fn test_validation_body_shape() {
        let err = PlaylistError::field("city", "City name is required");
        let json = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["message"], "Request validation failed");
        assert_eq!(json["status"], 400);
        assert_eq!(json["fieldErrors"]["city"], "City name is required");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_unexpected_body_hides_detail() {
        let err = PlaylistError::Unexpected("worker panicked".to_string());
        let json = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["status"], 500);
        assert!(json.get("details").is_none());
        assert!(json.get("fieldErrors").is_none());
    }
}
