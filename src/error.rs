// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each error variant tells the story of what went wrong and where:
//! a rejected token reads differently from a dropped connection or a
//! redirect that never carried an authorization code.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Microsoft Graph error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"itemNotFound"`,
/// the domain vocabulary is encoded in the type system. Each variant
/// tells you exactly what Graph reported and enables pattern-based
/// handling without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphErrorCode {
    /// The access token is missing, expired, or malformed.
    /// Graph reports this one in PascalCase, unlike the rest.
    InvalidAuthenticationToken,
    /// The request carried no usable credentials
    Unauthenticated,
    /// The caller is authenticated but not allowed to see the resource
    AccessDenied,
    /// The requested item does not exist
    ItemNotFound,
    /// Request was malformed or used unsupported query options
    InvalidRequest,
    /// Per-app or per-user throttling kicked in — back off and retry
    ActivityLimitReached,
    /// Graph is temporarily unavailable
    ServiceNotAvailable,
    /// Unspecified server-side failure
    GeneralException,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl GraphErrorCode {
    /// Parse a Graph error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "InvalidAuthenticationToken" => Self::InvalidAuthenticationToken,
            "unauthenticated" => Self::Unauthenticated,
            "accessDenied" => Self::AccessDenied,
            "itemNotFound" => Self::ItemNotFound,
            "invalidRequest" => Self::InvalidRequest,
            "activityLimitReached" => Self::ActivityLimitReached,
            "serviceNotAvailable" => Self::ServiceNotAvailable,
            "generalException" => Self::GeneralException,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error means the persisted token was rejected and the
    /// user has to sign in again.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::InvalidAuthenticationToken | Self::Unauthenticated => true,
            Self::HttpStatus(status) => *status == 401,
            _ => false,
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ActivityLimitReached | Self::ServiceNotAvailable => true,
            Self::HttpStatus(status) => matches!(status, 429 | 503 | 504),
            _ => false,
        }
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ItemNotFound => true,
            Self::HttpStatus(status) => *status == 404,
            _ => false,
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAuthenticationToken => write!(f, "InvalidAuthenticationToken"),
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::AccessDenied => write!(f, "accessDenied"),
            Self::ItemNotFound => write!(f, "itemNotFound"),
            Self::InvalidRequest => write!(f, "invalidRequest"),
            Self::ActivityLimitReached => write!(f, "activityLimitReached"),
            Self::ServiceNotAvailable => write!(f, "serviceNotAvailable"),
            Self::GeneralException => write!(f, "generalException"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Microsoft Graph returned an error ({code}): {message}")]
    GraphService {
        code: GraphErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No access token at {path} (run `onenote2todo login` first): {source}")]
    TokenNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot follow continuation link '{link}': {source}")]
    BadContinuationLink {
        link: String,
        source: url::ParseError,
    },

    #[error("Cannot build the {kind} URL: {source}")]
    BuildUrl {
        kind: &'static str,
        source: url::ParseError,
    },

    #[error("Cannot bind the redirect listener on {addr}: {source}")]
    BindRedirectListener {
        addr: String,
        source: std::io::Error,
    },

    #[error("Failed to accept a redirect connection: {0}")]
    AcceptRedirectConnection(#[source] std::io::Error),

    #[error("Cannot parse the redirect URL '{url}': {source}")]
    ParseRedirectUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Redirect URL carries no authorization code: {0}")]
    MissingAuthCode(String),

    #[error("Redirect URL carries no state parameter: {0}")]
    MissingState(String),

    #[error("State mismatch, expected '{expected}' but the redirect carried '{received}'")]
    StateMismatch { expected: String, received: String },

    #[error("Authorization was denied ({error}): {description}")]
    AuthorizationDenied { error: String, description: String },

    #[error("Failed to exchange the authorization code for a token: {0}")]
    ExchangeFailed(String),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_variants() {
        assert_eq!(
            GraphErrorCode::from_api_response("InvalidAuthenticationToken"),
            GraphErrorCode::InvalidAuthenticationToken
        );
        assert_eq!(
            GraphErrorCode::from_api_response("itemNotFound"),
            GraphErrorCode::ItemNotFound
        );
        assert_eq!(
            GraphErrorCode::from_api_response("activityLimitReached"),
            GraphErrorCode::ActivityLimitReached
        );
        assert_eq!(
            GraphErrorCode::from_api_response("somethingNew"),
            GraphErrorCode::Unknown("somethingNew".to_string())
        );
    }

    #[test]
    fn test_code_matching_is_case_sensitive() {
        // Graph reports the token error in PascalCase and everything
        // else in camelCase; a different casing is a different code.
        assert_eq!(
            GraphErrorCode::from_api_response("invalidAuthenticationToken"),
            GraphErrorCode::Unknown("invalidAuthenticationToken".to_string())
        );
    }

    #[test]
    fn test_auth_error_predicate() {
        assert!(GraphErrorCode::InvalidAuthenticationToken.is_auth_error());
        assert!(GraphErrorCode::Unauthenticated.is_auth_error());
        assert!(GraphErrorCode::from_http_status(401).is_auth_error());
        assert!(!GraphErrorCode::AccessDenied.is_auth_error());
        assert!(!GraphErrorCode::from_http_status(500).is_auth_error());
    }

    #[test]
    fn test_retryable_predicate() {
        assert!(GraphErrorCode::ActivityLimitReached.is_retryable());
        assert!(GraphErrorCode::ServiceNotAvailable.is_retryable());
        assert!(GraphErrorCode::from_http_status(429).is_retryable());
        assert!(GraphErrorCode::from_http_status(503).is_retryable());
        assert!(!GraphErrorCode::ItemNotFound.is_retryable());
        assert!(!GraphErrorCode::from_http_status(400).is_retryable());
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(GraphErrorCode::ItemNotFound.is_not_found());
        assert!(GraphErrorCode::from_http_status(404).is_not_found());
        assert!(!GraphErrorCode::GeneralException.is_not_found());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let codes = [
            GraphErrorCode::InvalidAuthenticationToken,
            GraphErrorCode::Unauthenticated,
            GraphErrorCode::AccessDenied,
            GraphErrorCode::ItemNotFound,
            GraphErrorCode::InvalidRequest,
            GraphErrorCode::ActivityLimitReached,
            GraphErrorCode::ServiceNotAvailable,
            GraphErrorCode::GeneralException,
        ];
        for code in codes {
            assert_eq!(GraphErrorCode::from_api_response(&code.to_string()), code);
        }
    }

    #[test]
    fn test_graph_service_error_names_code_and_message() {
        let err = AppError::GraphService {
            code: GraphErrorCode::InvalidAuthenticationToken,
            message: "Access token has expired.".to_string(),
            status: reqwest::StatusCode::UNAUTHORIZED,
        };
        assert_eq!(
            err.to_string(),
            "Microsoft Graph returned an error (InvalidAuthenticationToken): Access token has expired."
        );
    }

    #[test]
    fn test_token_not_found_mentions_login() {
        let err = AppError::TokenNotFound {
            path: PathBuf::from("token.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let shown = err.to_string();
        assert!(shown.contains("token.txt"));
        assert!(shown.contains("onenote2todo login"));
    }

    #[test]
    fn test_serde_failures_become_malformed_response() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        assert!(matches!(
            AppError::from(parse_err),
            AppError::MalformedResponse(_)
        ));
    }
}
