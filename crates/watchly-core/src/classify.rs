//! Mapping of transport failures to the fixed set of messages a user sees.

use serde::Serialize;
use std::fmt;
use watchly_sources::TransportError;

/// Which endpoint produced the failure. A few messages read differently for
/// the listing than for a single title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Endpoint {
    List,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    NoConnectivity,
    Timeout,
    NetworkIO,
    NotFound,
    ServerError,
    AccessDenied,
    RateLimited,
    Other { code: u16 },
    Unknown { message: String },
}

/// User-facing error text. Only constructed from an `ErrorCategory`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn classify(error: &TransportError, endpoint: Endpoint) -> ErrorCategory {
    match error {
        TransportError::Unreachable(_) => ErrorCategory::NoConnectivity,
        TransportError::Timeout => ErrorCategory::Timeout,
        TransportError::Io(_) => ErrorCategory::NetworkIO,
        TransportError::Http { status, .. } => classify_status(*status, endpoint),
        TransportError::Decode(message) | TransportError::Other(message) => ErrorCategory::Unknown {
            message: message.clone(),
        },
    }
}

fn classify_status(status: u16, endpoint: Endpoint) -> ErrorCategory {
    match (status, endpoint) {
        (404, _) => ErrorCategory::NotFound,
        (500, _) => ErrorCategory::ServerError,
        (401 | 403, _) => ErrorCategory::AccessDenied,
        (429, Endpoint::List) => ErrorCategory::RateLimited,
        (code, _) => ErrorCategory::Other { code },
    }
}

impl ErrorCategory {
    pub fn message(&self, endpoint: Endpoint) -> ErrorMessage {
        let text = match (self, endpoint) {
            (ErrorCategory::NoConnectivity, _) => "No internet connection. Please check your network.".to_string(),
            (ErrorCategory::Timeout, _) => "Connection timed out. Please try again.".to_string(),
            (ErrorCategory::NetworkIO, _) => "Network error. Please check your connection.".to_string(),
            (ErrorCategory::NotFound, Endpoint::Detail) => "Item not found".to_string(),
            (ErrorCategory::NotFound, Endpoint::List) => "Content not found".to_string(),
            (ErrorCategory::ServerError, _) => "Server error. Please try again later.".to_string(),
            (ErrorCategory::AccessDenied, Endpoint::Detail) => "Access denied".to_string(),
            (ErrorCategory::AccessDenied, Endpoint::List) => "Access denied. Check your API key.".to_string(),
            (ErrorCategory::RateLimited, _) => "Too many requests. Please wait and try again.".to_string(),
            (ErrorCategory::Other { code }, _) => format!("Something went wrong (Error {})", code),
            (ErrorCategory::Unknown { message }, _) if message.is_empty() => "An unexpected error occurred".to_string(),
            (ErrorCategory::Unknown { message }, _) => message.clone(),
        };
        ErrorMessage(text)
    }
}

/// Classify and render in one step.
pub fn user_message(error: &TransportError, endpoint: Endpoint) -> ErrorMessage {
    classify(error, endpoint).message(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(error: TransportError, endpoint: Endpoint) -> String {
        user_message(&error, endpoint).to_string()
    }

    #[test]
    fn test_low_level_failures() {
        for endpoint in [Endpoint::List, Endpoint::Detail] {
            assert_eq!(
                msg(TransportError::Unreachable("dns error".to_string()), endpoint),
                "No internet connection. Please check your network."
            );
            assert_eq!(msg(TransportError::Timeout, endpoint), "Connection timed out. Please try again.");
            assert_eq!(
                msg(TransportError::Io("connection reset".to_string()), endpoint),
                "Network error. Please check your connection."
            );
        }
    }

    #[test]
    fn test_detail_status_codes() {
        assert_eq!(msg(TransportError::http(404), Endpoint::Detail), "Item not found");
        assert_eq!(msg(TransportError::http(500), Endpoint::Detail), "Server error. Please try again later.");
        assert_eq!(msg(TransportError::http(401), Endpoint::Detail), "Access denied");
        assert_eq!(msg(TransportError::http(403), Endpoint::Detail), "Access denied");
        assert_eq!(msg(TransportError::http(429), Endpoint::Detail), "Something went wrong (Error 429)");
        assert_eq!(msg(TransportError::http(502), Endpoint::Detail), "Something went wrong (Error 502)");
    }

    #[test]
    fn test_list_status_codes() {
        assert_eq!(msg(TransportError::http(404), Endpoint::List), "Content not found");
        assert_eq!(msg(TransportError::http(500), Endpoint::List), "Server error. Please try again later.");
        assert_eq!(msg(TransportError::http(401), Endpoint::List), "Access denied. Check your API key.");
        assert_eq!(msg(TransportError::http(403), Endpoint::List), "Access denied. Check your API key.");
        assert_eq!(
            msg(TransportError::http(429), Endpoint::List),
            "Too many requests. Please wait and try again."
        );
        assert_eq!(msg(TransportError::http(418), Endpoint::List), "Something went wrong (Error 418)");
    }

    #[test]
    fn test_rate_limit_only_on_list() {
        assert_eq!(classify(&TransportError::http(429), Endpoint::List), ErrorCategory::RateLimited);
        assert_eq!(
            classify(&TransportError::http(429), Endpoint::Detail),
            ErrorCategory::Other { code: 429 }
        );
    }

    #[test]
    fn test_unknown_passes_message_through() {
        assert_eq!(
            msg(TransportError::Decode("error decoding response body".to_string()), Endpoint::Detail),
            "error decoding response body"
        );
        assert_eq!(msg(TransportError::Other(String::new()), Endpoint::List), "An unexpected error occurred");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let error = TransportError::Http { status: 503, body: "busy".to_string() };
        let first = user_message(&error, Endpoint::List);
        let second = user_message(&error, Endpoint::List);
        assert_eq!(first, second);
        // the response body never leaks into the message
        assert!(!first.as_str().contains("busy"));
    }
}
