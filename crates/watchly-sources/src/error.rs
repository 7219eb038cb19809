use std::error::Error as StdError;
use thiserror::Error;

/// Network or HTTP level failure of a catalog request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Host could not be resolved or reached at all.
    #[error("host unreachable: {0}")]
    Unreachable(String),
    #[error("request timed out")]
    Timeout,
    /// Connection reset, refused, broken pipe and friends.
    #[error("network I/O failure: {0}")]
    Io(String),
    /// Well-formed response with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn http(status: u16) -> Self {
        TransportError::Http { status, body: String::new() }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the api key as a query parameter.
        let err = err.without_url();
        let message = err.to_string();

        if is_dns_failure(&err) {
            return TransportError::Unreachable(message);
        }
        if err.is_timeout() || has_io_kind(&err, std::io::ErrorKind::TimedOut) {
            return TransportError::Timeout;
        }
        if let Some(status) = err.status() {
            return TransportError::Http { status: status.as_u16(), body: String::new() };
        }
        if err.is_decode() {
            return TransportError::Decode(message);
        }
        if err.is_connect() || err.is_request() || err.is_body() || chain_has_io_error(&err) {
            return TransportError::Io(message);
        }
        TransportError::Other(message)
    }
}

fn error_chain<'a>(err: &'a (dyn StdError + 'static)) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

// hyper reports resolver failures as "dns error: ..." somewhere down the chain
fn is_dns_failure(err: &reqwest::Error) -> bool {
    error_chain(err).any(|e| {
        let text = e.to_string().to_lowercase();
        text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
            || text.contains("no such host")
    })
}

fn has_io_kind(err: &reqwest::Error, kind: std::io::ErrorKind) -> bool {
    error_chain(err)
        .filter_map(|e| e.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == kind)
}

fn chain_has_io_error(err: &reqwest::Error) -> bool {
    error_chain(err).any(|e| e.downcast_ref::<std::io::Error>().is_some())
}
