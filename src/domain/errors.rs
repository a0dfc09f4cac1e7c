use http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum TunnelError {
    UnsupportedMethod(String),
    InvalidRequest(String),
    InvalidTarget(String),
    DialFailed(String),
    Tracking(String),
}

impl TunnelError {
    /// Status code reported to the client. Everything except an unsupported
    /// verb maps to a plain 500; the reason phrase carries the detail.
    pub fn status(&self) -> StatusCode {
        match self {
            TunnelError::UnsupportedMethod(_) => StatusCode::NOT_IMPLEMENTED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for TunnelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunnelError::UnsupportedMethod(method) => {
                write!(f, "Unsupported method ('{}')", method)
            }
            TunnelError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            TunnelError::InvalidTarget(msg) => write!(f, "Invalid target: {}", msg),
            TunnelError::DialFailed(msg) => write!(f, "Connection failed: {}", msg),
            TunnelError::Tracking(msg) => write!(f, "Session tracking failed: {}", msg),
        }
    }
}

impl std::error::Error for TunnelError {}

pub type Result<T> = std::result::Result<T, TunnelError>;
