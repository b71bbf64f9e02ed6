use std::fmt;

use giveaway_core::RunEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidUrl,
    Network,
    Timeout,
    Redirect,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Session,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidUrl => write!(f, "invalid url"),
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::Redirect => write!(f, "redirect rejected"),
            TransportFailure::HttpStatus(code) => write!(f, "http status {code}"),
            TransportFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportFailure::Decode => write!(f, "undecodable body"),
            TransportFailure::Session => write!(f, "session unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<SessionError> for TransportError {
    fn from(err: SessionError) -> Self {
        TransportError::new(TransportFailure::Session, err.to_string())
    }
}

/// Failures that make the session unusable. Any of these aborts the run
/// before a single search is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("bad login: session probe was redirected ({0})")]
    InvalidSession(String),
    #[error("form_key not found")]
    TokenNotFound,
    #[error("session probe failed: {0}")]
    Transport(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("invalid site settings: {0}")]
    Site(TransportError),
    #[error("async runtime unavailable: {0}")]
    Runtime(String),
}

/// What an [`EngineHandle`](crate::EngineHandle) reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SessionReady,
    /// The run ended before dispatching; no searches were issued.
    Aborted(RunError),
    Run(RunEvent),
}
