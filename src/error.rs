use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid window {start} .. {end}: {reason}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason: &'static str,
    },

    #[error("interval `{id}` ends before it starts")]
    InvalidInterval { id: String },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A fetch was requested before the selection allows one.
    #[error("{0}")]
    Precondition(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failure reported by the schedule data source.
///
/// Relayed to the presentation layer verbatim; `status` carries the
/// HTTP-like status code when the transport had one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct UpstreamError {
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    #[must_use]
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds the error for a non-success HTTP status without a server detail.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        Self::new(Some(status), format!("HTTP error! status: {status}"))
    }
}
