use thiserror::Error;

use cordial_shared::{ChannelType, DecodeError, PermissionError, Snowflake};

use crate::request::ErrorResponse;

/// Errors that abort the handling of a single inbound envelope
///
/// These never escape the dispatcher: the envelope is logged and dropped and
/// the stream continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    /// Raw bytes were not a `{type, payload}` envelope
    #[error("Malformed envelope: {reason}")]
    MalformedEnvelope { reason: String },

    /// The envelope's payload did not decode
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The referenced channel exists but cannot carry this event
    #[error("Channel {channel_id} of type {kind:?} cannot carry a {event} event")]
    UnexpectedChannelType {
        channel_id: Snowflake,
        kind: ChannelType,
        event: &'static str,
    },
}

/// Errors surfaced by outbound operations
///
/// `InvalidArgument`, `IllegalState` and `Permission` are raised while an
/// action is being built and mean nothing was sent. Everything else arrives
/// through the completion of a queued action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// An argument was absent or outside its documented range
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The operation is not valid for the current cached state
    #[error("Illegal state: {reason}")]
    IllegalState { reason: &'static str },

    /// The local permission preflight failed
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// The remote rejected the request with a classified error
    #[error("Remote error {status} ({error:?}): {message}")]
    Remote {
        status: u16,
        error: ErrorResponse,
        message: String,
    },

    /// The remote failed without classifying the failure
    #[error("Remote server error {status}")]
    Server { status: u16 },

    /// The request never got a response; eligible for a caller-driven retry
    #[error("Network failure: {reason}")]
    NetworkFailure { reason: String },

    /// A success payload could not be turned into the expected result
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The completion was dropped before a result was delivered
    #[error("Request was dropped before it completed")]
    Canceled,

    /// No async runtime was available to execute requests on
    #[error("No tokio runtime is available to execute requests")]
    NoRuntime,
}

impl RequestError {
    pub fn invalid_argument<S: Into<String>>(reason: S) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission(_))
    }

    /// Whether retrying the same request could succeed without any change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. } | Self::Server { .. })
    }
}
