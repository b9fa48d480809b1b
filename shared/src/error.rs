use thiserror::Error;

use crate::permission::Permission;

/// Errors raised while decoding identifiers and inbound payloads
///
/// Decode failures are scoped to a single unit of work: the offending
/// envelope or field is dropped and the stream keeps flowing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Identifier was not a decimal `u64`
    #[error("Malformed identifier {value:?}, expected a decimal unsigned 64-bit integer")]
    MalformedIdentifier { value: String },

    /// A required field was absent from a payload
    #[error("Payload is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A payload did not match the expected shape
    #[error("Malformed {what} payload: {reason}")]
    MalformedPayload { what: &'static str, reason: String },
}

impl DecodeError {
    pub fn payload(what: &'static str, err: serde_json::Error) -> Self {
        Self::MalformedPayload {
            what,
            reason: err.to_string(),
        }
    }
}

/// Errors raised by identifier helpers that accept optional entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// An entity reference was required but none was provided
    #[error("Entity reference is absent, cannot derive a creation time")]
    MissingEntity,
}

/// Errors raised by the local permission preflight
///
/// Never produced by the network: a `PermissionError` means no request left
/// the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The acting member lacks a named permission in the target scope
    #[error("Missing permission {permission:?}")]
    Missing { permission: Permission },

    /// The operation is refused for a reason not tied to a single permission
    #[error("{reason}")]
    Refused { reason: &'static str },
}

impl PermissionError {
    pub fn permission(&self) -> Option<Permission> {
        match self {
            Self::Missing { permission } => Some(*permission),
            Self::Refused { .. } => None,
        }
    }
}
