use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::{
    error::RequestError,
    request::{error_response::ErrorResponse, route::CompiledRequest},
};

/// What the pull channel reported for one request.
#[derive(Clone, Debug, PartialEq)]
pub enum TransportResponse {
    /// 2xx, with the decoded body (`Null` for empty bodies)
    Success { status: u16, body: Value },
    /// 4xx, with the error body the remote sent
    ClientError { status: u16, body: Value },
    /// 5xx
    ServerError { status: u16 },
    /// No response was received
    NetworkFailure { reason: String },
}

/// The pull channel. Implementations own connection handling and
/// rate-limit compliance, and may delay a request arbitrarily before
/// issuing it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: CompiledRequest) -> TransportResponse;
}

/// Splits a response into the success payload or a classified error.
pub fn classify(response: TransportResponse) -> Result<Value, RequestError> {
    match response {
        TransportResponse::Success { body, .. } => Ok(body),
        TransportResponse::ClientError { status, body } => {
            let (error, message) = ErrorResponse::from_body(&body);
            debug!("Request rejected with {} ({:?}): {}", status, error, message);
            Err(RequestError::Remote {
                status,
                error,
                message,
            })
        }
        TransportResponse::ServerError { status } => Err(RequestError::Server { status }),
        TransportResponse::NetworkFailure { reason } => Err(RequestError::NetworkFailure { reason }),
    }
}
