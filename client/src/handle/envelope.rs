use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HandleError;

/// One inbound protocol event: a type tag and its payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

impl Envelope {
    pub fn new(kind: &str, payload: Value) -> Self {
        Self {
            kind: kind.to_string(),
            payload,
            sequence: None,
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, HandleError> {
        serde_json::from_slice(bytes).map_err(|err| HandleError::MalformedEnvelope {
            reason: err.to_string(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        // Value and String fields always serialize
        serde_json::to_vec(self).unwrap_or_default()
    }
}
