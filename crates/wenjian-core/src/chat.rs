//! Request/response types exchanged with the transport.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, WenjianError, WenjianResult};
use crate::rules::Category;

/// Sentinel user id for requests that omit one.
pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
}

/// Wire shape; both fields may be absent. `user_id` may be a string, number or bool.
#[derive(Debug, Deserialize)]
struct RawChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user_id: Option<serde_json::Value>,
}

fn user_id_text(value: Option<serde_json::Value>) -> WenjianResult<Option<String>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            Ok(Some(v.to_string()))
        }
        Some(_) => Err(WenjianError::InvalidPayload(
            "user_id must be a string or a number".to_string(),
        )),
    }
}

impl ChatRequest {
    /// A user id that is blank after trimming becomes [`ANONYMOUS_USER`];
    /// any other id is kept as sent.
    pub fn new(message: impl Into<String>, user_id: Option<&str>) -> Self {
        let user_id = user_id
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(ANONYMOUS_USER)
            .to_string();
        Self {
            message: message.into(),
            user_id,
        }
    }

    /// Parses a JSON body. Non-objects, empty objects and wrongly typed fields
    /// are rejected; a missing `message` becomes an empty message.
    pub fn from_json_slice(body: &[u8]) -> WenjianResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| WenjianError::InvalidPayload(e.to_string()))?;

        match value.as_object() {
            Some(map) if !map.is_empty() => {}
            _ => {
                return Err(WenjianError::InvalidPayload(
                    "expected a non-empty JSON object".to_string(),
                ))
            }
        }

        let raw: RawChatRequest = serde_json::from_value(value)
            .map_err(|e| WenjianError::InvalidPayload(e.to_string()))?;

        let user_id = user_id_text(raw.user_id)?;
        Ok(Self::new(raw.message.unwrap_or_default(), user_id.as_deref()))
    }
}

/// What the responder decided for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub reply: String,
    pub status: Status,
    /// `None` for the fallback menu and for error replies.
    pub category: Option<Category>,
    /// Set on error outcomes so the transport can pick a status code.
    pub error: Option<ErrorKind>,
}

impl ChatOutcome {
    pub fn success(reply: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            reply: reply.into(),
            status: Status::Success,
            category,
            error: None,
        }
    }

    pub fn failure(err: &WenjianError) -> Self {
        Self {
            reply: err.user_reply().to_string(),
            status: Status::Error,
            category: None,
            error: Some(err.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub status: Status,
    pub user_id: String,
    pub timestamp: String,
}

impl ChatResponse {
    pub fn from_outcome(outcome: &ChatOutcome, user_id: &str) -> Self {
        Self {
            reply: outcome.reply.clone(),
            status: outcome.status,
            user_id: user_id.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Envelope for a request that never reached the responder.
    pub fn rejected(err: &WenjianError) -> Self {
        Self::from_outcome(&ChatOutcome::failure(err), ANONYMOUS_USER)
    }
}
