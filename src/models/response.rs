use serde::{Deserialize, Serialize};

/// Error envelope returned by the roster API on non-success responses.
///
/// Servers are not consistent about the field name, so both `message` and
/// `error` are accepted; `message` wins when both are present.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|m| !m.trim().is_empty()))
    }
}

/// Generic acknowledgement body (`{"message": "Player deleted"}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
