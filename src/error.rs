use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ApiErrorBody;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    Unauthorized(Option<String>),

    #[error("Request failed with status {}{}", .status, .message.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

impl ClientError {
    /// Build the error for a non-success response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(ApiErrorBody::into_message);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ClientError::Unauthorized(message)
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Message supplied by the server in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } | ClientError::Unauthorized(message) => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Best available human readable message: the server's own wording first.
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_) | ClientError::NotAuthenticated
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
