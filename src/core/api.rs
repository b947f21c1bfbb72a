//! Request and response payloads for the user-facing operations.

use serde::{Deserialize, Serialize};

use crate::error::{Error, FieldError, Status};

/// A provision or wrap request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRequest {
    #[serde(default)]
    pub key_name: Option<String>,
    #[serde(default)]
    pub client_public_key: Option<String>,
}

impl KeyRequest {
    /// Request naming a key with no recipient.
    pub fn named(key_name: impl Into<String>) -> Self {
        Self {
            key_name: Some(key_name.into()),
            client_public_key: None,
        }
    }

    /// Request naming a key and a recipient public key.
    pub fn for_recipient(key_name: impl Into<String>, client_public_key: impl Into<String>) -> Self {
        Self {
            key_name: Some(key_name.into()),
            client_public_key: Some(client_public_key.into()),
        }
    }
}

/// Successful response body. Absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped_key: Option<String>,
}

impl Response {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            wrapped_key: None,
        }
    }

    pub fn wrapped_key(wrapped_key: impl Into<String>) -> Self {
        Self {
            message: None,
            wrapped_key: Some(wrapped_key.into()),
        }
    }
}

/// Caller-facing rendering of an operation's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Ok(Response),
    Invalid(Vec<FieldError>),
    Failed { message: String },
}

impl Reply {
    /// Render an operation result. Server errors carry no internal detail.
    pub fn from_result(result: &crate::error::Result<Response>) -> Self {
        match result {
            Ok(response) => Reply::Ok(response.clone()),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn from_error(error: &Error) -> Self {
        match (error.status(), error.field_errors()) {
            (Status::ClientError, Some(fields)) => Reply::Invalid(fields.to_vec()),
            _ => Reply::Failed {
                message: "internal server error".to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<Status> {
        match self {
            Reply::Ok(_) => None,
            Reply::Invalid(_) => Some(Status::ClientError),
            Reply::Failed { .. } => Some(Status::ServerError),
        }
    }
}
