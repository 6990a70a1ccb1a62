use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::contact::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Success,
    Error,
}

/// Envelope returned by every contacts endpoint.
///
/// Reads carry `data`, writes and errors carry `message`. Absent members are
/// left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JsonResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub data: Option<Vec<Contact>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

impl JsonResponse {
    /// Successful read; an empty result is still a success.
    pub fn contacts(contacts: Vec<Contact>) -> Self {
        Self {
            response_type: ResponseType::Success,
            data: Some(contacts),
            message: None,
        }
    }

    /// Successful write or delete.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Success,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }
}
