//! Response shapes returned by the remote API

use serde::{Deserialize, Deserializer, Serialize};

/// Uniform `{status, message, data}` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Outcome code; filled from the HTTP status when the body omits it
    #[serde(default)]
    pub status: u16,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope built locally, for requests that need no round trip
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            message: String::new(),
            data: Some(data),
        }
    }

    /// `status == 200`, the only code the sign-in endpoints treat as success
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Server message, or `fallback` when it sent none
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.message.trim().is_empty() {
            fallback
        } else {
            &self.message
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// What a gateway call produced, short of a transport failure
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T> {
    Envelope(ApiEnvelope<T>),
    /// No credential, or the server answered 401. Logout already ran.
    SignedOut,
    /// The response was not JSON; carries the declared content type.
    UnexpectedContentType(String),
}

impl<T> CallOutcome<T> {
    /// Collapse to the envelope, treating both handled failures as "no result"
    pub fn into_envelope(self) -> Option<ApiEnvelope<T>> {
        match self {
            CallOutcome::Envelope(envelope) => Some(envelope),
            CallOutcome::SignedOut | CallOutcome::UnexpectedContentType(_) => None,
        }
    }

    pub fn is_signed_out(&self) -> bool {
        matches!(self, CallOutcome::SignedOut)
    }
}

/// Paginated list payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default = "one")]
    pub total_pages: u32,
}

fn one() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 1,
        }
    }
}
