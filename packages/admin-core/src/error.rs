//! Error types shared across the console core

/// Failure of a gateway request that the gateway does not handle itself.
///
/// Session invalidation and content-type mismatches are not errors; they come
/// back as [`crate::gateway::CallOutcome`] variants.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Failure of a typed resource call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Gateway(e.into())
    }
}

/// Credential handle persistence failure
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("No location available for the credential file")]
    NoDataDir,
}

/// Locally detected form problem. Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhoneNumber,

    #[error("Please enter the verification code")]
    MissingOtp,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Discount value is required")]
    MissingDiscount,

    #[error("End date must not be before start date")]
    EndBeforeStart,

    #[error("No valid Id, Please enter valid")]
    InvalidOrderId,
}

/// Outcome of a failed sign-in step, phrased for the operator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Session expired. Please try again.")]
    SessionExpired,

    /// The server answered but refused; the message is shown as-is.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("An error occurred. Please try again.")]
    Transport,

    #[error("Could not save the sign-in credential")]
    Storage,
}

impl AuthError {
    pub(crate) fn rejected(status: u16, message: &str, fallback: &str) -> Self {
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        };
        AuthError::Rejected { status, message }
    }
}
