//! Two-step phone/OTP sign-in

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::context::{PendingOtp, UserMarker};
use super::phone::PhoneNumber;
use crate::error::{AuthError, ValidationError};
use crate::gateway::{ApiGateway, CallOutcome, RequestOptions};
use crate::navigation::HOME_ROUTE;

pub const SEND_OTP_PATH: &str = "/auth/admin/send-otp";
pub const LOGIN_PATH: &str = "/auth/admin-login";

/// Codes sent by the SMS provider are this many digits
pub const OTP_LENGTH: usize = 6;

const SEND_FAILED: &str = "Failed to send OTP";
const VERIFY_FAILED: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    PhoneEntry,
    OtpEntry,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    phone_number: &'a str,
    otp: &'a str,
    sms_id: &'a str,
}

#[derive(Deserialize)]
struct LoginData {
    token: Option<String>,
}

/// Sign-in form controller
///
/// Submissions take `&mut self`, so a controller never has two requests in
/// flight. The last error is kept for display until the next submission.
pub struct OtpFlow {
    gateway: ApiGateway,
    step: LoginStep,
    otp: String,
    error: Option<String>,
}

impl OtpFlow {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            gateway,
            step: LoginStep::PhoneEntry,
            otp: String::new(),
            error: None,
        }
    }

    pub fn step(&self) -> LoginStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// OTP as last submitted, kept for correction after a rejection
    pub fn entered_otp(&self) -> &str {
        &self.otp
    }

    /// Send an OTP to `phone`
    ///
    /// The number is validated locally first; a malformed number never
    /// reaches the network.
    pub async fn request_otp(&mut self, phone: &str) -> Result<(), AuthError> {
        self.error = None;
        let result = self.send_otp(phone).await;
        self.record(result)
    }

    async fn send_otp(&mut self, phone: &str) -> Result<(), AuthError> {
        let phone = PhoneNumber::parse(phone)?;

        let options = RequestOptions::post().query("phoneNumber", &phone);
        let outcome = self
            .gateway
            .call_public::<String>(SEND_OTP_PATH, options)
            .await
            .map_err(|e| {
                error!("Failed to send OTP: {}", e);
                AuthError::Transport
            })?;

        let envelope = match outcome {
            CallOutcome::Envelope(envelope) => envelope,
            CallOutcome::SignedOut | CallOutcome::UnexpectedContentType(_) => {
                return Err(AuthError::rejected(0, "", SEND_FAILED));
            }
        };

        let session_id = match (envelope.is_ok(), &envelope.data) {
            (true, Some(id)) => id.clone(),
            _ => {
                warn!(status = envelope.status, "OTP send rejected");
                return Err(AuthError::rejected(
                    envelope.status,
                    &envelope.message,
                    SEND_FAILED,
                ));
            }
        };

        self.gateway
            .auth()
            .begin_otp(PendingOtp {
                session_id,
                phone_number: phone.clone(),
            })
            .await;
        self.step = LoginStep::OtpEntry;

        info!("OTP sent to {}", phone);
        Ok(())
    }

    /// Verify `code` against the pending OTP session
    ///
    /// Non-digits are dropped and the code is cut to [`OTP_LENGTH`]. On success the credential is stored, the session becomes
    /// authenticated and the console navigates to the main application.
    pub async fn verify_otp(&mut self, code: &str) -> Result<(), AuthError> {
        self.error = None;
        self.otp = sanitize_otp(code);
        let code = self.otp.clone();
        let result = self.check_otp(&code).await;
        self.record(result)
    }

    async fn check_otp(&mut self, code: &str) -> Result<(), AuthError> {
        let Some(pending) = self.gateway.auth().pending_otp().await else {
            warn!("OTP verification attempted without a pending OTP session");
            self.step = LoginStep::PhoneEntry;
            return Err(AuthError::SessionExpired);
        };

        if code.is_empty() {
            return Err(ValidationError::MissingOtp.into());
        }

        let body = LoginRequest {
            phone_number: pending.phone_number.as_str(),
            otp: code,
            sms_id: &pending.session_id,
        };
        let options = RequestOptions::post()
            .json(&body)
            .map_err(|_| AuthError::Transport)?;

        let outcome = self
            .gateway
            .call_public::<LoginData>(LOGIN_PATH, options)
            .await
            .map_err(|e| {
                error!("OTP verification request failed: {}", e);
                AuthError::Transport
            })?;

        let envelope = match outcome {
            CallOutcome::Envelope(envelope) => envelope,
            CallOutcome::SignedOut | CallOutcome::UnexpectedContentType(_) => {
                return Err(AuthError::rejected(0, "", VERIFY_FAILED));
            }
        };

        let token = match (envelope.is_ok(), envelope.data.as_ref()) {
            (true, Some(LoginData { token: Some(token) })) => token.clone(),
            _ => {
                warn!(status = envelope.status, "OTP verification rejected");
                return Err(AuthError::rejected(
                    envelope.status,
                    &envelope.message,
                    VERIFY_FAILED,
                ));
            }
        };

        let marker = UserMarker::Verified {
            phone_number: pending.phone_number.clone(),
            otp_session_id: pending.session_id.clone(),
        };
        self.gateway
            .auth()
            .establish(&token, marker)
            .await
            .map_err(|e| {
                error!("Failed to store credential: {}", e);
                AuthError::Storage
            })?;

        info!("Operator {} signed in", pending.phone_number);
        self.otp.clear();
        self.step = LoginStep::PhoneEntry;
        self.gateway.auth().navigator().redirect(HOME_ROUTE);
        Ok(())
    }

    /// Back to phone entry; drops the entered OTP and any error text
    pub fn change_phone_number(&mut self) {
        self.step = LoginStep::PhoneEntry;
        self.otp.clear();
        self.error = None;
    }

    fn record(&mut self, result: Result<(), AuthError>) -> Result<(), AuthError> {
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }
}

/// Keep only digits and cap at the code length, the way the OTP field filters input
fn sanitize_otp(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(OTP_LENGTH)
        .collect()
}
