//! Operator authentication
//!
//! - Phone number validation
//! - Durable credential handle (bearer token)
//! - Session state and logout
//! - Two-step phone/OTP sign-in

mod context;
mod otp;
mod phone;
mod storage;

pub use context::{AuthContext, PendingOtp, Session, UserMarker};
pub use otp::{LoginStep, OtpFlow, LOGIN_PATH, OTP_LENGTH, SEND_OTP_PATH};
pub use phone::PhoneNumber;
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
