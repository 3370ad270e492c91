// Back-office admin console - client core
//
// Session state, phone/OTP sign-in and the authenticated gateway that every
// console page goes through to reach the remote API.
//
// Callers build an `AuthContext` once at startup (`AuthContext::bootstrap`),
// hand clones of it to an `ApiGateway`, and drive sign-in through `OtpFlow`.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod navigation;
pub mod search;
pub mod types;

pub use api::AdminApi;
pub use auth::{AuthContext, OtpFlow, Session};
pub use config::*;
pub use error::{ApiError, AuthError, GatewayError, StorageError, ValidationError};
pub use gateway::{ApiEnvelope, ApiGateway, CallOutcome, RequestOptions};
pub use navigation::{Navigator, RouteTracker, HOME_ROUTE, SIGN_IN_ROUTE};
