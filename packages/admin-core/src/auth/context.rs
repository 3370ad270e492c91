//! Authentication context shared by every page of the console

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::phone::PhoneNumber;
use super::storage::CredentialStore;
use crate::error::StorageError;
use crate::navigation::{redirect_to_sign_in, Navigator};

/// Who the session belongs to, as far as the client knows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMarker {
    /// Rebuilt from a stored credential at startup; nothing else is known
    Restored,
    /// Established by a successful OTP verification in this process
    Verified {
        phone_number: PhoneNumber,
        otp_session_id: String,
    },
}

/// An OTP that was sent and not yet verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOtp {
    pub session_id: String,
    pub phone_number: PhoneNumber,
}

/// Current authentication state
///
/// The OTP session id and the pending phone number share one `Option`, so
/// one is never set without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    is_authenticated: bool,
    user_marker: Option<UserMarker>,
    pending_otp: Option<PendingOtp>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user_marker(&self) -> Option<&UserMarker> {
        self.user_marker.as_ref()
    }

    pub fn otp_session_id(&self) -> Option<&str> {
        self.pending_otp.as_ref().map(|p| p.session_id.as_str())
    }

    pub fn pending_phone_number(&self) -> Option<&PhoneNumber> {
        self.pending_otp.as_ref().map(|p| &p.phone_number)
    }

    fn restored() -> Self {
        Self {
            is_authenticated: true,
            user_marker: Some(UserMarker::Restored),
            pending_otp: None,
        }
    }
}

/// Authentication context handed to every caller of the console core
///
/// Cloning is cheap; all clones share the same session and credential store.
#[derive(Clone)]
pub struct AuthContext {
    session: Arc<RwLock<Session>>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthContext {
    /// Restore state from the credential handle at process start
    ///
    /// A stored token is trusted without asking the server; an expired one
    /// is discovered by the first request that comes back 401. Without a
    /// token the operator is sent to sign-in.
    pub fn bootstrap(
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = match credentials.load() {
            Ok(Some(_)) => {
                info!("Restored session from stored credential");
                Session::restored()
            }
            Ok(None) => {
                info!("No stored credential, operator must sign in");
                redirect_to_sign_in(navigator.as_ref());
                Session::default()
            }
            Err(e) => {
                warn!("Failed to read stored credential: {}. Starting signed out.", e);
                redirect_to_sign_in(navigator.as_ref());
                Session::default()
            }
        };

        Self {
            session: Arc::new(RwLock::new(session)),
            credentials,
            navigator,
        }
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Bearer token from the credential handle
    ///
    /// A store that cannot be read counts as holding no token.
    pub fn token(&self) -> Option<String> {
        match self.credentials.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read stored credential: {}", e);
                None
            }
        }
    }

    /// Sign the operator out
    ///
    /// Safe to call when already signed out.
    pub async fn logout(&self) {
        *self.session.write().await = Session::default();

        if let Err(e) = self.credentials.clear() {
            warn!("Failed to delete stored credential: {}", e);
        }

        redirect_to_sign_in(self.navigator.as_ref());
        info!("Signed out");
    }

    pub(crate) async fn pending_otp(&self) -> Option<PendingOtp> {
        self.session.read().await.pending_otp.clone()
    }

    pub(crate) async fn begin_otp(&self, pending: PendingOtp) {
        self.session.write().await.pending_otp = Some(pending);
    }

    /// Persist the token and mark the session authenticated
    pub(crate) async fn establish(
        &self,
        token: &str,
        marker: UserMarker,
    ) -> Result<(), StorageError> {
        self.credentials.store(token)?;

        let mut session = self.session.write().await;
        session.is_authenticated = true;
        session.user_marker = Some(marker);
        session.pending_otp = None;
        Ok(())
    }
}
