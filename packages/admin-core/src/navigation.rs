//! Where the console currently is, and how the core moves it
//!
//! The core never renders anything. It only needs to know the current route
//! and to send the operator to sign-in or to the main application.

use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Sign-in entry point
pub const SIGN_IN_ROUTE: &str = "/signin";
/// Main application landing route after sign-in
pub const HOME_ROUTE: &str = "/dashboard";

/// Route control owned by the front-end
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;

    /// One-way navigation: the previous route is replaced, not stacked.
    fn redirect(&self, route: &str);
}

/// Redirect to sign-in unless already there
pub(crate) fn redirect_to_sign_in(navigator: &dyn Navigator) {
    if navigator.current_route() != SIGN_IN_ROUTE {
        navigator.redirect(SIGN_IN_ROUTE);
    }
}

/// In-process navigator that records every redirect
///
/// Used by the terminal front-end and by tests.
#[derive(Debug)]
pub struct RouteTracker {
    current: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl RouteTracker {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(start.into()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// Every redirect issued so far, oldest first
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RouteTracker {
    fn current_route(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn redirect(&self, route: &str) {
        debug!(route, "Redirecting");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = route.to_string();
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_string());
    }
}
