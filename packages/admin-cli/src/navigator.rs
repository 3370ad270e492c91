//! Route handling for a terminal session

use admin_core::{Navigator, RouteTracker, SIGN_IN_ROUTE};
use colored::Colorize;

/// Tracks the route and tells the operator when the session ends
pub struct TerminalNavigator {
    routes: RouteTracker,
    quiet: bool,
}

impl TerminalNavigator {
    pub fn new(start: &str, quiet: bool) -> Self {
        Self {
            routes: RouteTracker::new(start),
            quiet,
        }
    }
}

impl Navigator for TerminalNavigator {
    fn current_route(&self) -> String {
        self.routes.current_route()
    }

    fn redirect(&self, route: &str) {
        if route == SIGN_IN_ROUTE && !self.quiet {
            eprintln!(
                "{}",
                "Signed out. Run `admin login` to sign in again.".bright_yellow()
            );
        }
        self.routes.redirect(route);
    }
}
