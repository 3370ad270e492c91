//! Application context with shared state and utilities

use admin_core::auth::FileCredentialStore;
use admin_core::config::Config;
use admin_core::{AdminApi, ApiEnvelope, ApiGateway, AuthContext, CallOutcome};
use anyhow::{bail, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::sync::Arc;

use crate::navigator::TerminalNavigator;

/// Application context passed to all commands
pub struct AppContext {
    pub quiet: bool,
    pub config: Config,
    pub auth: AuthContext,
    pub gateway: ApiGateway,
    pub api: AdminApi,
}

impl AppContext {
    /// Wire the console core for a command standing in for `route`
    pub fn new(config: Config, route: &str, quiet: bool) -> Self {
        let store = Arc::new(FileCredentialStore::new(
            config.credential_file.clone(),
            config.credential_ttl_days,
        ));
        let navigator = Arc::new(TerminalNavigator::new(route, quiet));
        let auth = AuthContext::bootstrap(store, navigator);
        let gateway = ApiGateway::new(config.api_origin.clone(), auth.clone());
        let api = AdminApi::new(gateway.clone()).with_page_size(config.page_size);

        Self {
            quiet,
            config,
            auth,
            gateway,
            api,
        }
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.quiet {
            return Ok(default);
        }
        Ok(Confirm::with_theme(&self.theme())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    /// Unwrap a call result for display
    ///
    /// Sign-out and non-JSON answers become errors; a non-2xx envelope
    /// becomes an error carrying the server message.
    pub fn expect_envelope<T>(&self, outcome: CallOutcome<T>) -> Result<ApiEnvelope<T>> {
        let envelope = match outcome {
            CallOutcome::Envelope(envelope) => envelope,
            CallOutcome::SignedOut => bail!("Not signed in. Run `admin login` first."),
            CallOutcome::UnexpectedContentType(content_type) => bail!(
                "Server answered with {:?} instead of JSON",
                content_type
            ),
        };
        if !envelope.is_success() {
            bail!(
                "Request failed ({}): {}",
                envelope.status,
                envelope.message_or("no message")
            );
        }
        Ok(envelope)
    }

    pub fn print_header(&self, msg: &str) {
        if !self.quiet {
            println!();
            println!("{}", style(msg).bold());
        }
    }

    pub fn print_success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).green());
        }
    }

    pub fn print_warning(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).yellow());
        }
    }

    pub fn print_info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).cyan());
        }
    }
}
