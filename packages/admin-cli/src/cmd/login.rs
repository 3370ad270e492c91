//! Sign-in, sign-out and session status

use admin_core::auth::{LoginStep, OtpFlow, PhoneNumber, UserMarker};
use admin_core::AuthError;
use anyhow::{anyhow, Result};
use console::style;
use dialoguer::{Input, Select};

use crate::context::AppContext;

/// Interactive phone/OTP sign-in
pub async fn login(ctx: &AppContext) -> Result<()> {
    if ctx.auth.is_authenticated().await && !ctx.confirm("Already signed in. Sign in again?", false)? {
        return Ok(());
    }

    ctx.print_header("Sign in");
    let mut flow = OtpFlow::new(ctx.gateway.clone());

    loop {
        match flow.step() {
            LoginStep::PhoneEntry => {
                let raw: String = Input::with_theme(&ctx.theme())
                    .with_prompt("Phone number")
                    .interact_text()?;
                let phone = PhoneNumber::sanitize_input(&raw);

                match flow.request_otp(&phone).await {
                    Ok(()) => ctx.print_info(&format!("OTP sent to {}", phone)),
                    Err(e) => ctx.print_warning(&e.to_string()),
                }
            }
            LoginStep::OtpEntry => {
                let options = ["Enter OTP", "Change phone number", "Cancel"];
                let choice = Select::with_theme(&ctx.theme())
                    .items(&options)
                    .default(0)
                    .interact()?;

                match choice {
                    0 => {
                        let code: String = Input::with_theme(&ctx.theme())
                            .with_prompt("OTP")
                            .with_initial_text(flow.entered_otp())
                            .allow_empty(true)
                            .interact_text()?;

                        match flow.verify_otp(&code).await {
                            Ok(()) => {
                                ctx.print_success("Signed in.");
                                return Ok(());
                            }
                            Err(AuthError::Storage) => {
                                return Err(anyhow!(
                                    "Signed in, but the credential could not be saved to {}",
                                    ctx.config.credential_file.display()
                                ));
                            }
                            Err(e) => ctx.print_warning(&e.to_string()),
                        }
                    }
                    1 => flow.change_phone_number(),
                    _ => return Ok(()),
                }
            }
        }
    }
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.auth.logout().await;
    ctx.print_success("Signed out.");
    Ok(())
}

pub async fn status(ctx: &AppContext) -> Result<()> {
    let session = ctx.auth.session().await;

    ctx.print_header("Admin console");
    println!("  API:        {}", style(ctx.config.api_origin.as_str()).cyan());
    println!(
        "  Credential: {}",
        style(ctx.config.credential_file.display()).dim()
    );

    let state = match session.user_marker() {
        Some(UserMarker::Verified { phone_number, .. }) if session.is_authenticated() => {
            style(format!("signed in as {}", phone_number)).green()
        }
        Some(UserMarker::Restored) if session.is_authenticated() => {
            style("signed in (stored credential)".to_string()).green()
        }
        _ => style("signed out".to_string()).red(),
    };
    println!("  Session:    {}", state);

    Ok(())
}
