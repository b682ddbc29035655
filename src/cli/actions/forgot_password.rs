use crate::app::App;
use crate::app_lib::AppConfig;
use crate::cli::actions::login::page_error;
use anyhow::{Context, Result};

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub email: String,
}

/// Execute the forgot-password action.
/// # Errors
/// Returns an error if the email is blank or the provider rejects the request.
pub async fn execute(args: Args) -> Result<()> {
    let app = App::new(args.config).context("failed to initialize client")?;
    let mut page = app.forgot_password_page();
    page.set_email(args.email);
    page.submit().await;

    let message = page
        .status()
        .success()
        .ok_or_else(|| page_error(page.status(), "Failed to send password reset email."))?;
    println!("{message}");
    Ok(())
}
