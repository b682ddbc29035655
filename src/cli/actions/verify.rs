use crate::app::App;
use crate::app_lib::AppConfig;
use crate::cli::actions::login::{sign_in, Method};
use crate::cli::commands::credentials::Credentials;
use crate::routes::VerificationStatus;
use anyhow::{bail, Context, Result};

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub credentials: Credentials,
    pub resend: bool,
}

/// Execute the verify action: sign in, optionally resend the email, then
/// reload the user and report its verification state.
/// # Errors
/// Returns an error if the sign-in or the verification check fails.
pub async fn execute(args: Args) -> Result<()> {
    let app = App::new(args.config).context("failed to initialize client")?;
    sign_in(&app, Method::Password(args.credentials)).await?;

    let mut page = app.signup_page();
    if args.resend {
        page.resend_verification().await;
        if let Some(message) = page.verification_message() {
            println!("{message}");
        }
    }

    match page.check_verification().await {
        Some(route) => {
            println!("{}", page.verification_message().unwrap_or_default());
            println!("Next: {}", route.path());
        }
        None if page.verification() == VerificationStatus::AwaitingVerification => {
            println!("{}", page.verification_message().unwrap_or_default());
        }
        None => bail!(
            "{}",
            page.verification_message()
                .unwrap_or("Could not check verification status. Please try again.")
        ),
    }

    Ok(())
}
