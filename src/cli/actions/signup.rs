use crate::app::App;
use crate::app_lib::AppConfig;
use crate::cli::actions::login::{page_error, Method};
use crate::features::auth::FederatedCredential;
use anyhow::{Context, Result};
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub method: Method,
    /// Defaults to the password when absent.
    pub confirm_password: Option<SecretString>,
}

/// Execute the signup action.
/// # Errors
/// Returns an error if validation fails or the provider rejects the signup.
pub async fn execute(args: Args) -> Result<()> {
    let app = App::new(args.config).context("failed to initialize client")?;
    let mut page = app.signup_page();

    match args.method {
        Method::Password(credentials) => {
            let confirm = args
                .confirm_password
                .unwrap_or_else(|| credentials.password.clone());
            page.set_email(credentials.email);
            page.set_password(credentials.password);
            page.set_confirm_password(confirm);
            page.submit().await;

            if page.status().error().is_some() {
                return Err(page_error(page.status(), "Failed to sign up."));
            }
            if let Some(message) = page.verification_message() {
                println!("{message}");
            }
        }
        Method::Google(id_token) => {
            let route = page
                .sign_up_with_federated(&FederatedCredential::google(id_token))
                .await
                .ok_or_else(|| page_error(page.status(), "Failed to sign in with Google."))?;
            println!("Signed up with Google. Next: {}", route.path());
        }
    }

    Ok(())
}
