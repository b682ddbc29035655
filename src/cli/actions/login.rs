use crate::app::App;
use crate::app_lib::AppConfig;
use crate::cli::commands::credentials::Credentials;
use crate::features::auth::FederatedCredential;
use crate::routes::{FormStatus, Route};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use tracing::debug;

/// How the user signs in.
#[derive(Debug)]
pub enum Method {
    Password(Credentials),
    Google(SecretString),
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub method: Method,
}

/// Execute the login action.
/// # Errors
/// Returns an error if the client cannot be built or the provider rejects the sign-in.
pub async fn execute(args: Args) -> Result<()> {
    let app = App::new(args.config).context("failed to initialize client")?;
    let route = sign_in(&app, args.method).await?;
    let user = app
        .session()
        .current_user()
        .context("sign-in finished without a user")?;

    println!("Signed in as {} (uid {})", user.email, user.uid);
    if !user.email_verified {
        println!("Email not verified yet; run `recruitdesk verify` after clicking the link.");
    }
    println!("Next: {}", route.path());
    Ok(())
}

/// Signs in through the login page and answers where it redirects.
///
/// # Errors
/// Returns the page error when the sign-in fails.
pub async fn sign_in(app: &App, method: Method) -> Result<Route> {
    let mut page = app.login_page();
    let route = match method {
        Method::Password(credentials) => {
            debug!(email = %credentials.email, "signing in with password");
            page.set_email(credentials.email);
            page.set_password(credentials.password);
            page.submit().await
        }
        Method::Google(id_token) => {
            debug!("signing in with Google");
            page.sign_in_with_federated(&FederatedCredential::google(id_token))
                .await
        }
    };

    route.ok_or_else(|| page_error(page.status(), "Failed to sign in."))
}

/// Turns a failed form into an error carrying its message.
pub(crate) fn page_error(status: &FormStatus, fallback: &str) -> anyhow::Error {
    anyhow!("{}", status.error().unwrap_or(fallback))
}
