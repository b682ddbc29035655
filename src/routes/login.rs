//! Login page: email/password sign-in plus federated sign-in. Provider
//! failures are shown using the session's mapped `last_error`.

use super::{FormState, FormStatus, Route};
use crate::features::auth::{FederatedCredential, SessionContext};
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug, Default)]
pub struct LoginFields {
    pub email: String,
    pub password: SecretString,
}

pub struct LoginPage {
    session: SessionContext,
    form: FormState<LoginFields>,
}

impl LoginPage {
    #[must_use]
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            form: FormState::default(),
        }
    }

    /// Where to go instead of showing the page: signed-in users go home.
    #[must_use]
    pub fn initial_redirect(&self) -> Option<Route> {
        self.session.is_authenticated().then_some(Route::Home)
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.form.edit(|fields| fields.email = email);
    }

    pub fn set_password(&mut self, password: SecretString) {
        self.form.edit(|fields| fields.password = password);
    }

    #[must_use]
    pub fn fields(&self) -> &LoginFields {
        self.form.fields()
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        self.form.status()
    }

    pub fn retry(&mut self) {
        self.session.clear_error();
        self.form.retry();
    }

    pub async fn submit(&mut self) -> Option<Route> {
        if !self.form.begin_submit() {
            return None;
        }
        self.session.clear_error();

        let fields = self.form.fields().clone();
        if fields.email.trim().is_empty() || fields.password.expose_secret().is_empty() {
            self.form.fail("Email and password are required.");
            return None;
        }

        if self
            .session
            .sign_in(fields.email.trim(), &fields.password)
            .await
            .is_some()
        {
            self.form.succeed("Signed in successfully.");
            Some(Route::Home)
        } else {
            self.fail_from_session("Failed to sign in.");
            None
        }
    }

    pub async fn sign_in_with_federated(
        &mut self,
        credential: &FederatedCredential,
    ) -> Option<Route> {
        if !self.form.begin_submit() {
            return None;
        }
        self.session.clear_error();

        if self
            .session
            .sign_in_with_federated(credential)
            .await
            .is_some()
        {
            self.form.succeed("Signed in successfully.");
            Some(Route::Users)
        } else {
            self.fail_from_session("Failed to sign in with Google.");
            None
        }
    }

    fn fail_from_session(&mut self, fallback: &str) {
        let message = self
            .session
            .last_error()
            .unwrap_or_else(|| fallback.to_string());
        self.form.fail(message);
    }
}
