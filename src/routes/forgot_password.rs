//! Forgot-password page: sends a reset email for the given address.

use super::{FormState, FormStatus};
use crate::features::auth::SessionContext;

pub struct ForgotPasswordPage {
    session: SessionContext,
    form: FormState<String>,
}

impl ForgotPasswordPage {
    #[must_use]
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            form: FormState::default(),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.form.edit(|value| *value = email);
    }

    #[must_use]
    pub fn email(&self) -> &str {
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

    pub async fn submit(&mut self) {
        if !self.form.begin_submit() {
            return;
        }
        self.session.clear_error();

        let email = self.form.fields().trim().to_string();
        if email.is_empty() {
            self.form.fail("Please enter your email address.");
            return;
        }

        if self.session.send_password_reset(&email).await {
            self.form.fields_mut().clear();
            self.form
                .succeed("Password reset email sent! Please check your inbox (and spam folder).");
        } else {
            let message = self
                .session
                .last_error()
                .unwrap_or_else(|| "Failed to send password reset email.".to_string());
            self.form.fail(message);
        }
    }
}
