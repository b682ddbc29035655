//! Signup page: account creation followed by email verification.
//!
//! Flow Overview: validate locally, create the account, send the verification
//! email, then let the user check (by reloading the provider user) until the
//! verified flag is set. A verified user is sent home.

use super::{FormState, FormStatus, Route};
use crate::features::auth::{FederatedCredential, SessionContext};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Minimum password length accepted before contacting the provider.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Debug, Default)]
pub struct SignupFields {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerificationStatus {
    #[default]
    NotStarted,
    AwaitingVerification,
    Checking,
    Verified,
}

pub struct SignupPage {
    session: SessionContext,
    form: FormState<SignupFields>,
    verification: VerificationStatus,
    verification_message: Option<String>,
}

impl SignupPage {
    #[must_use]
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            form: FormState::default(),
            verification: VerificationStatus::NotStarted,
            verification_message: None,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.form.edit(|fields| fields.email = email);
    }

    pub fn set_password(&mut self, password: SecretString) {
        self.form.edit(|fields| fields.password = password);
    }

    pub fn set_confirm_password(&mut self, password: SecretString) {
        self.form.edit(|fields| fields.confirm_password = password);
    }

    #[must_use]
    pub fn fields(&self) -> &SignupFields {
        self.form.fields()
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        self.form.status()
    }

    #[must_use]
    pub fn verification(&self) -> VerificationStatus {
        self.verification
    }

    #[must_use]
    pub fn verification_message(&self) -> Option<&str> {
        self.verification_message.as_deref()
    }

    pub fn retry(&mut self) {
        self.session.clear_error();
        self.form.retry();
    }

    /// Creates the account and sends the verification email.
    pub async fn submit(&mut self) {
        if !self.form.begin_submit() {
            return;
        }
        self.session.clear_error();
        self.verification_message = None;

        let fields = self.form.fields().clone();
        if let Err(message) = validate(&fields) {
            self.form.fail(message);
            return;
        }

        let email = fields.email.trim();
        let Some(user) = self.session.sign_up(email, &fields.password).await else {
            self.fail_from_session("Failed to sign up.");
            return;
        };

        if !self.session.send_verification_email(&user).await {
            self.fail_from_session("Failed to send verification email.");
            return;
        }

        debug!(uid = %user.uid, "awaiting email verification");
        let message = format!(
            "A verification email has been sent to {email}. Please check your inbox (and spam \
             folder), click the verification link, and then check your verification status."
        );
        self.verification = VerificationStatus::AwaitingVerification;
        self.verification_message = Some(message.clone());
        let cleared = self.form.fields_mut();
        cleared.password = SecretString::default();
        cleared.confirm_password = SecretString::default();
        self.form.succeed(message);
    }

    /// Reloads the provider user and answers home once the email is verified.
    pub async fn check_verification(&mut self) -> Option<Route> {
        if self.verification == VerificationStatus::Checking {
            return None;
        }
        let previous = self.verification;
        self.verification = VerificationStatus::Checking;
        self.verification_message = None;

        if self.session.current_user().is_none() {
            self.verification = previous;
            self.verification_message =
                Some("You are not signed in. Please sign up or log in.".to_string());
            return None;
        }

        match self.session.reload_current_user().await {
            Ok(Some(user)) if user.email_verified => {
                self.verification = VerificationStatus::Verified;
                self.verification_message =
                    Some("Email verified successfully! Redirecting...".to_string());
                Some(Route::Home)
            }
            Ok(Some(_)) => {
                self.verification = VerificationStatus::AwaitingVerification;
                self.verification_message = Some(
                    "Email not yet verified. Please ensure you've clicked the link in your \
                     email and try again."
                        .to_string(),
                );
                None
            }
            Ok(None) => {
                self.verification = previous;
                self.verification_message =
                    Some("You are not signed in. Please sign up or log in.".to_string());
                None
            }
            Err(err) => {
                self.verification = previous;
                let message = err.message.trim();
                self.verification_message = Some(if message.is_empty() {
                    "Could not check verification status. Please try again.".to_string()
                } else {
                    message.to_string()
                });
                None
            }
        }
    }

    pub async fn resend_verification(&mut self) {
        self.verification_message = None;
        let Some(user) = self.session.current_user() else {
            self.verification_message = Some(
                "No user found to resend verification email. Please sign up again.".to_string(),
            );
            return;
        };

        self.verification_message = Some(if self.session.send_verification_email(&user).await {
            "A new verification email has been sent. Please check your inbox.".to_string()
        } else {
            self.session
                .last_error()
                .unwrap_or_else(|| "Failed to resend verification email.".to_string())
        });
    }

    pub async fn sign_up_with_federated(
        &mut self,
        credential: &FederatedCredential,
    ) -> Option<Route> {
        if !self.form.begin_submit() {
            return None;
        }
        self.session.clear_error();
        self.verification_message = None;

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

/// Email first, then mismatch before length. Length counts characters, not
/// UTF-16 units.
fn validate(fields: &SignupFields) -> Result<(), &'static str> {
    if fields.email.trim().is_empty() {
        return Err("Please enter your email address.");
    }
    let password = fields.password.expose_secret();
    if password != fields.confirm_password.expose_secret() {
        return Err("Passwords do not match.");
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters long.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{AuthErrorCode, ProviderError};
    use crate::test_support::{secret, user, FakeProvider};
    use std::sync::Arc;

    fn filled(provider: Arc<FakeProvider>, password: &str, confirm: &str) -> SignupPage {
        let mut page = SignupPage::new(SessionContext::new(provider));
        page.set_email("ada@example.com");
        page.set_password(secret(password));
        page.set_confirm_password(secret(confirm));
        page
    }

    #[tokio::test]
    async fn mismatch_is_reported_before_length() {
        let provider = FakeProvider::new();
        let mut page = filled(provider.clone(), "abc", "abd");

        page.submit().await;
        assert_eq!(page.status().error(), Some("Passwords do not match."));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn short_password_is_rejected_locally() {
        let provider = FakeProvider::new();
        let mut page = filled(provider.clone(), "abc12", "abc12");

        page.submit().await;
        assert_eq!(
            page.status().error(),
            Some("Password must be at least 6 characters long.")
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_email_is_rejected_locally() {
        let provider = FakeProvider::new();
        let mut page = filled(provider.clone(), "secret1", "secret1");
        page.set_email("   ");

        page.submit().await;
        assert_eq!(page.status().error(), Some("Please enter your email address."));
        assert_eq!(page.verification(), VerificationStatus::NotStarted);
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn password_length_counts_characters() {
        let provider = FakeProvider::new();
        let emoji = "\u{1F600}\u{1F601}\u{1F602}";
        let mut page = filled(provider.clone(), emoji, emoji);

        page.submit().await;
        assert_eq!(
            page.status().error(),
            Some("Password must be at least 6 characters long.")
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn signup_sends_verification_and_clears_passwords() {
        let provider = FakeProvider::new();
        let mut page = filled(provider.clone(), "secret1", "secret1");

        page.submit().await;

        assert_eq!(
            provider.calls(),
            vec!["create_user", "send_email_verification"]
        );
        assert_eq!(page.verification(), VerificationStatus::AwaitingVerification);
        assert!(page
            .verification_message()
            .unwrap()
            .starts_with("A verification email has been sent to ada@example.com."));
        assert!(page.fields().password.expose_secret().is_empty());
        assert!(page.fields().confirm_password.expose_secret().is_empty());
        assert_eq!(page.fields().email, "ada@example.com");
    }

    #[tokio::test]
    async fn provider_rejection_surfaces_session_error() {
        let provider = FakeProvider::new();
        provider.fail(
            "create_user",
            ProviderError::from_code(AuthErrorCode::EmailAlreadyInUse),
        );
        let mut page = filled(provider, "secret1", "secret1");

        page.submit().await;
        assert_eq!(
            page.status().error(),
            Some("The email address is already in use by another account.")
        );
        assert_eq!(page.verification(), VerificationStatus::NotStarted);
    }

    #[tokio::test]
    async fn verification_email_failure_fails_the_form() {
        let provider = FakeProvider::new();
        provider.fail(
            "send_email_verification",
            ProviderError::from_code(AuthErrorCode::TooManyRequests),
        );
        let mut page = filled(provider, "secret1", "secret1");

        page.submit().await;
        assert_eq!(
            page.status().error(),
            Some("Access has been temporarily disabled due to many failed attempts.")
        );
    }

    #[tokio::test]
    async fn check_before_and_after_verification() {
        let provider = FakeProvider::new();
        let mut page = filled(provider.clone(), "secret1", "secret1");
        page.submit().await;

        assert_eq!(page.check_verification().await, None);
        assert_eq!(page.verification(), VerificationStatus::AwaitingVerification);
        assert_eq!(
            page.verification_message(),
            Some(
                "Email not yet verified. Please ensure you've clicked the link in your email \
                 and try again."
            )
        );

        provider.verify_on_reload();
        assert_eq!(page.check_verification().await, Some(Route::Home));
        assert_eq!(page.verification(), VerificationStatus::Verified);
        assert_eq!(
            page.verification_message(),
            Some("Email verified successfully! Redirecting...")
        );
    }

    #[tokio::test]
    async fn check_without_user_asks_to_sign_in() {
        let mut page = SignupPage::new(SessionContext::new(FakeProvider::new()));
        assert_eq!(page.check_verification().await, None);
        assert_eq!(
            page.verification_message(),
            Some("You are not signed in. Please sign up or log in.")
        );
    }

    #[tokio::test]
    async fn reload_failure_uses_provider_message_or_fallback() {
        let provider = FakeProvider::signed_in(user("uid-1", "ada@example.com", false));
        provider.fail(
            "reload",
            ProviderError::from_code(AuthErrorCode::UserTokenExpired),
        );
        let mut page = SignupPage::new(SessionContext::new(provider.clone()));

        page.check_verification().await;
        assert_eq!(
            page.verification_message(),
            Some("The session has expired. Please sign in again.")
        );

        provider.fail(
            "reload",
            ProviderError::new(AuthErrorCode::Other("x".to_string()), ""),
        );
        page.check_verification().await;
        assert_eq!(
            page.verification_message(),
            Some("Could not check verification status. Please try again.")
        );
        assert_eq!(page.verification(), VerificationStatus::NotStarted);
    }

    #[tokio::test]
    async fn resend_requires_a_user() {
        let mut page = SignupPage::new(SessionContext::new(FakeProvider::new()));
        page.resend_verification().await;
        assert_eq!(
            page.verification_message(),
            Some("No user found to resend verification email. Please sign up again.")
        );

        let provider = FakeProvider::signed_in(user("uid-1", "ada@example.com", false));
        let mut page = SignupPage::new(SessionContext::new(provider));
        page.resend_verification().await;
        assert_eq!(
            page.verification_message(),
            Some("A new verification email has been sent. Please check your inbox.")
        );
    }

    #[tokio::test]
    async fn federated_signup_goes_to_users() {
        let mut page = SignupPage::new(SessionContext::new(FakeProvider::new()));
        let credential = FederatedCredential::google(secret("google-token"));
        assert_eq!(
            page.sign_up_with_federated(&credential).await,
            Some(Route::Users)
        );
    }
}
