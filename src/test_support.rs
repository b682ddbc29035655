//! Shared fixtures for unit tests: wiremock mounts for the Identity Toolkit
//! endpoints and an in-memory identity provider with scriptable failures.

use crate::app_lib::{AppConfig, Listeners, Subscription};
use crate::features::auth::{
    AuthStateListener, AuthUser, FederatedCredential, IdentityProvider, ProviderError,
};
use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const TEST_API_KEY: &str = "test-key";

/// Config pointing every endpoint at `server`.
pub(crate) fn identity_config(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base_url: server.uri(),
        identity_base_url: server.uri(),
        secure_token_base_url: server.uri(),
        identity_api_key: SecretString::from(TEST_API_KEY.to_string()),
        ..AppConfig::default()
    }
}

/// Answers `accounts:{endpoint}` with the fixed tokens `id-token` / `refresh-token`.
pub(crate) async fn mount_sign_in(server: &MockServer, endpoint: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/accounts:{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idToken": "id-token",
            "refreshToken": "refresh-token",
            "expiresIn": "3600"
        })))
        .mount(server)
        .await;
}

pub(crate) async fn mount_lookup(server: &MockServer, uid: &str, email: &str, verified: bool) {
    Mock::given(method("POST"))
        .and(path("/v1/accounts:lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"localId": uid, "email": email, "emailVerified": verified}]
        })))
        .mount(server)
        .await;
}

pub(crate) async fn mount_identity_error(server: &MockServer, endpoint: &str, message: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/accounts:{endpoint}")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": message}
        })))
        .mount(server)
        .await;
}

pub(crate) fn user(uid: &str, email: &str, verified: bool) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
        email: email.to_string(),
        email_verified: verified,
    }
}

pub(crate) fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

/// In-memory provider. Failures are one-shot and keyed by operation name.
#[derive(Default)]
pub(crate) struct FakeProvider {
    user: Mutex<Option<AuthUser>>,
    listeners: Listeners<Option<AuthUser>>,
    failures: Mutex<HashMap<&'static str, ProviderError>>,
    calls: Mutex<Vec<&'static str>>,
    verify_on_reload: Mutex<bool>,
}

impl FakeProvider {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn signed_in(user: AuthUser) -> Arc<Self> {
        let provider = Self::default();
        *provider.user.lock().unwrap() = Some(user);
        Arc::new(provider)
    }

    pub(crate) fn fail(&self, operation: &'static str, err: ProviderError) {
        self.failures.lock().unwrap().insert(operation, err);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Replaces the user and fires listeners, as the provider does on its own schedule.
    pub(crate) fn set_user(&self, user: Option<AuthUser>) {
        *self.user.lock().unwrap() = user.clone();
        self.listeners.notify(&user);
    }

    /// The next reload reports the user as verified.
    pub(crate) fn verify_on_reload(&self) {
        *self.verify_on_reload.lock().unwrap() = true;
    }

    fn record(&self, operation: &'static str) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(operation);
        match self.failures.lock().unwrap().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn current_user(&self) -> Option<AuthUser> {
        self.user.lock().unwrap().clone()
    }

    fn subscribe(&self, listener: AuthStateListener) -> Subscription {
        self.listeners.subscribe(move |user| listener(user))
    }

    async fn create_user(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        self.record("create_user")?;
        let created = user(&format!("uid-{email}"), email, false);
        self.set_user(Some(created.clone()));
        Ok(created)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        self.record("sign_in_with_password")?;
        let signed_in = user(&format!("uid-{email}"), email, true);
        self.set_user(Some(signed_in.clone()));
        Ok(signed_in)
    }

    async fn sign_in_with_federated(
        &self,
        _credential: &FederatedCredential,
    ) -> Result<AuthUser, ProviderError> {
        self.record("sign_in_with_federated")?;
        let signed_in = user("uid-google", "google@example.com", true);
        self.set_user(Some(signed_in.clone()));
        Ok(signed_in)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.record("sign_out")?;
        self.set_user(None);
        Ok(())
    }

    async fn send_email_verification(&self, _user: &AuthUser) -> Result<(), ProviderError> {
        self.record("send_email_verification")
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), ProviderError> {
        self.record("send_password_reset")
    }

    async fn reload(&self) -> Result<Option<AuthUser>, ProviderError> {
        self.record("reload")?;
        let verify = std::mem::take(&mut *self.verify_on_reload.lock().unwrap());
        let current = self.current_user();
        match current {
            Some(mut current) if verify && !current.email_verified => {
                current.email_verified = true;
                self.set_user(Some(current.clone()));
                Ok(Some(current))
            }
            other => Ok(other),
        }
    }

    async fn refresh_token(&self) -> Result<(), ProviderError> {
        self.record("refresh_token")?;
        let current = self.current_user();
        self.listeners.notify(&current);
        Ok(())
    }
}
