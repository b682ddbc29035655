//! Identity provider seam. The provider owns the session and its tokens; the
//! rest of the client only sees [`AuthUser`] values and change events.

use super::{
    errors::ProviderError,
    types::{AuthUser, FederatedCredential},
};
use crate::app_lib::Subscription;
use async_trait::async_trait;
use secrecy::SecretString;

/// Callback invoked with the provider's current user after every state change.
pub type AuthStateListener = Box<dyn Fn(&Option<AuthUser>) + Send + Sync>;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signed-in user as last known to the provider.
    fn current_user(&self) -> Option<AuthUser>;

    /// Registers a listener fired on sign-in, sign-out, token refresh and reload.
    fn subscribe(&self, listener: AuthStateListener) -> Subscription;

    async fn create_user(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthUser, ProviderError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthUser, ProviderError>;

    async fn sign_in_with_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<AuthUser, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Sends a verification email to `user`, who must be the signed-in user.
    async fn send_email_verification(&self, user: &AuthUser) -> Result<(), ProviderError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    /// Re-reads the signed-in user from the provider (e.g. to pick up a new
    /// verified flag). Returns `None` when nobody is signed in.
    async fn reload(&self) -> Result<Option<AuthUser>, ProviderError>;

    /// Exchanges the refresh token for a new id token.
    async fn refresh_token(&self) -> Result<(), ProviderError>;
}
