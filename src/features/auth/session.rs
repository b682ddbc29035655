//! Session context shared by the page controllers. It mirrors the identity
//! provider's current user through a subscription and is the only writer of
//! the current-user, loading and last-error state. Operations never return
//! provider errors; failures land in `last_error` as user-facing text.

use super::{
    errors::{
        federated_sign_in_message, password_reset_message, sign_in_message, sign_out_message,
        sign_up_message, verification_email_message, ProviderError,
    },
    provider::IdentityProvider,
    types::{AuthUser, FederatedCredential},
};
use crate::app_lib::{Listeners, Subscription};
use crate::routes::Route;
use secrecy::SecretString;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, warn};

/// Point-in-time view of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_user: Option<AuthUser>,
    pub loading: bool,
    pub last_error: Option<String>,
}

#[derive(Default)]
struct Shared {
    current_user: Option<AuthUser>,
    initialized: bool,
    in_flight: usize,
    last_error: Option<String>,
}

struct SessionInner {
    provider: Arc<dyn IdentityProvider>,
    shared: RwLock<Shared>,
    listeners: Listeners<Option<AuthUser>>,
    subscription: Mutex<Option<Subscription>>,
}

/// Cheaply cloneable handle over the provider session.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

impl SessionInner {
    fn apply_user(&self, user: Option<AuthUser>) {
        let changed = {
            let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);
            let changed = !shared.initialized || shared.current_user != user;
            shared.current_user = user.clone();
            shared.initialized = true;
            changed
        };
        if changed {
            debug!(
                uid = user.as_ref().map(|user| user.uid.as_str()),
                "session user changed"
            );
            self.listeners.notify(&user);
        }
    }
}

impl SessionContext {
    /// Subscribes to `provider` and seeds the state from its current user.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let inner = Arc::new(SessionInner {
            provider: Arc::clone(&provider),
            shared: RwLock::new(Shared::default()),
            listeners: Listeners::new(),
            subscription: Mutex::new(None),
        });

        let weak = Arc::downgrade(&inner);
        let subscription = provider.subscribe(Box::new(move |user: &Option<AuthUser>| {
            if let Some(inner) = weak.upgrade() {
                inner.apply_user(user.clone());
            }
        }));
        *inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);

        inner.apply_user(provider.current_user());
        Self { inner }
    }

    pub async fn sign_up(&self, email: &str, password: &SecretString) -> Option<AuthUser> {
        self.run(
            "sign_up",
            self.inner.provider.create_user(email, password),
            sign_up_message,
        )
        .await
    }

    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Option<AuthUser> {
        self.run(
            "sign_in",
            self.inner.provider.sign_in_with_password(email, password),
            sign_in_message,
        )
        .await
    }

    pub async fn sign_in_with_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Option<AuthUser> {
        self.run(
            "sign_in_with_federated",
            self.inner.provider.sign_in_with_federated(credential),
            federated_sign_in_message,
        )
        .await
    }

    /// Signs out and answers the login route on success.
    pub async fn sign_out(&self) -> Option<Route> {
        self.run("sign_out", self.inner.provider.sign_out(), sign_out_message)
            .await
            .map(|()| Route::Login)
    }

    pub async fn send_verification_email(&self, user: &AuthUser) -> bool {
        self.run(
            "send_verification_email",
            self.inner.provider.send_email_verification(user),
            verification_email_message,
        )
        .await
        .is_some()
    }

    pub async fn send_password_reset(&self, email: &str) -> bool {
        self.run(
            "send_password_reset",
            self.inner.provider.send_password_reset(email),
            password_reset_message,
        )
        .await
        .is_some()
    }

    /// Re-reads the user from the provider. Leaves `last_error` untouched so
    /// callers can word their own failure message.
    ///
    /// # Errors
    /// Returns the provider error unchanged.
    pub async fn reload_current_user(&self) -> Result<Option<AuthUser>, ProviderError> {
        self.inner.provider.reload().await
    }

    pub fn clear_error(&self) {
        self.write().last_error = None;
    }

    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.read().current_user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().current_user.is_some()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        let shared = self.read();
        !shared.initialized || shared.in_flight > 0
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        let shared = self.read();
        SessionState {
            current_user: shared.current_user.clone(),
            loading: !shared.initialized || shared.in_flight > 0,
            last_error: shared.last_error.clone(),
        }
    }

    /// Notifies `callback` whenever the signed-in user changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Option<AuthUser>) + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(callback)
    }

    async fn run<T, F>(
        &self,
        operation: &'static str,
        call: F,
        describe: fn(&ProviderError) -> String,
    ) -> Option<T>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        {
            let mut shared = self.write();
            shared.in_flight += 1;
            shared.last_error = None;
        }

        let result = call.await;

        let mut shared = self.write();
        shared.in_flight = shared.in_flight.saturating_sub(1);
        match result {
            Ok(value) => {
                debug!(operation, "auth operation succeeded");
                Some(value)
            }
            Err(err) => {
                warn!(operation, code = err.code.as_str(), "auth operation failed");
                shared.last_error = Some(describe(&err));
                None
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Shared> {
        self.inner
            .shared
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Shared> {
        self.inner
            .shared
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
