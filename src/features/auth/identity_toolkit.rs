//! [`IdentityProvider`] over the Identity Toolkit REST API.
//!
//! Every sign-in variant returns an id token and a refresh token, which stay in
//! this struct. The signed-in user is then read back with `accounts:lookup` so
//! the verified flag is always the provider's. Listeners are notified after
//! each sign-in, sign-out, token refresh and any reload that changes the user.
//! A reload rejected for an expired id token refreshes it and retries once.
//!
//! Error bodies use the envelope `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`
//! and are mapped through [`ProviderError::from_identity_toolkit`].

use super::{
    errors::{AuthErrorCode, ProviderError},
    provider::{AuthStateListener, IdentityProvider},
    types::{AuthUser, FederatedCredential},
};
use crate::app_lib::{AppConfig, AppError, ApiClient, Listeners, Subscription};
use async_trait::async_trait;
use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Redirect URI sent with federated sign-in; the API requires one even when
/// the id token is posted directly.
const IDP_REQUEST_URI: &str = "http://localhost";

struct ProviderSession {
    user: AuthUser,
    id_token: SecretString,
    refresh_token: SecretString,
}

pub struct IdentityToolkit {
    accounts: ApiClient,
    secure_token: ApiClient,
    api_key: SecretString,
    session: RwLock<Option<ProviderSession>>,
    listeners: Listeners<Option<AuthUser>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl IdentityToolkit {
    /// Builds a provider against the configured identity endpoints.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP clients cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            accounts: ApiClient::with_base_url(config, &config.identity_base_url)?,
            secure_token: ApiClient::with_base_url(config, &config.secure_token_base_url)?,
            api_key: config.identity_api_key.clone(),
            session: RwLock::new(None),
            listeners: Listeners::new(),
        })
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        let key = self.api_key.expose_secret().trim();
        if key.is_empty() {
            Err(ProviderError::new(
                AuthErrorCode::Other("auth/invalid-api-key".to_string()),
                "Identity provider API key is not configured.",
            ))
        } else {
            Ok(key)
        }
    }

    async fn call<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let key = self.api_key()?;
        let path = format!("/v1/accounts:{endpoint}");
        let response = self
            .accounts
            .post_json_raw(&path, &[("key", key)], body)
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn lookup(&self, id_token: &str) -> Result<AuthUser, ProviderError> {
        let response: LookupResponse = self.call("lookup", &LookupRequest { id_token }).await?;
        response
            .users
            .into_iter()
            .next()
            .map(|user| AuthUser {
                uid: user.local_id,
                email: user.email,
                email_verified: user.email_verified,
            })
            .ok_or_else(|| ProviderError::from_code(AuthErrorCode::UserNotFound))
    }

    /// Reads the user behind fresh tokens, stores the session and notifies.
    async fn establish(&self, tokens: TokenResponse) -> Result<AuthUser, ProviderError> {
        let user = self.lookup(&tokens.id_token).await?;
        self.store(Some(ProviderSession {
            user: user.clone(),
            id_token: SecretString::from(tokens.id_token),
            refresh_token: SecretString::from(tokens.refresh_token),
        }));
        info!(uid = %user.uid, "signed in");
        Ok(user)
    }

    fn store(&self, session: Option<ProviderSession>) {
        let user = session.as_ref().map(|session| session.user.clone());
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
        self.listeners.notify(&user);
    }

    fn id_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.id_token.expose_secret().to_string())
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkit {
    fn current_user(&self) -> Option<AuthUser> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.user.clone())
    }

    fn subscribe(&self, listener: AuthStateListener) -> Subscription {
        self.listeners.subscribe(move |user| listener(user))
    }

    async fn create_user(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        let request = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };
        let tokens: TokenResponse = self.call("signUp", &request).await?;
        self.establish(tokens).await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthUser, ProviderError> {
        let request = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };
        let tokens: TokenResponse = self.call("signInWithPassword", &request).await?;
        self.establish(tokens).await
    }

    async fn sign_in_with_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<AuthUser, ProviderError> {
        let request = IdpRequest {
            post_body: format!(
                "id_token={}&providerId={}",
                credential.id_token.expose_secret(),
                credential.provider_id
            ),
            request_uri: IDP_REQUEST_URI,
            return_idp_credential: true,
            return_secure_token: true,
        };
        let tokens: TokenResponse = self.call("signInWithIdp", &request).await?;
        self.establish(tokens).await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.store(None);
        info!("signed out");
        Ok(())
    }

    async fn send_email_verification(&self, user: &AuthUser) -> Result<(), ProviderError> {
        let id_token = self
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|session| session.user.uid == user.uid)
            .map(|session| session.id_token.expose_secret().to_string())
            .ok_or_else(|| ProviderError::from_code(AuthErrorCode::NoCurrentUser))?;

        let request = OobCodeRequest {
            request_type: "VERIFY_EMAIL",
            id_token: Some(&id_token),
            email: None,
        };
        let _: serde_json::Value = self.call("sendOobCode", &request).await?;
        debug!(uid = %user.uid, "verification email requested");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let request = OobCodeRequest {
            request_type: "PASSWORD_RESET",
            id_token: None,
            email: Some(email),
        };
        let _: serde_json::Value = self.call("sendOobCode", &request).await?;
        debug!("password reset email requested");
        Ok(())
    }

    async fn reload(&self) -> Result<Option<AuthUser>, ProviderError> {
        let Some(id_token) = self.id_token() else {
            return Ok(None);
        };
        let user = match self.lookup(&id_token).await {
            Err(err) if err.code == AuthErrorCode::UserTokenExpired => {
                debug!("id token expired, refreshing before reload");
                self.refresh_token().await?;
                let Some(id_token) = self.id_token() else {
                    return Ok(None);
                };
                self.lookup(&id_token).await?
            }
            result => result?,
        };

        let changed = {
            let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
            match guard.as_mut() {
                Some(session) if session.user != user => {
                    session.user = user.clone();
                    true
                }
                Some(_) => false,
                // Signed out while the lookup was in flight.
                None => return Ok(None),
            }
        };
        if changed {
            debug!(uid = %user.uid, verified = user.email_verified, "user reloaded");
            self.listeners.notify(&Some(user.clone()));
        }
        Ok(Some(user))
    }

    async fn refresh_token(&self) -> Result<(), ProviderError> {
        let refresh_token = self
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.refresh_token.expose_secret().to_string())
            .ok_or_else(|| ProviderError::from_code(AuthErrorCode::NoCurrentUser))?;

        let key = self.api_key()?;
        let request = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token: &refresh_token,
        };
        let response = self
            .secure_token
            .post_form_raw("/v1/token", &[("key", key)], &request)
            .await
            .map_err(transport_error)?;
        let refreshed: RefreshResponse = decode(response).await?;

        let user = {
            let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
            let Some(session) = guard.as_mut() else {
                return Err(ProviderError::from_code(AuthErrorCode::NoCurrentUser));
            };
            session.id_token = SecretString::from(refreshed.id_token);
            session.refresh_token = SecretString::from(refreshed.refresh_token);
            session.user.clone()
        };
        debug!(uid = %user.uid, "id token refreshed");
        self.listeners.notify(&Some(user));
        Ok(())
    }
}

fn transport_error(err: AppError) -> ProviderError {
    warn!(error = %err, "identity provider unreachable");
    ProviderError::new(AuthErrorCode::NetworkRequestFailed, err.user_message())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|err| {
            ProviderError::new(
                AuthErrorCode::Other("auth/internal-error".to_string()),
                format!("Unexpected identity provider response: {err}"),
            )
        });
    }

    let body = response.text().await.unwrap_or_default();
    let err = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => ProviderError::from_identity_toolkit(&envelope.error.message),
        Err(_) => ProviderError::new(
            AuthErrorCode::Other("auth/internal-error".to_string()),
            format!("Identity provider returned status {}", status.as_u16()),
        ),
    };
    debug!(status = status.as_u16(), code = err.code.as_str(), "identity provider error");
    Err(err)
}
