//! Session and credential types. `AuthUser` is the only identity shape that
//! leaves the provider; it carries no tokens.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Provider id used for Google federated sign-in.
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Signed-in identity mirrored from the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
}

/// Token obtained from a federated identity provider (e.g. a Google id token)
/// that is exchanged for a session.
#[derive(Clone, Debug)]
pub struct FederatedCredential {
    pub provider_id: String,
    pub id_token: SecretString,
}

impl FederatedCredential {
    #[must_use]
    pub fn google(id_token: SecretString) -> Self {
        Self {
            provider_id: GOOGLE_PROVIDER_ID.to_string(),
            id_token,
        }
    }
}
