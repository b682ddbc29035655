//! Provider error codes and the mapping from codes to the fixed strings shown
//! on pages. Codes the pages do not special-case fall back to the provider's
//! raw message, then to a per-operation default.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WrongPassword,
    UserNotFound,
    InvalidCredential,
    WeakPassword,
    UserDisabled,
    TooManyRequests,
    PopupClosedByUser,
    UserTokenExpired,
    NetworkRequestFailed,
    NoCurrentUser,
    Other(String),
}

impl AuthErrorCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::UserDisabled => "auth/user-disabled",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::PopupClosedByUser => "auth/popup-closed-by-user",
            AuthErrorCode::UserTokenExpired => "auth/user-token-expired",
            AuthErrorCode::NetworkRequestFailed => "auth/network-request-failed",
            AuthErrorCode::NoCurrentUser => "auth/no-current-user",
            AuthErrorCode::Other(code) => code,
        }
    }

    /// Maps an Identity Toolkit error message (`EMAIL_EXISTS`,
    /// `WEAK_PASSWORD : Password should be ...`) to a code.
    #[must_use]
    pub fn from_identity_toolkit(message: &str) -> Self {
        match identity_toolkit_reason(message) {
            "EMAIL_EXISTS" => AuthErrorCode::EmailAlreadyInUse,
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthErrorCode::InvalidEmail,
            "INVALID_PASSWORD" => AuthErrorCode::WrongPassword,
            "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => AuthErrorCode::UserNotFound,
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => {
                AuthErrorCode::InvalidCredential
            }
            "WEAK_PASSWORD" => AuthErrorCode::WeakPassword,
            "USER_DISABLED" => AuthErrorCode::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorCode::TooManyRequests,
            "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" => {
                AuthErrorCode::UserTokenExpired
            }
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    /// Description used when the provider gives no detail of its own.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => {
                "The email address is already in use by another account."
            }
            AuthErrorCode::InvalidEmail => "The email address is badly formatted.",
            AuthErrorCode::WrongPassword => "The password is invalid.",
            AuthErrorCode::UserNotFound => "There is no user record for this identifier.",
            AuthErrorCode::InvalidCredential => "The supplied credential is invalid.",
            AuthErrorCode::WeakPassword => "Password should be at least 6 characters.",
            AuthErrorCode::UserDisabled => "The user account has been disabled.",
            AuthErrorCode::TooManyRequests => {
                "Access has been temporarily disabled due to many failed attempts."
            }
            AuthErrorCode::PopupClosedByUser => "The sign-in flow was closed by the user.",
            AuthErrorCode::UserTokenExpired => "The session has expired. Please sign in again.",
            AuthErrorCode::NetworkRequestFailed => "A network error occurred.",
            AuthErrorCode::NoCurrentUser => "No user is currently signed in.",
            AuthErrorCode::Other(_) => "",
        }
    }
}

/// Identity Toolkit messages look like `CODE` or `CODE : detail`.
fn identity_toolkit_reason(message: &str) -> &str {
    message.split(" : ").next().unwrap_or(message).trim()
}

/// Error reported by an identity provider.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message} ({})", .code.as_str())]
pub struct ProviderError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error whose message is the code's default description.
    #[must_use]
    pub fn from_code(code: AuthErrorCode) -> Self {
        let message = code.description().to_string();
        Self { code, message }
    }

    /// Builds an error from an Identity Toolkit error message, keeping any
    /// detail after the `:` as the message.
    #[must_use]
    pub fn from_identity_toolkit(message: &str) -> Self {
        let code = AuthErrorCode::from_identity_toolkit(message);
        let detail = message
            .split_once(" : ")
            .map(|(_, detail)| detail.trim())
            .filter(|detail| !detail.is_empty());

        match detail {
            Some(detail) => Self::new(code, detail),
            None if matches!(code, AuthErrorCode::Other(_)) => Self::new(code, message.trim()),
            None => Self::from_code(code),
        }
    }
}

/// The provider's raw message, or `fallback` when it is empty.
fn raw_or(err: &ProviderError, fallback: &str) -> String {
    let message = err.message.trim();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

pub(crate) fn sign_up_message(err: &ProviderError) -> String {
    raw_or(err, "Failed to sign up.")
}

pub(crate) fn sign_in_message(err: &ProviderError) -> String {
    match err.code {
        AuthErrorCode::UserNotFound
        | AuthErrorCode::WrongPassword
        | AuthErrorCode::InvalidCredential => "Invalid email or password.".to_string(),
        AuthErrorCode::InvalidEmail => "Please enter a valid email address.".to_string(),
        _ => raw_or(err, "Failed to sign in."),
    }
}

pub(crate) fn federated_sign_in_message(err: &ProviderError) -> String {
    match err.code {
        AuthErrorCode::PopupClosedByUser => "Google Sign-in was cancelled.".to_string(),
        _ => raw_or(err, "Failed to sign in with Google."),
    }
}

pub(crate) fn sign_out_message(err: &ProviderError) -> String {
    raw_or(err, "Failed to log out.")
}

pub(crate) fn verification_email_message(err: &ProviderError) -> String {
    raw_or(err, "Failed to send verification email.")
}

pub(crate) fn password_reset_message(err: &ProviderError) -> String {
    match err.code {
        AuthErrorCode::UserNotFound => "No user found with this email address.".to_string(),
        AuthErrorCode::InvalidEmail => "Please enter a valid email address.".to_string(),
        _ => raw_or(err, "Failed to send password reset email."),
    }
}
