//! Auth feature covering sign-up, sign-in (password and federated), sign-out,
//! email verification and password reset. The identity provider owns the
//! session and its tokens; [`SessionContext`] mirrors the provider state for
//! the pages and maps provider failures to user-facing text. Nothing in this
//! module logs passwords or tokens.
//!
//! Flow Overview: Signup creates the account and sends a verification email;
//! the user is then checked by reloading the provider's current user until the
//! verified flag is set. Login signs in and lets the provider subscription
//! update the session. Logout clears the provider session and redirects to the
//! login route.

pub mod errors;
pub mod identity_toolkit;
pub mod provider;
pub mod session;
pub mod types;

pub use errors::{AuthErrorCode, ProviderError};
pub use identity_toolkit::IdentityToolkit;
pub use provider::{AuthStateListener, IdentityProvider};
pub use session::{SessionContext, SessionState};
pub use types::{AuthUser, FederatedCredential};
