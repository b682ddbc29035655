//! # Recruitdesk (recruiting client)
//!
//! `recruitdesk` is the client side of a small applicant-tracking product. It
//! signs recruiters in through a hosted identity provider, keeps the company
//! profile of the signed-in recruiter in sync with the backend, submits job
//! postings, and renders a dashboard of postings.
//!
//! ## Layers
//!
//! - **`app_lib`:** configuration, error type, JSON HTTP helpers and the
//!   listener registry used for every change notification.
//! - **`features`:** adapters over external systems. `auth` wraps the identity
//!   provider behind [`features::auth::IdentityProvider`] and mirrors its state
//!   in a [`features::auth::SessionContext`]; `company` and `jobs` call the
//!   backend REST API; `dashboard` holds the static postings and clipboard
//!   handling.
//! - **`routes`:** headless page controllers (login, signup, forgot password,
//!   company profile, job posting, dashboard). Each owns its local field state
//!   and a [`routes::FormStatus`] and answers navigation as a [`routes::Route`].
//! - **`cli`:** the terminal front-end that drives the page controllers.
//!
//! ## Session ownership
//!
//! The identity provider owns the session (id and refresh tokens never leave
//! it). `SessionContext` subscribes to provider changes and is the only writer
//! of the shared current-user, loading and last-error state; page controllers
//! only read it.

pub mod app;
pub mod app_lib;
pub mod cli;
pub mod features;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
