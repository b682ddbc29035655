//! Shared client utilities: configuration, the application error type, JSON
//! HTTP helpers and the listener registry.
//!
//! ## Request policy
//!
//! Every outbound call goes through [`api::ApiClient`], which applies the
//! configured request timeout, tags requests with the crate user agent and
//! turns non-success responses into [`AppError::Http`] with a sanitized body.
//! Nothing here retries; callers decide what a failure means for their page.
//!
//! These helpers never log request bodies. Credentials travel as
//! [`secrecy::SecretString`] and are only exposed at the point a request is
//! built.

pub mod api;
pub mod config;
pub mod errors;
pub mod observer;

pub use api::ApiClient;
pub use config::{AppConfig, RuntimeOverrides};
pub use errors::AppError;
pub use observer::{Listeners, Subscription};
