//! Adapters over the external systems the client talks to. Page controllers in
//! `routes` import these modules so view state stays separate from network
//! and identity handling.

pub mod auth;
pub mod company;
pub mod dashboard;
pub mod jobs;
