//! Company profile of the signed-in recruiter: wire types, the REST client
//! and a store that refetches the profile whenever the session user changes.

pub mod client;
pub mod store;
pub mod types;

pub use client::{CompanyClient, COMPANY_PROFILE_PATH};
pub use store::{CompanyState, CompanyStore};
pub use types::{CompanyProfile, COMPANY_SIZES};
