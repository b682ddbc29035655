//! REST calls for the company profile. Existence is decided by the caller
//! (from a prior fetch) and selects POST or PUT.

use super::types::{CompanyProfile, ProfileEnvelope, ProfilePayload};
use crate::app_lib::{ApiClient, AppError};
use tracing::debug;

pub const COMPANY_PROFILE_PATH: &str = "/api/company-profile";

#[derive(Clone, Debug)]
pub struct CompanyClient {
    api: ApiClient,
}

impl CompanyClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches the profile owned by `user_id`; 404 means none exists yet.
    ///
    /// # Errors
    /// Returns an error on transport failure, any non-404 error status, or an
    /// undecodable body.
    pub async fn fetch(&self, user_id: &str) -> Result<Option<CompanyProfile>, AppError> {
        let envelope: Option<ProfileEnvelope> = self
            .api
            .get_optional_json(COMPANY_PROFILE_PATH, &[("userId", user_id)])
            .await?;
        Ok(envelope.map(|envelope| envelope.data))
    }

    /// # Errors
    /// Returns an error on transport failure, non-success status, or undecodable body.
    pub async fn create(
        &self,
        user_id: &str,
        profile: &CompanyProfile,
    ) -> Result<CompanyProfile, AppError> {
        let envelope: ProfileEnvelope = self
            .api
            .post_json_response(COMPANY_PROFILE_PATH, &ProfilePayload { profile, user_id })
            .await?;
        debug!("company profile created");
        Ok(envelope.data)
    }

    /// # Errors
    /// Returns an error on transport failure, non-success status, or undecodable body.
    pub async fn update(
        &self,
        user_id: &str,
        profile: &CompanyProfile,
    ) -> Result<CompanyProfile, AppError> {
        let envelope: ProfileEnvelope = self
            .api
            .put_json_response(COMPANY_PROFILE_PATH, &ProfilePayload { profile, user_id })
            .await?;
        debug!("company profile updated");
        Ok(envelope.data)
    }

    /// PUT when a profile already exists, POST otherwise.
    ///
    /// # Errors
    /// See [`CompanyClient::create`] and [`CompanyClient::update`].
    pub async fn save(
        &self,
        user_id: &str,
        profile: &CompanyProfile,
        exists: bool,
    ) -> Result<CompanyProfile, AppError> {
        if exists {
            self.update(user_id, profile).await
        } else {
            self.create(user_id, profile).await
        }
    }
}
