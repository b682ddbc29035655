//! Application wiring: one identity provider, one session, the company store
//! attached to it and the backend clients. Page controllers are built from
//! here so they all share the same session.

use crate::app_lib::{ApiClient, AppConfig, AppError};
use crate::features::auth::{IdentityProvider, IdentityToolkit, SessionContext};
use crate::features::company::{CompanyClient, CompanyStore};
use crate::features::dashboard::Clipboard;
use crate::features::jobs::JobsClient;
use crate::routes::{
    CompanyProfilePage, DashboardPage, ForgotPasswordPage, JobPostingPage, LoginPage, SignupPage,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct App {
    config: AppConfig,
    session: SessionContext,
    company: CompanyStore,
    jobs: JobsClient,
}

impl App {
    /// Builds the app over the Identity Toolkit provider.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be built or when called
    /// outside a tokio runtime.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let provider = IdentityToolkit::new(&config)?;
        Self::with_provider(config, Arc::new(provider))
    }

    /// Builds the app over any identity provider.
    ///
    /// # Errors
    /// Returns an error if the backend client cannot be built or when called
    /// outside a tokio runtime.
    pub fn with_provider(
        config: AppConfig,
        provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AppError> {
        let api = ApiClient::new(&config)?;
        let session = SessionContext::new(provider);
        let company = CompanyStore::new(CompanyClient::new(api.clone()));
        company.attach(&session)?;
        debug!(api_base_url = %config.api_base_url, "app initialized");

        Ok(Self {
            config,
            session,
            company,
            jobs: JobsClient::new(api),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn company(&self) -> &CompanyStore {
        &self.company
    }

    #[must_use]
    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.session.clone())
    }

    #[must_use]
    pub fn signup_page(&self) -> SignupPage {
        SignupPage::new(self.session.clone())
    }

    #[must_use]
    pub fn forgot_password_page(&self) -> ForgotPasswordPage {
        ForgotPasswordPage::new(self.session.clone())
    }

    /// Opens the profile page once the store has caught up with the session.
    pub async fn company_profile_page(&self) -> CompanyProfilePage {
        CompanyProfilePage::open(self.session.clone(), self.company.clone()).await
    }

    #[must_use]
    pub fn job_posting_page(&self) -> JobPostingPage {
        JobPostingPage::new(self.jobs.clone())
    }

    #[must_use]
    pub fn dashboard_page(&self, clipboard: Arc<dyn Clipboard>) -> DashboardPage {
        DashboardPage::new(clipboard)
    }
}
