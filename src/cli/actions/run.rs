use crate::cli::actions::{
    company_profile, dashboard, forgot_password, login, post_job, signup, verify, Action,
};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Signup(args) => signup::execute(args).await,
        Action::Verify(args) => verify::execute(args).await,
        Action::ForgotPassword(args) => forgot_password::execute(args).await,
        Action::CompanyProfile(args) => company_profile::execute(args).await,
        Action::PostJob(args) => post_job::execute(args).await,
        Action::Dashboard(args) => dashboard::execute(args).await,
    }
}
