pub mod company_profile;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod post_job;
pub mod signup;
pub mod verify;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Signup(signup::Args),
    Verify(verify::Args),
    ForgotPassword(forgot_password::Args),
    CompanyProfile(company_profile::Args),
    PostJob(post_job::Args),
    Dashboard(dashboard::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
