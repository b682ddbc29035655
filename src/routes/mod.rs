//! Headless page controllers. Each page owns its field state and a
//! [`FormStatus`]; navigation is answered as a [`Route`] for the caller to
//! follow. Pages read the shared session but never write it.

mod company_profile;
mod dashboard;
mod forgot_password;
mod form;
mod job_posting;
mod login;
mod signup;

pub use company_profile::{CompanyProfilePage, ProfileMode};
pub use dashboard::{DashboardPage, PostingCard};
pub use forgot_password::ForgotPasswordPage;
pub use form::{FormState, FormStatus};
pub use job_posting::JobPostingPage;
pub use login::{LoginFields, LoginPage};
pub use signup::{SignupFields, SignupPage, VerificationStatus, MIN_PASSWORD_LENGTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    ForgotPassword,
    Users,
    Recruit,
    JobPosting,
    CompanyProfile,
    Dashboard,
}

const ALL_ROUTES: [Route; 9] = [
    Route::Home,
    Route::Login,
    Route::Signup,
    Route::ForgotPassword,
    Route::Users,
    Route::Recruit,
    Route::JobPosting,
    Route::CompanyProfile,
    Route::Dashboard,
];

const SIDEBAR: [Route; 3] = [Route::Recruit, Route::JobPosting, Route::CompanyProfile];

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::ForgotPassword => "/forgotpassword",
            Route::Users => "/users",
            Route::Recruit => "/users/recruit",
            Route::JobPosting => "/users/jobposting",
            Route::CompanyProfile => "/users/companyprofile",
            Route::Dashboard => "/users/dashboard",
        }
    }

    /// Navigation label.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Log In",
            Route::Signup => "Sign Up",
            Route::ForgotPassword => "Forgot Password",
            Route::Users => "Users",
            Route::Recruit => "Recruit",
            Route::JobPosting => "Job Posting",
            Route::CompanyProfile => "Company Profile",
            Route::Dashboard => "Dashboard",
        }
    }

    /// Exact path lookup; a trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        ALL_ROUTES
            .into_iter()
            .find(|route| route.path() == normalized)
    }

    /// Entries of the recruiter sidebar, in display order.
    #[must_use]
    pub fn sidebar() -> &'static [Route] {
        &SIDEBAR
    }

    /// Whether a navigation entry is highlighted at `current_path`. Entries
    /// also match their sub-paths, except the dashboard which matches exactly.
    #[must_use]
    pub fn is_active(self, current_path: &str) -> bool {
        let path = self.path();
        if current_path == path {
            return true;
        }
        self != Route::Dashboard
            && self != Route::Home
            && current_path
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
