//! Company profile page. Opens in `Create` mode when the store has no profile
//! for the signed-in user and in `View` mode otherwise. Saving PUTs an
//! existing profile and POSTs a new one, then returns to `View`.

use super::{FormState, FormStatus};
use crate::features::auth::SessionContext;
use crate::features::company::{CompanyProfile, CompanyStore};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileMode {
    Create,
    View,
    Edit,
}

pub struct CompanyProfilePage {
    session: SessionContext,
    store: CompanyStore,
    form: FormState<CompanyProfile>,
    mode: ProfileMode,
}

impl CompanyProfilePage {
    /// Builds the page from whatever the store currently holds.
    #[must_use]
    pub fn new(session: SessionContext, store: CompanyStore) -> Self {
        let (fields, mode) = match store.company() {
            Some(company) => (company, ProfileMode::View),
            None => (CompanyProfile::default(), ProfileMode::Create),
        };
        Self {
            session,
            store,
            form: FormState::new(fields),
            mode,
        }
    }

    /// Waits for any in-flight profile fetch, then builds the page.
    pub async fn open(session: SessionContext, store: CompanyStore) -> Self {
        store.wait_idle().await;
        Self::new(session, store)
    }

    #[must_use]
    pub fn mode(&self) -> ProfileMode {
        self.mode
    }

    #[must_use]
    pub fn fields(&self) -> &CompanyProfile {
        self.form.fields()
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        self.form.status()
    }

    /// Error from the last background fetch, if any.
    #[must_use]
    pub fn load_error(&self) -> Option<String> {
        self.store.error()
    }

    /// Changes fields. Ignored in `View` mode.
    pub fn edit(&mut self, change: impl FnOnce(&mut CompanyProfile)) {
        if self.mode != ProfileMode::View {
            self.form.edit(change);
        }
    }

    pub fn start_editing(&mut self) {
        if self.mode == ProfileMode::View {
            self.mode = ProfileMode::Edit;
            self.form.retry();
        }
    }

    /// Drops unsaved edits and returns to `View`.
    pub fn cancel_edit(&mut self) {
        if self.mode == ProfileMode::Edit && !self.form.status().is_submitting() {
            self.restore();
            self.mode = ProfileMode::View;
        }
    }

    /// Restores the last fetched profile, or blanks in `Create` mode.
    pub fn reset(&mut self) {
        if !self.form.status().is_submitting() {
            self.restore();
        }
    }

    pub async fn submit(&mut self) {
        if self.mode == ProfileMode::View || !self.form.begin_submit() {
            return;
        }

        let profile = self.form.fields().clone();
        if let Err(err) = profile.validate() {
            self.form.fail(err.user_message());
            return;
        }
        let Some(user) = self.session.current_user() else {
            self.form
                .fail("You must be signed in to save a company profile.");
            return;
        };

        let exists = self.store.company().is_some();
        match self.store.client().save(&user.uid, &profile, exists).await {
            Ok(saved) => {
                self.store.set_company(saved.clone());
                self.form.replace_fields(saved);
                self.mode = ProfileMode::View;
                self.form.succeed("Company profile saved successfully!");
            }
            Err(err) => {
                warn!(uid = %user.uid, error = %err, "failed to save company profile");
                self.form.fail(err.user_message());
            }
        }
    }

    fn restore(&mut self) {
        let fields = self.store.company().unwrap_or_default();
        self.form.replace_fields(fields);
        self.form.retry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::{ApiClient, AppConfig};
    use crate::features::company::{CompanyClient, COMPANY_PROFILE_PATH};
    use crate::test_support::{user, FakeProvider};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> CompanyStore {
        let config = AppConfig {
            api_base_url: server.uri(),
            ..AppConfig::default()
        };
        CompanyStore::new(CompanyClient::new(ApiClient::new(&config).unwrap()))
    }

    fn signed_in() -> SessionContext {
        SessionContext::new(FakeProvider::signed_in(user(
            "uid-1",
            "ada@example.com",
            true,
        )))
    }

    fn acme() -> CompanyProfile {
        CompanyProfile {
            company_name: "Acme".to_string(),
            contact_email: "hr@acme.test".to_string(),
            ..CompanyProfile::default()
        }
    }

    async fn mount_save(server: &MockServer, verb: &str, expected: u64) {
        Mock::given(method(verb))
            .and(path(COMPANY_PROFILE_PATH))
            .and(body_partial_json(json!({"userId": "uid-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"companyName": "Acme", "contactEmail": "hr@acme.test", "city": "Austin"}
            })))
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn new_profile_is_posted_then_viewed() {
        let server = MockServer::start().await;
        mount_save(&server, "POST", 1).await;
        mount_save(&server, "PUT", 0).await;
        let store = store(&server);
        let mut page = CompanyProfilePage::new(signed_in(), store.clone());
        assert_eq!(page.mode(), ProfileMode::Create);

        page.edit(|fields| *fields = acme());
        page.submit().await;

        assert_eq!(page.status().success(), Some("Company profile saved successfully!"));
        assert_eq!(page.mode(), ProfileMode::View);
        assert_eq!(page.fields().city, "Austin");
        assert_eq!(store.company().map(|company| company.city), Some("Austin".to_string()));
    }

    #[tokio::test]
    async fn existing_profile_is_put() {
        let server = MockServer::start().await;
        mount_save(&server, "PUT", 1).await;
        mount_save(&server, "POST", 0).await;
        let store = store(&server);
        store.set_company(acme());

        let mut page = CompanyProfilePage::new(signed_in(), store);
        assert_eq!(page.mode(), ProfileMode::View);
        page.start_editing();
        page.edit(|fields| fields.city = "Austin".to_string());
        page.submit().await;

        assert_eq!(page.mode(), ProfileMode::View);
    }

    #[tokio::test]
    async fn missing_required_fields_never_hit_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let mut page = CompanyProfilePage::new(signed_in(), store(&server));

        page.edit(|fields| fields.company_name = "Acme".to_string());
        page.submit().await;
        assert_eq!(
            page.status().error(),
            Some("Company Name and Contact Email are required.")
        );
    }

    #[tokio::test]
    async fn signed_out_user_cannot_save() {
        let server = MockServer::start().await;
        let session = SessionContext::new(FakeProvider::new());
        let mut page = CompanyProfilePage::new(session, store(&server));

        page.edit(|fields| *fields = acme());
        page.submit().await;
        assert_eq!(
            page.status().error(),
            Some("You must be signed in to save a company profile.")
        );
    }

    #[tokio::test]
    async fn server_error_is_shown_and_mode_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPANY_PROFILE_PATH))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid domain"})),
            )
            .mount(&server)
            .await;
        let mut page = CompanyProfilePage::new(signed_in(), store(&server));

        page.edit(|fields| *fields = acme());
        page.submit().await;
        assert_eq!(page.status().error(), Some("Invalid domain"));
        assert_eq!(page.mode(), ProfileMode::Create);
    }

    #[tokio::test]
    async fn view_mode_is_read_only_and_cancel_restores() {
        let server = MockServer::start().await;
        let store = store(&server);
        store.set_company(acme());
        let mut page = CompanyProfilePage::new(signed_in(), store);

        page.edit(|fields| fields.company_name = "Ignored".to_string());
        assert_eq!(page.fields().company_name, "Acme");

        page.start_editing();
        page.edit(|fields| fields.company_name = "Renamed".to_string());
        assert_eq!(page.fields().company_name, "Renamed");

        page.cancel_edit();
        assert_eq!(page.mode(), ProfileMode::View);
        assert_eq!(page.fields().company_name, "Acme");
    }

    #[tokio::test]
    async fn reset_in_create_mode_blanks_fields() {
        let server = MockServer::start().await;
        let mut page = CompanyProfilePage::new(signed_in(), store(&server));
        page.edit(|fields| *fields = acme());

        page.reset();
        assert_eq!(page.fields(), &CompanyProfile::default());
        assert_eq!(page.status(), &FormStatus::Idle);
    }
}
