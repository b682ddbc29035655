//! Mirror of the signed-in user's company profile. Once attached to a
//! session, every current-user change triggers exactly one fetch spawned onto
//! the runtime. A result is applied only while its user is still the latest
//! requested one, so a slow response for a previous user cannot overwrite
//! the current profile.

use super::{client::CompanyClient, types::CompanyProfile};
use crate::app_lib::{AppError, Subscription};
use crate::features::auth::{AuthUser, SessionContext};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyState {
    pub company: Option<CompanyProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

struct StoreInner {
    client: CompanyClient,
    state: RwLock<CompanyState>,
    requested: Mutex<Option<String>>,
    pending: watch::Sender<usize>,
    subscription: Mutex<Option<Subscription>>,
}

#[derive(Clone)]
pub struct CompanyStore {
    inner: Arc<StoreInner>,
}

impl CompanyStore {
    #[must_use]
    pub fn new(client: CompanyClient) -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                client,
                state: RwLock::new(CompanyState::default()),
                requested: Mutex::new(None),
                pending,
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Follows `session`: fetches for its current user now and again on
    /// every user change.
    ///
    /// # Errors
    /// Returns `AppError::Config` when called outside a tokio runtime.
    pub fn attach(&self, session: &SessionContext) -> Result<(), AppError> {
        let handle = Handle::try_current()
            .map_err(|err| AppError::Config(format!("Company store needs a tokio runtime: {err}")))?;

        let weak = Arc::downgrade(&self.inner);
        let listener_handle = handle.clone();
        let subscription = session.subscribe(move |user| {
            if let Some(inner) = weak.upgrade() {
                CompanyStore { inner }.spawn_sync(&listener_handle, user.clone());
            }
        });
        *self
            .inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);

        self.spawn_sync(&handle, session.current_user());
        Ok(())
    }

    /// Fetches the profile for `user` (or clears it when `None`) and waits
    /// for the result.
    pub async fn sync(&self, user: Option<AuthUser>) {
        self.request(user.as_ref());
        self.fetch_and_apply(user).await;
    }

    /// Resolves once no spawned fetch is outstanding.
    pub async fn wait_idle(&self) {
        let mut pending = self.inner.pending.subscribe();
        // The sender lives in `inner`, so the channel cannot close here.
        let _ = pending.wait_for(|count| *count == 0).await;
    }

    /// Replaces the cached profile after a successful save.
    pub fn set_company(&self, company: CompanyProfile) {
        let mut state = self.write();
        state.company = Some(company);
        state.error = None;
    }

    #[must_use]
    pub fn company(&self) -> Option<CompanyProfile> {
        self.read().company.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> CompanyState {
        self.read().clone()
    }

    #[must_use]
    pub fn client(&self) -> &CompanyClient {
        &self.inner.client
    }

    fn spawn_sync(&self, handle: &Handle, user: Option<AuthUser>) {
        self.request(user.as_ref());
        self.inner.pending.send_modify(|count| *count += 1);

        let store = self.clone();
        handle.spawn(async move {
            store.fetch_and_apply(user).await;
            store
                .inner
                .pending
                .send_modify(|count| *count = count.saturating_sub(1));
        });
    }

    /// Records `user` as the latest request; only its result will be applied.
    fn request(&self, user: Option<&AuthUser>) {
        *self
            .inner
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = user.map(|user| user.uid.clone());
        if user.is_some() {
            self.write().loading = true;
        }
    }

    fn is_current(&self, uid: Option<&str>) -> bool {
        self.inner
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == uid
    }

    async fn fetch_and_apply(&self, user: Option<AuthUser>) {
        let Some(user) = user else {
            if self.is_current(None) {
                *self.write() = CompanyState::default();
            }
            return;
        };

        let result = self.inner.client.fetch(&user.uid).await;
        if !self.is_current(Some(&user.uid)) {
            debug!(uid = %user.uid, "discarding company profile for previous user");
            return;
        }

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(Some(company)) => {
                debug!(uid = %user.uid, "company profile loaded");
                state.company = Some(company);
                state.error = None;
            }
            Ok(None) => {
                debug!(uid = %user.uid, "no company profile yet");
                state.company = None;
                state.error = None;
            }
            Err(err) => {
                warn!(uid = %user.uid, error = %err, "failed to fetch company profile");
                state.error = Some(err.user_message());
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CompanyState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CompanyState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::{ApiClient, AppConfig};
    use crate::features::company::COMPANY_PROFILE_PATH;
    use crate::test_support::{user, FakeProvider};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> CompanyStore {
        let config = AppConfig {
            api_base_url: server.uri(),
            ..AppConfig::default()
        };
        CompanyStore::new(CompanyClient::new(ApiClient::new(&config).unwrap()))
    }

    fn acme() -> CompanyProfile {
        CompanyProfile {
            company_name: "Acme".to_string(),
            contact_email: "hr@acme.test".to_string(),
            ..CompanyProfile::default()
        }
    }

    async fn mount_profile(server: &MockServer, uid: &str, status: u16) {
        let template = if status == 200 {
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {"companyName": "Acme", "contactEmail": "hr@acme.test"}
            }))
        } else {
            ResponseTemplate::new(status).set_body_json(json!({"error": "database offline"}))
        };
        Mock::given(method("GET"))
            .and(path(COMPANY_PROFILE_PATH))
            .and(query_param("userId", uid))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn missing_profile_is_none_without_error() {
        let server = MockServer::start().await;
        mount_profile(&server, "uid-1", 404).await;
        let store = store(&server);

        store.sync(Some(user("uid-1", "ada@example.com", true))).await;

        assert_eq!(store.snapshot(), CompanyState::default());
    }

    #[tokio::test]
    async fn server_error_keeps_previous_company() {
        let server = MockServer::start().await;
        mount_profile(&server, "uid-1", 500).await;
        let store = store(&server);
        store.set_company(acme());

        store.sync(Some(user("uid-1", "ada@example.com", true))).await;

        let state = store.snapshot();
        assert_eq!(state.company, Some(acme()));
        assert_eq!(state.error.as_deref(), Some("database offline"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn signed_out_user_clears_company() {
        let server = MockServer::start().await;
        let store = store(&server);
        store.set_company(acme());

        store.sync(None).await;
        assert_eq!(store.company(), None);
    }

    #[tokio::test]
    async fn attached_store_follows_session_user() {
        let server = MockServer::start().await;
        mount_profile(&server, "uid-1", 200).await;
        Mock::given(method("GET"))
            .and(path(COMPANY_PROFILE_PATH))
            .and(query_param("userId", "uid-2"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let provider = FakeProvider::signed_in(user("uid-1", "ada@example.com", true));
        let session = SessionContext::new(provider.clone());
        let store = store(&server);
        store.attach(&session).unwrap();

        store.wait_idle().await;
        assert_eq!(store.company(), Some(acme()));

        provider.set_user(Some(user("uid-2", "grace@example.com", true)));
        store.wait_idle().await;
        assert_eq!(store.company(), None);
        assert_eq!(store.error(), None);

        provider.set_user(None);
        store.wait_idle().await;
        assert_eq!(store.snapshot(), CompanyState::default());
    }

    #[test]
    fn attach_outside_runtime_is_a_config_error() {
        let provider = FakeProvider::new();
        let session = SessionContext::new(provider);
        let config = AppConfig::default();
        let store = CompanyStore::new(CompanyClient::new(ApiClient::new(&config).unwrap()));

        assert!(matches!(store.attach(&session), Err(AppError::Config(_))));
    }
}
