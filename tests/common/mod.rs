//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use organic_store::auth::{KeyValueStore, MemoryStore};
use organic_store::ui::{NoticeLevel, UiHooks};
use organic_store::{BaseUrl, StoreConfig, Storefront};
use wiremock::MockServer;

/// UI hooks that remember every call.
#[derive(Default)]
pub struct RecordingUi {
    path: Mutex<Option<String>>,
    notices: Mutex<Vec<(NoticeLevel, String)>>,
    redirects: Mutex<Vec<(String, Duration)>>,
    cart_counts: Mutex<Vec<u64>>,
    loading: Mutex<Vec<bool>>,
}

impl RecordingUi {
    pub fn at(path: &str) -> Self {
        let ui = Self::default();
        *ui.path.lock().unwrap() = Some(path.to_string());
        ui
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<(String, Duration)> {
        self.redirects.lock().unwrap().clone()
    }

    pub fn cart_counts(&self) -> Vec<u64> {
        self.cart_counts.lock().unwrap().clone()
    }

    pub fn loading(&self) -> Vec<bool> {
        self.loading.lock().unwrap().clone()
    }

    pub fn last_notice(&self) -> Option<(NoticeLevel, String)> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl UiHooks for RecordingUi {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    fn redirect(&self, target: &str, delay: Duration) {
        self.redirects
            .lock()
            .unwrap()
            .push((target.to_string(), delay));
    }

    fn current_path(&self) -> Option<String> {
        self.path.lock().unwrap().clone()
    }

    fn set_cart_count(&self, count: u64) {
        self.cart_counts.lock().unwrap().push(count);
    }

    fn set_loading(&self, loading: bool) {
        self.loading.lock().unwrap().push(loading);
    }
}

/// A storefront wired to a mock backend.
pub struct Harness {
    pub server: MockServer,
    pub store: Storefront,
    pub ui: Arc<RecordingUi>,
    pub storage: Arc<MemoryStore>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with_ui(RecordingUi::default()).await
    }

    pub async fn start_with_ui(ui: RecordingUi) -> Self {
        let server = MockServer::start().await;
        let ui = Arc::new(ui);
        let storage = Arc::new(MemoryStore::new());
        let config = create_test_config(&server.uri());
        let store = Storefront::new(&config, storage.clone(), ui.clone()).unwrap();

        Self {
            server,
            store,
            ui,
            storage,
        }
    }

    /// Stores a token pair as if a login had happened.
    pub fn log_in(&self, access: &str, refresh: &str) {
        self.store.tokens().save(access, refresh);
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.get(key)
    }
}

pub fn create_test_config(base_url: &str) -> StoreConfig {
    StoreConfig::builder()
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap()
}
