#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use smartshop_core::{
    ApiClient, AuthRepository, Config, Credential, CredentialError, CredentialReader,
    CredentialStore, MemoryCredentialStore, UserRepository,
};

/// Memory store that counts writes.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryCredentialStore,
    saves: AtomicUsize,
}

impl RecordingStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CredentialStore for RecordingStore {
    fn save(&self, credential: Credential) -> Result<(), CredentialError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(credential)
    }

    fn get(&self) -> Option<Credential> {
        self.inner.get()
    }
}

pub struct Harness {
    pub store: Arc<RecordingStore>,
    pub auth: AuthRepository,
    pub user: UserRepository,
}

pub fn harness(base_url: &str) -> Harness {
    harness_with(Config {
        request_timeout_secs: 5,
        ..Config::with_base_url(base_url)
    })
}

pub fn harness_with(config: Config) -> Harness {
    let store = Arc::new(RecordingStore::default());
    let api = ApiClient::new(&config, CredentialReader::new(store.clone())).expect("valid client");
    Harness {
        auth: AuthRepository::new(api.clone(), store.clone()),
        user: UserRepository::new(api),
        store,
    }
}

/// Base URL of a local port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

pub fn login_ok(token: &str) -> serde_json::Value {
    serde_json::json!({
        "isSuccess": true,
        "value": {
            "code": "200",
            "message": "Login successful",
            "data": { "accessToken": token, "refreshToken": "refresh-1" }
        },
        "error": null
    })
}

pub fn user_payload() -> serde_json::Value {
    serde_json::json!({
        "id": "b7f3c1e2",
        "username": "ann",
        "email": "ann@example.com",
        "phoneNumber": "5551234567",
        "address": "1 Main St",
        "role": "Customer",
        "createdAt": "2025-03-04T10:15:00Z"
    })
}
