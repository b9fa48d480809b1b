use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Runtime;

use cordial_client::{
    shared::UserSnapshot, Client, ClientConfig, Dispatched, Event, EventListener,
};

use crate::LocalTransport;

/// Id of the account every test client runs as
pub const SELF_ID: u64 = 81384788765712384;

/// A client wired to a [`LocalTransport`], with its own runtime to execute
/// requests on
pub struct TestClient {
    pub client: Client,
    pub transport: Arc<LocalTransport>,
    pub listener: Arc<RecordingListener>,
    runtime: Runtime,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::build(config, self_user(false))
    }

    /// A self account with MFA enabled
    pub fn with_mfa() -> Self {
        Self::build(ClientConfig::default(), self_user(true))
    }

    fn build(config: ClientConfig, self_user: UserSnapshot) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("test runtime");
        let transport = LocalTransport::new();
        let client = Client::new(config, self_user, transport.clone(), runtime.handle().clone());
        let listener = Arc::new(RecordingListener::default());
        client.add_listener(listener.clone());
        Self {
            client,
            transport,
            listener,
            runtime,
        }
    }

    pub fn dispatch(&self, bytes: &[u8]) -> Dispatched {
        self.client.dispatch(bytes)
    }

    pub fn dispatch_all<'a, I: IntoIterator<Item = &'a Vec<u8>>>(&self, envelopes: I) -> Vec<Dispatched> {
        envelopes
            .into_iter()
            .map(|bytes| self.client.dispatch(bytes))
            .collect()
    }

    /// Events published since the last call, oldest first
    pub fn take_events(&self) -> Vec<Event> {
        self.listener.take()
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn self_user(mfa_enabled: bool) -> UserSnapshot {
    serde_json::from_value(serde_json::json!({
        "id": SELF_ID.to_string(),
        "username": "self",
        "discriminator": "0001",
        "verified": true,
        "mfa_enabled": mfa_enabled,
    }))
    .expect("self user fixture")
}

/// Collects every event it is handed
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<Event>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Empties the recording, returning what it held
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }
}
