//! Shared test doubles for the namespace suites.

#![expect(clippy::expect_used, reason = "test support uses expect for clarity")]

use std::sync::{Arc, Mutex};

use portico_channel::{Endpoint, Frame};

use crate::registry::{CloseCallback, RegistrationHandle, RegistryError, ServiceContext};
use crate::DirectoryHandler;

/// Records provider invocations and keeps the received endpoints alive so
/// peers observe the connection as open.
pub(crate) struct ProviderLog {
    calls: Mutex<Vec<(String, Endpoint)>>,
}

impl ProviderLog {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Returns a provider closure that records each dispatch.
    pub(crate) fn recorder(self: &Arc<Self>) -> impl Fn(&str, Endpoint) + Send + Sync + 'static {
        let log = Arc::clone(self);
        move |name: &str, endpoint: Endpoint| {
            log.calls
                .lock()
                .expect("calls lock")
                .push((name.to_owned(), endpoint));
        }
    }

    /// Returns a provider closure that sends `marker` on the received
    /// endpoint before recording, so callers can observe dispatch order on
    /// the connection itself.
    pub(crate) fn marking_recorder(
        self: &Arc<Self>,
        marker: &'static [u8],
    ) -> impl Fn(&str, Endpoint) + Send + Sync + 'static {
        let log = Arc::clone(self);
        move |name: &str, endpoint: Endpoint| {
            endpoint
                .send(Frame::from_bytes(marker.to_vec()))
                .expect("send provider marker");
            log.calls
                .lock()
                .expect("calls lock")
                .push((name.to_owned(), endpoint));
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Context that accepts every registration and parks the endpoint, keeping
/// the connection open without serving it.
pub(crate) struct HoldingContext {
    endpoints: Mutex<Vec<Endpoint>>,
}

impl HoldingContext {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            endpoints: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn registration_count(&self) -> usize {
        self.endpoints.lock().expect("endpoints lock").len()
    }
}

impl ServiceContext for HoldingContext {
    fn add(
        &self,
        _handler: Arc<dyn DirectoryHandler>,
        endpoint: Endpoint,
        _on_close: Option<CloseCallback>,
    ) -> Result<RegistrationHandle, RegistryError> {
        self.endpoints.lock().expect("endpoints lock").push(endpoint);
        Ok(RegistrationHandle::detached())
    }
}
