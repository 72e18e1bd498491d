//! In-process registration context with one worker per connection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use portico_channel::{Endpoint, Frame};
use portico_wire::{DirectoryVerb, ResponseFrame};
use tracing::{debug, warn};

use crate::handler::DirectoryHandler;
use crate::registry::{CloseCallback, RegistrationHandle, RegistryError, ServiceContext};
use crate::request::DirectoryRequest;

/// Tracing target for registry and serve-loop activity.
const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Options for [`LocalRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Prefix for worker thread names.
    pub thread_name_prefix: String,
    /// Maximum number of concurrently served connections, unbounded when
    /// `None`.
    pub capacity: Option<usize>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            thread_name_prefix: "portico-serve".into(),
            capacity: None,
        }
    }
}

/// Registration context that serves each endpoint on its own worker thread.
///
/// The worker supplies the asynchronous message delivery the dispatcher
/// itself avoids: it blocks on the endpoint, decodes each inbound frame
/// into a [`DirectoryRequest`], and invokes the handler once per message.
/// A malformed frame drops the connection; handler errors are logged and
/// the connection keeps being served.
#[derive(Debug)]
pub struct LocalRegistry {
    options: RegistryOptions,
    active: Arc<AtomicUsize>,
    next_id: AtomicU64,
}

impl LocalRegistry {
    /// Creates a registry with the given options.
    #[must_use]
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            options,
            active: Arc::new(AtomicUsize::new(0)),
            next_id: AtomicU64::new(0),
        }
    }

    /// Returns the number of currently served connections.
    #[must_use]
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new(RegistryOptions::default())
    }
}

impl ServiceContext for LocalRegistry {
    fn add(
        &self,
        handler: Arc<dyn DirectoryHandler>,
        endpoint: Endpoint,
        on_close: Option<CloseCallback>,
    ) -> Result<RegistrationHandle, RegistryError> {
        let Some(guard) = ActiveGuard::try_enter(Arc::clone(&self.active), self.options.capacity)
        else {
            // Admission fails only when a capacity limit is configured.
            let capacity = self.options.capacity.unwrap_or_default();
            debug!(target: REGISTRY_TARGET, capacity, "rejecting registration at capacity");
            return Err(RegistryError::rejected(format!(
                "connection capacity {capacity} reached"
            )));
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let name = format!("{}-{id}", self.options.thread_name_prefix);
        let worker = thread::Builder::new()
            .name(name)
            .spawn(move || {
                let _guard = guard;
                serve_connection(&handler, &endpoint, on_close);
            })
            .map_err(|error| {
                RegistryError::rejected(format!("failed to spawn connection worker: {error}"))
            })?;
        Ok(RegistrationHandle::for_worker(worker))
    }
}

/// Holds one admitted slot in the active-connection count and releases it
/// when the worker exits.
struct ActiveGuard {
    active: Arc<AtomicUsize>,
}

impl ActiveGuard {
    /// Atomically claims a slot, so concurrent admissions can never exceed
    /// the configured capacity.
    fn try_enter(active: Arc<AtomicUsize>, capacity: Option<usize>) -> Option<Self> {
        let admitted = active.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
            match capacity {
                Some(limit) if current >= limit => None,
                _ => current.checked_add(1),
            }
        });
        admitted.ok().map(|_| Self { active })
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

fn serve_connection(
    handler: &Arc<dyn DirectoryHandler>,
    endpoint: &Endpoint,
    on_close: Option<CloseCallback>,
) {
    while let Ok(frame) = endpoint.recv() {
        let request = match DirectoryRequest::decode(frame) {
            Ok(request) => request,
            Err(error) => {
                warn!(
                    target: REGISTRY_TARGET,
                    %error,
                    "dropping connection after malformed request"
                );
                break;
            }
        };
        let verb = request.verb();
        debug!(target: REGISTRY_TARGET, %verb, "handling request");
        match Arc::clone(handler).handle_request(request) {
            Ok(Some(response)) => {
                if !write_response(endpoint, verb, &response) {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(target: REGISTRY_TARGET, %verb, %error, "request handling failed");
            }
        }
    }
    if let Some(callback) = on_close {
        callback();
    }
}

fn write_response(endpoint: &Endpoint, verb: DirectoryVerb, response: &ResponseFrame) -> bool {
    let bytes = match response.encode() {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(target: REGISTRY_TARGET, %verb, %error, "failed to encode response");
            return false;
        }
    };
    match endpoint.send(Frame::from_bytes(bytes)) {
        Ok(()) => true,
        Err(error) => {
            debug!(
                target: REGISTRY_TARGET,
                %verb,
                %error,
                "peer closed before response delivery"
            );
            false
        }
    }
}
