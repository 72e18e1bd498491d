//! Service-registration context consumed by serve and clone paths.

use std::sync::Arc;
use std::thread::JoinHandle;

use portico_channel::Endpoint;
use thiserror::Error;
use tracing::warn;

use crate::handler::DirectoryHandler;

/// Callback fired when a registered connection closes.
pub type CloseCallback = Box<dyn FnOnce() + Send>;

/// Registers directory handlers against connection endpoints.
///
/// The namespace uses the context twice: at serve time, to advertise itself
/// on a freshly supplied endpoint, and at clone time, to re-expose the
/// identical namespace through a new endpoint.
pub trait ServiceContext: Send + Sync {
    /// Registers `handler` to receive the requests arriving on `endpoint`.
    ///
    /// The endpoint is consumed in every case: on failure the context
    /// closes it before returning, so callers never regain access to a
    /// rejected endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the registration is rejected.
    fn add(
        &self,
        handler: Arc<dyn DirectoryHandler>,
        endpoint: Endpoint,
        on_close: Option<CloseCallback>,
    ) -> Result<RegistrationHandle, RegistryError>;
}

/// Errors surfaced by a registration attempt.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The context declined the registration.
    #[error("registration rejected: {reason}")]
    Rejected {
        /// Why the registration was declined.
        reason: String,
    },

    /// The context is no longer accepting registrations.
    #[error("registry is shutting down")]
    ShuttingDown,
}

impl RegistryError {
    /// Creates a rejection with the given reason.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Handle to a registered connection.
///
/// Dropping the handle detaches the underlying worker; the connection keeps
/// being served until its endpoint disconnects.
#[derive(Debug)]
pub struct RegistrationHandle {
    worker: Option<JoinHandle<()>>,
}

impl RegistrationHandle {
    /// Creates a handle with no attached worker.
    ///
    /// Intended for [`ServiceContext`] implementations that track
    /// registrations elsewhere (including test doubles).
    #[must_use]
    pub const fn detached() -> Self {
        Self { worker: None }
    }

    pub(crate) const fn for_worker(worker: JoinHandle<()>) -> Self {
        Self {
            worker: Some(worker),
        }
    }

    /// Waits for the connection's worker to finish serving.
    ///
    /// Returns immediately for detached handles.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("connection worker panicked");
        }
    }
}
