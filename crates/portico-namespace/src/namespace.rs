//! The namespace dispatcher.

use std::sync::{Arc, Mutex, PoisonError};

use portico_channel::{Endpoint, Frame, Signal};
use portico_wire::{DirectoryVerb, NodeEvent, NodeInfo, OpenFlags, ResponseFrame, Status};
use tracing::debug;

use crate::errors::NamespaceError;
use crate::handler::DirectoryHandler;
use crate::local_registry::LocalRegistry;
use crate::registry::{RegistrationHandle, ServiceContext};
use crate::request::DirectoryRequest;
use crate::stubs::stub_response;

/// Tracing target for dispatch decisions.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Provider dispatch function.
///
/// Maps a resolved service name to whatever implements that service,
/// taking ownership of the connection endpoint. The call is fire-and-forget:
/// the namespace observes no return value and does not await whatever
/// protocol the provider subsequently runs on the endpoint.
pub type Provider = Box<dyn Fn(&str, Endpoint) + Send + Sync>;

/// Outcome classification for a requested path.
enum PathClass {
    /// Contains an internal separator; only flat resolution is supported.
    MultiSegment,
    /// `.` or `..`: the caller opens the namespace itself.
    SelfReference,
    /// An opaque service name, including the empty string.
    Service,
}

fn classify_path(path: &str) -> PathClass {
    if path.contains('/') {
        PathClass::MultiSegment
    } else if path == "." || path == ".." {
        PathClass::SelfReference
    } else {
        PathClass::Service
    }
}

/// The service-namespace directory dispatcher.
///
/// A namespace routes inbound open requests to a provider function fixed at
/// construction. It holds no per-request state: routing reads only the
/// provider reference, and the sole mutable field is the list of endpoints
/// retained open by self-referential opens.
///
/// Namespaces are handled through `Arc` because serving registers the
/// dispatcher itself against each connection endpoint.
pub struct Namespace {
    provider: Provider,
    registry: Arc<dyn ServiceContext>,
    parked: Mutex<Vec<Endpoint>>,
}

impl Namespace {
    /// Creates a namespace with the given provider and registration
    /// context.
    pub fn new(
        provider: impl Fn(&str, Endpoint) + Send + Sync + 'static,
        registry: Arc<dyn ServiceContext>,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider: Box::new(provider),
            registry,
            parked: Mutex::new(Vec::new()),
        })
    }

    /// Returns a builder for configuring a namespace.
    #[must_use]
    pub fn builder() -> NamespaceBuilder {
        NamespaceBuilder::new()
    }

    /// Opens a path, terminating the endpoint's lifecycle exactly once.
    ///
    /// Validation order: a path containing `/` is rejected as unsupported
    /// (flat resolution only) and the endpoint is closed; `.` and `..`
    /// succeed trivially and the endpoint is retained open; anything else
    /// is an opaque service name handed to the provider together with the
    /// endpoint. When the describe flag is set, exactly one acknowledgment
    /// event is sent before any of those dispositions becomes observable.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::Delivery`] when a requested acknowledgment
    /// cannot be delivered because the peer is already closed. The endpoint
    /// is still terminated exactly once on that path.
    pub fn open(
        &self,
        flags: OpenFlags,
        path: &str,
        object: Endpoint,
    ) -> Result<(), NamespaceError> {
        let describe = flags.contains(OpenFlags::DESCRIBE);
        match classify_path(path) {
            PathClass::MultiSegment => {
                debug!(target: DISPATCH_TARGET, path, "rejecting multi-segment path");
                let acknowledged = if describe {
                    send_acknowledgment(&object, Status::NotSupported, None)
                } else {
                    Ok(())
                };
                object.close();
                acknowledged
            }
            PathClass::SelfReference => {
                debug!(target: DISPATCH_TARGET, path, "self-open retains the connection");
                if describe {
                    send_acknowledgment(&object, Status::Ok, Some(NodeInfo::directory()))?;
                }
                self.park(object);
                Ok(())
            }
            PathClass::Service => {
                if describe {
                    send_acknowledgment(&object, Status::Ok, Some(NodeInfo::service()))?;
                }
                debug!(target: DISPATCH_TARGET, path, "dispatching to provider");
                (self.provider)(path, object);
                Ok(())
            }
        }
    }

    /// Re-exposes the identical namespace through a new endpoint.
    ///
    /// The endpoint is registered through the same path used at serve time,
    /// so a cloned connection later accepts `open` calls of its own. On
    /// success with the describe flag set, one acknowledgment event tagged
    /// as a service is sent on the new connection. That follows the
    /// registration contract, not the open-time resolution contract.
    ///
    /// # Errors
    ///
    /// Propagates [`NamespaceError::Registration`] when the context rejects
    /// the endpoint (the context has closed it), and
    /// [`NamespaceError::Delivery`] when the acknowledgment cannot be
    /// delivered.
    pub fn clone_to(
        self: &Arc<Self>,
        flags: OpenFlags,
        object: Endpoint,
    ) -> Result<(), NamespaceError> {
        let events = object.sender();
        self.serve(object)?;
        if flags.contains(OpenFlags::DESCRIBE) {
            let line = NodeEvent::on_open(Status::Ok, Some(NodeInfo::service())).encode()?;
            events.send(Frame::from_bytes(line))?;
        }
        Ok(())
    }

    /// Returns the static descriptor for the namespace: a directory.
    #[must_use]
    pub const fn describe(&self) -> NodeInfo {
        NodeInfo::directory()
    }

    /// Registers the namespace against a freshly supplied endpoint, then
    /// raises exactly one ready signal on the endpoint's peer.
    ///
    /// # Errors
    ///
    /// Propagates [`NamespaceError::Registration`] when the context rejects
    /// the endpoint; no signal is raised in that case. The context owns the
    /// endpoint's fate on failure, so the namespace does not separately
    /// close it.
    pub fn serve(
        self: &Arc<Self>,
        endpoint: Endpoint,
    ) -> Result<RegistrationHandle, NamespaceError> {
        let signaler = endpoint.signaler();
        let handler = Arc::clone(self);
        let handle = self.registry.add(handler, endpoint, None)?;
        signaler.raise(Signal::READY)?;
        Ok(handle)
    }

    fn park(&self, endpoint: Endpoint) {
        let mut parked = self
            .parked
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        parked.push(endpoint);
    }
}

impl DirectoryHandler for Namespace {
    fn handle_request(
        self: Arc<Self>,
        request: DirectoryRequest,
    ) -> Result<Option<ResponseFrame>, NamespaceError> {
        match request {
            DirectoryRequest::Open {
                flags,
                path,
                object,
            } => {
                self.open(flags, &path, object)?;
                Ok(None)
            }
            DirectoryRequest::Clone { flags, object } => {
                self.clone_to(flags, object)?;
                Ok(None)
            }
            DirectoryRequest::Describe => Ok(Some(ResponseFrame::Node {
                info: self.describe(),
            })),
            DirectoryRequest::Watch { watcher, .. } => {
                // Watching is a permanent non-feature, not a stub awaiting
                // completion; the notification endpoint is closed before
                // the constant reply goes out.
                watcher.close();
                Ok(stub_response(DirectoryVerb::Watch))
            }
            other => Ok(stub_response(other.verb())),
        }
    }
}

fn send_acknowledgment(
    endpoint: &Endpoint,
    status: Status,
    info: Option<NodeInfo>,
) -> Result<(), NamespaceError> {
    let line = NodeEvent::on_open(status, info).encode()?;
    endpoint.send(Frame::from_bytes(line))?;
    Ok(())
}

/// Builder for [`Namespace`].
///
/// The provider is required; the registration context defaults to a
/// [`LocalRegistry`] with default options.
#[derive(Default)]
pub struct NamespaceBuilder {
    provider: Option<Provider>,
    registry: Option<Arc<dyn ServiceContext>>,
}

impl NamespaceBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the provider dispatch function.
    #[must_use]
    pub fn provider(mut self, provider: impl Fn(&str, Endpoint) + Send + Sync + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Sets the service-registration context.
    #[must_use]
    pub fn registry(mut self, registry: Arc<dyn ServiceContext>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Finalises the namespace.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::MissingProvider`] when no provider was
    /// configured.
    pub fn build(self) -> Result<Arc<Namespace>, NamespaceError> {
        let provider = self.provider.ok_or(NamespaceError::MissingProvider)?;
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(LocalRegistry::default()));
        Ok(Arc::new(Namespace {
            provider,
            registry,
            parked: Mutex::new(Vec::new()),
        }))
    }
}
