//! Error types for namespace operations.

use portico_channel::ChannelError;
use portico_wire::WireError;
use thiserror::Error;

use crate::registry::RegistryError;

/// Errors surfaced by namespace operations.
///
/// Path rejection and unimplemented verbs are not errors: they travel to
/// the remote caller as `not_supported` status codes. The variants here
/// cover local failures only, each terminal for the request that produced
/// it.
#[derive(Debug, Error)]
pub enum NamespaceError {
    /// The builder was finalised without a provider function.
    #[error("namespace requires a provider")]
    MissingProvider,

    /// The service-registration context rejected a serve or clone attempt.
    #[error("service registration failed: {0}")]
    Registration(#[from] RegistryError),

    /// The peer endpoint closed before an acknowledgment or signal could be
    /// delivered.
    #[error("failed to deliver to peer: {0}")]
    Delivery(#[from] ChannelError),

    /// A protocol message could not be encoded.
    #[error("wire encoding failed: {0}")]
    Wire(#[from] WireError),
}
