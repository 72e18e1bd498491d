//! Service-namespace directory dispatcher.
//!
//! Portico exposes a single directory-like endpoint through which named
//! services are looked up and connected. A [`Namespace`] owns an immutable
//! provider function; inbound open requests are validated (flat,
//! single-segment name resolution only), acknowledged when the caller asks
//! for a describe event, and handed to the provider together with the
//! connection endpoint. The full directory-protocol surface is served:
//! `open`, `clone` and `describe` carry real logic, while the remaining
//! verbs reply from a constant table so callers always receive *a*
//! response.
//!
//! ## Serving
//!
//! A namespace is registered against an endpoint through a
//! [`ServiceContext`]. The bundled [`LocalRegistry`] runs one worker per
//! registered endpoint: it reads request frames, decodes them into
//! [`DirectoryRequest`] values, and hands each to the namespace. Embedders
//! with their own message-delivery runtime implement [`ServiceContext`] and
//! call [`DirectoryHandler::handle_request`] per inbound message instead.
//!
//! ## Endpoint lifecycle
//!
//! Every request terminates its endpoint exactly once: closed on reject,
//! transferred to the provider on dispatch, or parked (retained open) when
//! the caller opens the namespace itself via `.` or `..`.

mod errors;
mod handler;
mod local_registry;
mod namespace;
mod registry;
mod request;
mod stubs;
pub mod telemetry;

pub use errors::NamespaceError;
pub use handler::DirectoryHandler;
pub use local_registry::{LocalRegistry, RegistryOptions};
pub use namespace::{Namespace, NamespaceBuilder, Provider};
pub use registry::{CloseCallback, RegistrationHandle, RegistryError, ServiceContext};
pub use request::DirectoryRequest;

#[cfg(test)]
mod tests;
