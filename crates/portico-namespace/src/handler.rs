//! Handler abstraction invoked per inbound directory request.

use std::sync::Arc;

use portico_wire::ResponseFrame;

use crate::errors::NamespaceError;
use crate::request::DirectoryRequest;

/// Handles decoded directory requests for one registered connection.
///
/// The surrounding message-delivery runtime invokes the handler once per
/// inbound request; every operation completes synchronously relative to the
/// message that triggered it. The `Arc` receiver lets the handler register
/// itself against further endpoints, which the clone path requires.
pub trait DirectoryHandler: Send + Sync {
    /// Handles a single directory request.
    ///
    /// Returns `Some` response frame for verbs that reply in-band, or
    /// `None` for `open`/`clone`, whose acknowledgment (when requested)
    /// travels out-of-band on the connection endpoint itself.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails or when a peer closes
    /// before an acknowledgment can be delivered. Errors are local to the
    /// request; the connection itself stays serviceable.
    fn handle_request(
        self: Arc<Self>,
        request: DirectoryRequest,
    ) -> Result<Option<ResponseFrame>, NamespaceError>;
}
