//! Error types for channel operations.

use thiserror::Error;

/// Errors surfaced by endpoint send and receive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The peer endpoint has been closed; no further traffic is possible.
    #[error("peer endpoint is closed")]
    Disconnected,
}
