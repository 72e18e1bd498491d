//! Protocol status codes.

use serde::{Deserialize, Serialize};

/// Status code carried by protocol responses and acknowledgment events.
///
/// The namespace surface needs exactly two codes: successful operations
/// report [`Status::Ok`], and every unimplemented verb (as well as
/// multi-segment path resolution) reports [`Status::NotSupported`]. Callers
/// depend on receiving precisely `NotSupported` for rejected paths, so no
/// finer-grained code exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The operation completed.
    Ok,
    /// The operation is not implemented by the namespace.
    NotSupported,
}

impl Status {
    /// Returns `true` for [`Status::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}
