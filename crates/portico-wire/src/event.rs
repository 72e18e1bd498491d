//! The out-of-band acknowledgment event for open-style operations.

use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::node::NodeInfo;
use crate::status::Status;

/// One-shot event sent back to an `open`/`clone` caller when the describe
/// flag was set.
///
/// The event always precedes any provider-specific traffic on the same
/// connection, so callers may rely on reading it first. On success it
/// carries the kind of object that was opened; on failure the descriptor is
/// absent because nothing was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NodeEvent {
    /// Acknowledgment of an open attempt.
    OnOpen {
        /// Outcome of the open attempt.
        status: Status,
        /// Descriptor of the opened object; `None` when the open failed.
        info: Option<NodeInfo>,
    },
}

impl NodeEvent {
    /// Builds an on-open acknowledgment.
    #[must_use]
    pub const fn on_open(status: Status, info: Option<NodeInfo>) -> Self {
        Self::OnOpen { status, info }
    }

    /// Encodes the event as a newline-terminated JSONL line.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Serialize`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut line = serde_json::to_vec(self).map_err(WireError::Serialize)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Decodes an event from a received frame payload.
    ///
    /// Trailing ASCII whitespace (including the newline delimiter) is
    /// trimmed before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MalformedFrame`] if the payload is empty or is
    /// not a valid event.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let trimmed = crate::frames::trim_trailing_whitespace(bytes);
        if trimmed.is_empty() {
            return Err(WireError::malformed("empty event payload"));
        }
        serde_json::from_slice(trimmed).map_err(WireError::from_json_error)
    }
}
