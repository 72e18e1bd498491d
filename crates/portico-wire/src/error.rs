//! Error types for wire encoding and decoding.

use thiserror::Error;

use crate::verb::DirectoryVerb;

/// Errors surfaced while encoding or decoding protocol messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// A frame payload could not be parsed as a protocol message.
    #[error("malformed frame: {message}")]
    MalformedFrame {
        /// Human-readable description of the parse failure.
        message: String,
        /// Underlying deserialization error, when one exists.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A frame carried the wrong number of attached endpoints for its verb.
    #[error("{verb} expects {expected} attached channel(s), got {actual}")]
    ChannelMismatch {
        /// Verb named by the request body.
        verb: DirectoryVerb,
        /// Attachment count the verb requires.
        expected: usize,
        /// Attachment count the frame actually carried.
        actual: usize,
    },

    /// A protocol message could not be serialized.
    #[error("failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl WireError {
    /// Creates a malformed-frame error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a malformed-frame error from a deserialization failure.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedFrame {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a channel-count mismatch error.
    #[must_use]
    pub const fn channel_mismatch(verb: DirectoryVerb, expected: usize, actual: usize) -> Self {
        Self::ChannelMismatch {
            verb,
            expected,
            actual,
        }
    }
}
