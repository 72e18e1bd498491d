//! JSONL request and response bodies.
//!
//! A request body is the serializable part of a directory request; verbs
//! that transfer endpoints carry them attached to the surrounding frame
//! rather than in the payload, and [`RequestBody::expected_channels`]
//! records how many attachments each verb requires. Responses use a small
//! set of fixed shapes so the degenerate verbs can reply with constants.

use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::flags::OpenFlags;
use crate::node::{NodeAttributes, NodeInfo};
use crate::status::Status;
use crate::verb::DirectoryVerb;

/// Serializable body of an inbound directory request, tagged by verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verb", rename_all = "snake_case")]
pub enum RequestBody {
    /// Resolve `path` and connect the attached endpoint.
    Open {
        /// Open flags; only the describe bit is inspected.
        flags: OpenFlags,
        /// Requested path, a single opaque service name.
        path: String,
    },
    /// Serve the namespace on the attached endpoint.
    Clone {
        /// Open flags; only the describe bit is inspected.
        flags: OpenFlags,
    },
    /// Close the connection.
    Close,
    /// Enumerate supported interfaces.
    ListInterfaces,
    /// Bind the connection to a named interface.
    Bind {
        /// Interface name.
        interface: String,
    },
    /// Describe the object behind the connection.
    Describe,
    /// Flush pending writes.
    Sync,
    /// Read node attributes.
    GetAttr,
    /// Update node attributes.
    SetAttr {
        /// Attribute-selection flags.
        flags: u32,
        /// Replacement attribute values.
        attributes: NodeAttributes,
    },
    /// Device-specific control operation.
    Ioctl {
        /// Operation code.
        opcode: u32,
        /// Maximum response payload size.
        max_out: u64,
        /// Operation input bytes.
        input: Vec<u8>,
    },
    /// Remove a directory entry.
    Unlink {
        /// Entry to remove.
        path: String,
    },
    /// Read directory entries.
    ReadDirents {
        /// Maximum number of bytes to return.
        max_bytes: u64,
    },
    /// Reset the directory-entry cursor.
    Rewind,
    /// Obtain a linking token.
    GetToken,
    /// Rename a directory entry.
    Rename {
        /// Source entry name.
        src: String,
        /// Destination entry name.
        dst: String,
    },
    /// Hard-link a directory entry.
    Link {
        /// Source entry name.
        src: String,
        /// Destination entry name.
        dst: String,
    },
    /// Register a watcher on the attached endpoint.
    Watch {
        /// Event mask the watcher is interested in.
        mask: u32,
        /// Watch options.
        options: u32,
    },
}

impl RequestBody {
    /// Returns the verb named by this body.
    #[must_use]
    pub const fn verb(&self) -> DirectoryVerb {
        match self {
            Self::Open { .. } => DirectoryVerb::Open,
            Self::Clone { .. } => DirectoryVerb::Clone,
            Self::Close => DirectoryVerb::Close,
            Self::ListInterfaces => DirectoryVerb::ListInterfaces,
            Self::Bind { .. } => DirectoryVerb::Bind,
            Self::Describe => DirectoryVerb::Describe,
            Self::Sync => DirectoryVerb::Sync,
            Self::GetAttr => DirectoryVerb::GetAttr,
            Self::SetAttr { .. } => DirectoryVerb::SetAttr,
            Self::Ioctl { .. } => DirectoryVerb::Ioctl,
            Self::Unlink { .. } => DirectoryVerb::Unlink,
            Self::ReadDirents { .. } => DirectoryVerb::ReadDirents,
            Self::Rewind => DirectoryVerb::Rewind,
            Self::GetToken => DirectoryVerb::GetToken,
            Self::Rename { .. } => DirectoryVerb::Rename,
            Self::Link { .. } => DirectoryVerb::Link,
            Self::Watch { .. } => DirectoryVerb::Watch,
        }
    }

    /// Returns how many attached endpoints a verb's frame must carry.
    #[must_use]
    pub const fn expected_channels(verb: DirectoryVerb) -> usize {
        match verb {
            DirectoryVerb::Open | DirectoryVerb::Clone | DirectoryVerb::Watch => 1,
            _ => 0,
        }
    }

    /// Encodes the body as a newline-terminated JSONL line.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Serialize`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut line = serde_json::to_vec(self).map_err(WireError::Serialize)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Decodes a body from a received frame payload.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MalformedFrame`] if the payload is empty or does
    /// not match the request schema.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let trimmed = trim_trailing_whitespace(bytes);
        if trimmed.is_empty() {
            return Err(WireError::malformed("empty request payload"));
        }
        serde_json::from_slice(trimmed).map_err(WireError::from_json_error)
    }
}

/// Serializable response to a directory request, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseFrame {
    /// Bare status reply.
    Status {
        /// Outcome of the operation.
        status: Status,
    },
    /// Status plus node attributes (`get_attr`).
    Attributes {
        /// Outcome of the operation.
        status: Status,
        /// Attribute block; zeroed when the status is not `ok`.
        attributes: NodeAttributes,
    },
    /// Status plus a byte payload (`ioctl`, `read_dirents`).
    Data {
        /// Outcome of the operation.
        status: Status,
        /// Response bytes; empty when the status is not `ok`.
        data: Vec<u8>,
    },
    /// Status plus an optional linking token (`get_token`).
    Token {
        /// Outcome of the operation.
        status: Status,
        /// Token value; `None` when the status is not `ok`.
        token: Option<u64>,
    },
    /// Status plus interface names (`list_interfaces`).
    Interfaces {
        /// Outcome of the operation.
        status: Status,
        /// Supported interface names; empty when the status is not `ok`.
        interfaces: Vec<String>,
    },
    /// Node descriptor (`describe`).
    Node {
        /// Descriptor of the object behind the connection.
        info: NodeInfo,
    },
}

impl ResponseFrame {
    /// The bare `not_supported` reply shared by most degenerate verbs.
    #[must_use]
    pub const fn not_supported() -> Self {
        Self::Status {
            status: Status::NotSupported,
        }
    }

    /// Encodes the response as a newline-terminated JSONL line.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Serialize`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut line = serde_json::to_vec(self).map_err(WireError::Serialize)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Decodes a response from a received frame payload.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MalformedFrame`] if the payload is empty or does
    /// not match the response schema.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let trimmed = trim_trailing_whitespace(bytes);
        if trimmed.is_empty() {
            return Err(WireError::malformed("empty response payload"));
        }
        serde_json::from_slice(trimmed).map_err(WireError::from_json_error)
    }
}

/// Trims trailing ASCII whitespace from a byte slice.
pub(crate) fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or(bytes)
}
