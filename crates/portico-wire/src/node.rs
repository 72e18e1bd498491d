//! Node descriptors returned by describe and acknowledgment paths.

use serde::{Deserialize, Serialize};

/// Kind of object a connection resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// The namespace itself, opened via a self- or parent-reference path.
    Directory,
    /// A named service handed to a provider.
    Service,
}

/// Descriptor for an opened object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Kind of the opened object.
    pub kind: ObjectKind,
}

impl NodeInfo {
    /// Descriptor for the namespace directory.
    #[must_use]
    pub const fn directory() -> Self {
        Self {
            kind: ObjectKind::Directory,
        }
    }

    /// Descriptor for a dispatched service connection.
    #[must_use]
    pub const fn service() -> Self {
        Self {
            kind: ObjectKind::Service,
        }
    }
}

/// Fixed attribute block returned by the unimplemented `GetAttr` verb.
///
/// The namespace never stores attributes; the zeroed block accompanies the
/// `not_supported` status purely to keep the response shape stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Protection bits and node type.
    pub mode: u32,
    /// Filesystem-unique node identifier.
    pub id: u64,
    /// Logical content size in bytes.
    pub content_size: u64,
    /// Allocated size in bytes.
    pub storage_size: u64,
    /// Hard-link count.
    pub link_count: u64,
    /// Creation timestamp in nanoseconds.
    pub creation_time: u64,
    /// Last-modification timestamp in nanoseconds.
    pub modification_time: u64,
}

impl NodeAttributes {
    /// The zeroed attribute block.
    pub const EMPTY: Self = Self {
        mode: 0,
        id: 0,
        content_size: 0,
        storage_size: 0,
        link_count: 0,
        creation_time: 0,
        modification_time: 0,
    };
}
