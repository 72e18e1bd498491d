//! The directory protocol verb set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Every operation in the directory protocol surface.
///
/// The namespace implements real logic for `Open`, `Clone`, `Describe` and
/// the serve path; the remaining verbs exist so every caller receives *a*
/// response, and each maps to a fixed `not_supported` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryVerb {
    /// Resolve a path and connect its endpoint.
    Open,
    /// Re-expose the namespace through a new endpoint.
    Clone,
    /// Close the connection.
    Close,
    /// Enumerate supported interfaces.
    ListInterfaces,
    /// Bind the connection to a named interface.
    Bind,
    /// Describe the object behind the connection.
    Describe,
    /// Flush pending writes.
    Sync,
    /// Read node attributes.
    GetAttr,
    /// Update node attributes.
    SetAttr,
    /// Device-specific control operation.
    Ioctl,
    /// Remove a directory entry.
    Unlink,
    /// Read directory entries.
    ReadDirents,
    /// Reset the directory-entry cursor.
    Rewind,
    /// Obtain a linking token.
    GetToken,
    /// Rename a directory entry.
    Rename,
    /// Hard-link a directory entry.
    Link,
    /// Register a watcher for directory changes.
    Watch,
}

impl DirectoryVerb {
    /// Parses a verb string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MalformedFrame`] if the value does not match any
    /// known verb.
    pub fn parse(value: &str) -> Result<Self, WireError> {
        match value.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "clone" => Ok(Self::Clone),
            "close" => Ok(Self::Close),
            "list_interfaces" => Ok(Self::ListInterfaces),
            "bind" => Ok(Self::Bind),
            "describe" => Ok(Self::Describe),
            "sync" => Ok(Self::Sync),
            "get_attr" => Ok(Self::GetAttr),
            "set_attr" => Ok(Self::SetAttr),
            "ioctl" => Ok(Self::Ioctl),
            "unlink" => Ok(Self::Unlink),
            "read_dirents" => Ok(Self::ReadDirents),
            "rewind" => Ok(Self::Rewind),
            "get_token" => Ok(Self::GetToken),
            "rename" => Ok(Self::Rename),
            "link" => Ok(Self::Link),
            "watch" => Ok(Self::Watch),
            _ => Err(WireError::malformed(format!("unknown verb: {value}"))),
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Clone => "clone",
            Self::Close => "close",
            Self::ListInterfaces => "list_interfaces",
            Self::Bind => "bind",
            Self::Describe => "describe",
            Self::Sync => "sync",
            Self::GetAttr => "get_attr",
            Self::SetAttr => "set_attr",
            Self::Ioctl => "ioctl",
            Self::Unlink => "unlink",
            Self::Rewind => "rewind",
            Self::ReadDirents => "read_dirents",
            Self::GetToken => "get_token",
            Self::Rename => "rename",
            Self::Link => "link",
            Self::Watch => "watch",
        }
    }
}

impl fmt::Display for DirectoryVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
