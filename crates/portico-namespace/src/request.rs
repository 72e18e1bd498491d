//! Typed directory requests joined with their transferred endpoints.

use portico_channel::{Endpoint, Frame};
use portico_wire::{DirectoryVerb, NodeAttributes, OpenFlags, RequestBody, WireError};

/// A decoded directory request.
///
/// Endpoint-carrying verbs hold the endpoint that travelled attached to the
/// request frame; ownership of that endpoint now rests with whoever handles
/// the request, and must be terminated exactly once.
#[derive(Debug)]
pub enum DirectoryRequest {
    /// Resolve `path` and connect `object`.
    Open {
        /// Open flags; only the describe bit is inspected.
        flags: OpenFlags,
        /// Requested path, a single opaque service name.
        path: String,
        /// Endpoint to connect on success or close on failure.
        object: Endpoint,
    },
    /// Serve the namespace on `object`.
    Clone {
        /// Open flags; only the describe bit is inspected.
        flags: OpenFlags,
        /// Endpoint the namespace is re-exposed through.
        object: Endpoint,
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
    /// Register `watcher` for directory changes.
    Watch {
        /// Event mask the watcher is interested in.
        mask: u32,
        /// Watch options.
        options: u32,
        /// Notification endpoint; closed because watching is unsupported.
        watcher: Endpoint,
    },
}

impl DirectoryRequest {
    /// Decodes a request from an inbound frame.
    ///
    /// The frame payload is parsed as a [`RequestBody`] and rejoined with
    /// the endpoints attached to the frame. The attachment count must match
    /// the verb exactly.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MalformedFrame`] for an unparseable payload and
    /// [`WireError::ChannelMismatch`] when the attachment count is wrong
    /// for the verb.
    pub fn decode(frame: Frame) -> Result<Self, WireError> {
        let Frame {
            bytes,
            mut channels,
        } = frame;
        let body = RequestBody::decode(&bytes)?;
        let verb = body.verb();
        let expected = RequestBody::expected_channels(verb);
        if channels.len() != expected {
            return Err(WireError::channel_mismatch(verb, expected, channels.len()));
        }
        let attached = channels.pop();
        Self::join(body, attached, verb)
    }

    /// Returns the verb named by this request.
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

    fn join(
        body: RequestBody,
        mut attached: Option<Endpoint>,
        verb: DirectoryVerb,
    ) -> Result<Self, WireError> {
        let mut take_endpoint =
            || attached.take().ok_or_else(|| WireError::channel_mismatch(verb, 1, 0));
        Ok(match body {
            RequestBody::Open { flags, path } => Self::Open {
                flags,
                path,
                object: take_endpoint()?,
            },
            RequestBody::Clone { flags } => Self::Clone {
                flags,
                object: take_endpoint()?,
            },
            RequestBody::Watch { mask, options } => Self::Watch {
                mask,
                options,
                watcher: take_endpoint()?,
            },
            RequestBody::Close => Self::Close,
            RequestBody::ListInterfaces => Self::ListInterfaces,
            RequestBody::Bind { interface } => Self::Bind { interface },
            RequestBody::Describe => Self::Describe,
            RequestBody::Sync => Self::Sync,
            RequestBody::GetAttr => Self::GetAttr,
            RequestBody::SetAttr { flags, attributes } => Self::SetAttr { flags, attributes },
            RequestBody::Ioctl {
                opcode,
                max_out,
                input,
            } => Self::Ioctl {
                opcode,
                max_out,
                input,
            },
            RequestBody::Unlink { path } => Self::Unlink { path },
            RequestBody::ReadDirents { max_bytes } => Self::ReadDirents { max_bytes },
            RequestBody::Rewind => Self::Rewind,
            RequestBody::GetToken => Self::GetToken,
            RequestBody::Rename { src, dst } => Self::Rename { src, dst },
            RequestBody::Link { src, dst } => Self::Link { src, dst },
        })
    }
}
