//! Wire types for the Portico directory protocol.
//!
//! This crate defines the serialized surface of the service-namespace
//! directory protocol: the verb set, status codes, open flags, node
//! descriptors, the on-open acknowledgment event, and the JSONL request and
//! response bodies exchanged over endpoint frames.
//!
//! ## Framing
//!
//! Every protocol message is a single JSONL line. Requests are encoded as a
//! [`RequestBody`] tagged by verb; endpoint-carrying verbs (`open`, `clone`,
//! `watch`) travel with their endpoints attached out-of-band to the same
//! frame, and [`RequestBody::expected_channels`] states how many attachments
//! each verb requires. Responses are [`ResponseFrame`] values tagged by
//! shape, and the out-of-band acknowledgment for `open`/`clone` is a
//! [`NodeEvent`].

mod error;
mod event;
mod flags;
mod frames;
mod node;
mod status;
mod verb;

pub use error::WireError;
pub use event::NodeEvent;
pub use flags::OpenFlags;
pub use frames::{RequestBody, ResponseFrame};
pub use node::{NodeAttributes, NodeInfo, ObjectKind};
pub use status::Status;
pub use verb::DirectoryVerb;
