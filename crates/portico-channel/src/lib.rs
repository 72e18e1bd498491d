//! In-process message channels with ownership-transfer semantics.
//!
//! This crate provides the endpoint abstraction used by the Portico service
//! namespace. An [`Endpoint`] is one half of a bidirectional channel created
//! with [`Endpoint::pair`]. Endpoints carry [`Frame`]s (a byte payload plus
//! zero or more transferred endpoints) and support a one-way out-of-band
//! [`Signal`] primitive for readiness handshakes.
//!
//! Ownership transfer is modelled directly in the type system: moving an
//! endpoint into a frame (or into a registry) makes it unusable by the
//! sender, and [`Endpoint::close`] consumes the endpoint outright. The peer
//! observes the close as a disconnection, which [`Endpoint::try_recv`]
//! distinguishes from an empty queue so callers can tell "still open" apart
//! from "gone".

mod endpoint;
mod error;
mod frame;

pub use endpoint::{Endpoint, FrameSender, PeerSignaler, Signal};
pub use error::ChannelError;
pub use frame::Frame;
