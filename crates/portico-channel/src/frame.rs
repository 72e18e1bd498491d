//! Message frames carried between endpoint pairs.

use crate::endpoint::Endpoint;

/// A single message travelling between two endpoints.
///
/// A frame couples an opaque byte payload with the endpoints transferred
/// alongside it. Attaching an endpoint moves it into the frame: the sender
/// relinquishes ownership and the receiver becomes responsible for the
/// endpoint's terminal disposition.
#[derive(Debug, Default)]
pub struct Frame {
    /// Opaque payload bytes.
    pub bytes: Vec<u8>,
    /// Endpoints transferred with this frame, in attachment order.
    pub channels: Vec<Endpoint>,
}

impl Frame {
    /// Builds a frame carrying only a byte payload.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            channels: Vec::new(),
        }
    }

    /// Attaches an endpoint to the frame, consuming it.
    #[must_use]
    pub fn with_channel(mut self, endpoint: Endpoint) -> Self {
        self.channels.push(endpoint);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_has_no_channels() {
        let frame = Frame::from_bytes(b"payload".to_vec());
        assert_eq!(frame.bytes, b"payload");
        assert!(frame.channels.is_empty());
    }

    #[test]
    fn with_channel_appends_in_order() {
        let (first, _peer_a) = Endpoint::pair();
        let (second, _peer_b) = Endpoint::pair();
        let frame = Frame::from_bytes(Vec::new())
            .with_channel(first)
            .with_channel(second);
        assert_eq!(frame.channels.len(), 2);
    }
}
