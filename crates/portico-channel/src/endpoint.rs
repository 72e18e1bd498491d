//! Bidirectional endpoint pairs built on standard library channels.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::ChannelError;
use crate::frame::Frame;

/// An out-of-band signal raised on the peer side of an endpoint.
///
/// Signals travel independently of frames and are consumed in raise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal(u32);

impl Signal {
    /// Raised once on a freshly served connection to announce readiness.
    pub const READY: Self = Self(1);

    /// Returns the raw signal bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// One half of a bidirectional in-process channel.
///
/// Endpoints are created only in pairs via [`Endpoint::pair`]. Each half
/// sends frames and signals to the other. An endpoint is an affine value:
/// transferring it inside a [`Frame`] or handing it to a registry consumes
/// it, and [`Endpoint::close`] terminates the channel explicitly.
#[derive(Debug)]
pub struct Endpoint {
    frames_tx: Sender<Frame>,
    frames_rx: Receiver<Frame>,
    signals_tx: Sender<Signal>,
    signals_rx: Receiver<Signal>,
}

impl Endpoint {
    /// Creates a connected endpoint pair.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let (left_frames_tx, right_frames_rx) = mpsc::channel();
        let (right_frames_tx, left_frames_rx) = mpsc::channel();
        let (left_signals_tx, right_signals_rx) = mpsc::channel();
        let (right_signals_tx, left_signals_rx) = mpsc::channel();
        let left = Self {
            frames_tx: left_frames_tx,
            frames_rx: left_frames_rx,
            signals_tx: left_signals_tx,
            signals_rx: left_signals_rx,
        };
        let right = Self {
            frames_tx: right_frames_tx,
            frames_rx: right_frames_rx,
            signals_tx: right_signals_tx,
            signals_rx: right_signals_rx,
        };
        (left, right)
    }

    /// Sends a frame to the peer.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] if the peer has been closed.
    pub fn send(&self, frame: Frame) -> Result<(), ChannelError> {
        self.frames_tx
            .send(frame)
            .map_err(|_| ChannelError::Disconnected)
    }

    /// Receives the next frame, blocking until one arrives.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] once the peer is closed and
    /// the queue has drained.
    pub fn recv(&self) -> Result<Frame, ChannelError> {
        self.frames_rx.recv().map_err(|_| ChannelError::Disconnected)
    }

    /// Receives the next frame without blocking.
    ///
    /// Returns `Ok(None)` when the queue is empty but the peer is still
    /// open, which is how callers distinguish a quiet connection from a
    /// closed one.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] once the peer is closed and
    /// the queue has drained.
    pub fn try_recv(&self) -> Result<Option<Frame>, ChannelError> {
        match self.frames_rx.try_recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelError::Disconnected),
        }
    }

    /// Raises a signal observable on the peer endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] if the peer has been closed.
    pub fn signal_peer(&self, signal: Signal) -> Result<(), ChannelError> {
        self.signals_tx
            .send(signal)
            .map_err(|_| ChannelError::Disconnected)
    }

    /// Receives the next signal, blocking until one arrives.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] once the peer is closed and
    /// no signals remain.
    pub fn recv_signal(&self) -> Result<Signal, ChannelError> {
        self.signals_rx
            .recv()
            .map_err(|_| ChannelError::Disconnected)
    }

    /// Receives the next signal without blocking.
    ///
    /// Returns `Ok(None)` when no signal is pending but the peer remains
    /// open.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] once the peer is closed and
    /// no signals remain.
    pub fn try_recv_signal(&self) -> Result<Option<Signal>, ChannelError> {
        match self.signals_rx.try_recv() {
            Ok(signal) => Ok(Some(signal)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelError::Disconnected),
        }
    }

    /// Returns a cloneable sender for this endpoint's outbound frames.
    ///
    /// The sender can outlive the endpoint itself, which allows an
    /// acknowledgment to be delivered on a connection whose endpoint has
    /// already been transferred elsewhere. While any sender remains alive
    /// the peer will not observe a disconnection.
    #[must_use]
    pub fn sender(&self) -> FrameSender {
        FrameSender {
            tx: self.frames_tx.clone(),
        }
    }

    /// Returns a cloneable handle for raising signals on the peer.
    #[must_use]
    pub fn signaler(&self) -> PeerSignaler {
        PeerSignaler {
            tx: self.signals_tx.clone(),
        }
    }

    /// Closes the endpoint, consuming it.
    ///
    /// The peer subsequently observes [`ChannelError::Disconnected`] once
    /// any queued frames have drained. Dropping an endpoint has the same
    /// effect; this method exists so terminal dispositions read explicitly
    /// at call sites.
    pub fn close(self) {}
}

/// Cloneable sender detached from an [`Endpoint`].
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: Sender<Frame>,
}

impl FrameSender {
    /// Sends a frame to the peer of the originating endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] if the peer has been closed.
    pub fn send(&self, frame: Frame) -> Result<(), ChannelError> {
        self.tx.send(frame).map_err(|_| ChannelError::Disconnected)
    }
}

/// Cloneable signal handle detached from an [`Endpoint`].
#[derive(Debug, Clone)]
pub struct PeerSignaler {
    tx: Sender<Signal>,
}

impl PeerSignaler {
    /// Raises a signal on the peer of the originating endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Disconnected`] if the peer has been closed.
    pub fn raise(&self, signal: Signal) -> Result<(), ChannelError> {
        self.tx.send(signal).map_err(|_| ChannelError::Disconnected)
    }
}
