use draw2p_core::{ConnectionStatus, SignalingError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Pasted text could not be decoded. Nothing changed.
    #[error(transparent)]
    InvalidSignalingText(#[from] SignalingError),

    /// The transport rejected a step of the handshake. The connection must
    /// be reset before negotiating again.
    #[error("negotiation failed: {0:#}")]
    Negotiation(anyhow::Error),

    /// Another offer or answer is still being produced.
    #[error("a handshake is already in progress")]
    Busy,

    #[error("{op} is not allowed while the connection is {status}")]
    InvalidState {
        op: &'static str,
        status: ConnectionStatus,
    },

    #[error("the connection failed; reset it before negotiating again")]
    NeedsReset,

    /// The pending handshake was abandoned by a reset.
    #[error("handshake abandoned by reset")]
    Reset,

    /// The session loop is gone, or shut down while the call was pending.
    #[error("session is closed")]
    Closed,
}
