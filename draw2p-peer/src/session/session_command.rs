use crate::error::SessionError;
use bytes::Bytes;
use draw2p_core::ConnectionStatus;
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<T>;

/// Requests sent from [`Session`](crate::Session) handles to the session loop.
#[derive(Debug)]
pub(crate) enum SessionCommand {
    /// Offering side: create the channel and produce the offer text.
    GenerateOffer {
        reply: Reply<Result<String, SessionError>>,
    },

    /// Answering side: apply the pasted offer and produce the answer text.
    AcceptOffer {
        text: String,
        reply: Reply<Result<String, SessionError>>,
    },

    /// Offering side: apply the pasted answer.
    AcceptAnswer {
        text: String,
        reply: Reply<Result<(), SessionError>>,
    },

    /// Send one message on the data channel if it is open.
    SendRaw { data: Bytes, reply: Reply<bool> },

    Status { reply: Reply<ConnectionStatus> },

    /// Drop the current connection and start over from `INIT`.
    Reset {
        reply: Reply<Result<(), SessionError>>,
    },

    /// Close the connection and stop the loop.
    Shutdown,
}
