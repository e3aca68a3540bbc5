use bytes::Bytes;
use draw2p_core::ConnectionId;

/// Events the transport raises for the session loop. Each carries the id of
/// the connection that produced it so events from a discarded connection
/// can be told apart.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// Candidate gathering finished; the local description is complete.
    GatheringComplete(ConnectionId),

    /// The data channel is open and ready for sending.
    ChannelOpen(ConnectionId),

    /// The data channel closed.
    ChannelClosed(ConnectionId),

    /// A message arrived on the data channel.
    Message(ConnectionId, Bytes),

    /// The peer connection reached the failed state.
    Failed(ConnectionId),
}

impl TransportEvent {
    pub fn connection_id(&self) -> ConnectionId {
        match self {
            TransportEvent::GatheringComplete(id)
            | TransportEvent::ChannelOpen(id)
            | TransportEvent::ChannelClosed(id)
            | TransportEvent::Message(id, _)
            | TransportEvent::Failed(id) => *id,
        }
    }
}
