use crate::transport::{TransportConfig, TransportEvent};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use draw2p_core::{ConnectionId, SdpKind};
use tokio::sync::mpsc;

/// One native peer connection with at most one data channel.
///
/// Completion of asynchronous work (gathering, channel open/close, inbound
/// messages) is reported through the event sender given to
/// [`LinkFactory::connect`], never through these return values.
#[async_trait]
pub trait PeerLink: Send + Sync {
    /// Creates the data channel on the offering side and wires its handlers.
    async fn open_data_channel(&self, label: &str) -> Result<()>;

    /// Creates an offer and applies it as the local description.
    /// Candidate gathering starts here.
    async fn create_offer(&self) -> Result<()>;

    /// Creates an answer and applies it as the local description.
    async fn create_answer(&self) -> Result<()>;

    async fn set_remote_description(&self, kind: SdpKind, sdp: &str) -> Result<()>;

    /// Current local description including the candidates gathered so far.
    async fn local_description(&self) -> Option<String>;

    async fn send(&self, data: Bytes) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Allocates peer connections. Injected into the session so the state
/// machine runs against any backend.
#[async_trait]
pub trait LinkFactory: Send + Sync {
    async fn connect(
        &self,
        id: ConnectionId,
        config: &TransportConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerLink>>;
}
