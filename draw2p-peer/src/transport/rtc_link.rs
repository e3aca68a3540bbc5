use crate::transport::{LinkFactory, PeerLink, TransportConfig, TransportEvent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use draw2p_core::{ConnectionId, IceServerConfig, SdpKind};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::ice_transport::ice_candidate::RTCIceCandidate;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

type ChannelSlot = Arc<Mutex<Option<Arc<RTCDataChannel>>>>;

/// [`PeerLink`] backed by the `webrtc` crate.
pub struct RtcLink {
    id: ConnectionId,
    peer_connection: Arc<RTCPeerConnection>,
    data_channel: ChannelSlot,
    event_tx: mpsc::Sender<TransportEvent>,
}

impl RtcLink {
    /// Builds the peer connection and registers its callbacks. Everything the
    /// callbacks observe is forwarded to `event_tx`.
    pub async fn new(
        id: ConnectionId,
        config: &TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        // Codecs are registered even though only a data channel is used.
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config.ice_servers.iter().map(rtc_ice_server).collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );
        let data_channel: ChannelSlot = Arc::new(Mutex::new(None));

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Peer connection {} state changed: {:?}", id, s);
                    if s == RTCPeerConnectionState::Failed {
                        let _ = tx.send(TransportEvent::Failed(id)).await;
                    }
                })
            },
        ));

        // No trickle ICE: only the terminal empty candidate matters.
        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                match c {
                    Some(candidate) => {
                        debug!("Connection {} gathered candidate {}", id, candidate.address);
                    }
                    None => {
                        debug!("Connection {} finished gathering", id);
                        let _ = tx.send(TransportEvent::GatheringComplete(id)).await;
                    }
                }
            })
        }));

        // Answering side: the channel is created by the remote peer.
        let dc_tx = event_tx.clone();
        let dc_slot = Arc::clone(&data_channel);
        peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let tx = dc_tx.clone();
            let slot = Arc::clone(&dc_slot);

            Box::pin(async move {
                debug!("Remote data channel '{}' on connection {}", dc.label(), id);
                attach_channel(id, dc, tx, slot).await;
            })
        }));

        Ok(Self {
            id,
            peer_connection,
            data_channel,
            event_tx,
        })
    }
}

#[async_trait]
impl PeerLink for RtcLink {
    async fn open_data_channel(&self, label: &str) -> Result<()> {
        let dc = self
            .peer_connection
            .create_data_channel(label, None)
            .await
            .context("Failed to create data channel")?;

        attach_channel(
            self.id,
            dc,
            self.event_tx.clone(),
            Arc::clone(&self.data_channel),
        )
        .await;
        Ok(())
    }

    async fn create_offer(&self) -> Result<()> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .context("Failed to create offer")?;
        self.peer_connection
            .set_local_description(offer)
            .await
            .context("Failed to set local offer")?;
        Ok(())
    }

    async fn create_answer(&self) -> Result<()> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .context("Failed to create answer")?;
        self.peer_connection
            .set_local_description(answer)
            .await
            .context("Failed to set local answer")?;
        Ok(())
    }

    async fn set_remote_description(&self, kind: SdpKind, sdp: &str) -> Result<()> {
        let desc = match kind {
            SdpKind::Offer => RTCSessionDescription::offer(sdp.to_owned())?,
            SdpKind::Answer => RTCSessionDescription::answer(sdp.to_owned())?,
        };
        self.peer_connection
            .set_remote_description(desc)
            .await
            .with_context(|| format!("Failed to apply remote {kind}"))?;
        Ok(())
    }

    async fn local_description(&self) -> Option<String> {
        self.peer_connection
            .local_description()
            .await
            .map(|desc| desc.sdp)
    }

    async fn send(&self, data: Bytes) -> Result<()> {
        let dc = self
            .data_channel
            .lock()
            .await
            .clone()
            .context("Data channel not available")?;

        // Text frames, so browser peers receive strings.
        match std::str::from_utf8(&data) {
            Ok(text) => dc.send_text(text.to_owned()).await,
            Err(_) => dc.send(&data).await,
        }
        .context("Failed to send on data channel")?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection
            .close()
            .await
            .context("Failed to close peer connection")?;
        Ok(())
    }
}

/// Creates [`RtcLink`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtcLinkFactory;

#[async_trait]
impl LinkFactory for RtcLinkFactory {
    async fn connect(
        &self,
        id: ConnectionId,
        config: &TransportConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerLink>> {
        Ok(Box::new(RtcLink::new(id, config, events).await?))
    }
}

fn rtc_ice_server(server: &IceServerConfig) -> RTCIceServer {
    RTCIceServer {
        urls: server.urls.clone(),
        username: server.username.clone().unwrap_or_default(),
        credential: server.credential.clone().unwrap_or_default(),
        ..Default::default()
    }
}

async fn attach_channel(
    id: ConnectionId,
    dc: Arc<RTCDataChannel>,
    event_tx: mpsc::Sender<TransportEvent>,
    slot: ChannelSlot,
) {
    let open_tx = event_tx.clone();
    dc.on_open(Box::new(move || {
        let tx = open_tx.clone();
        Box::pin(async move {
            info!("Data channel open on connection {}", id);
            let _ = tx.send(TransportEvent::ChannelOpen(id)).await;
        })
    }));

    let close_tx = event_tx.clone();
    dc.on_close(Box::new(move || {
        let tx = close_tx.clone();
        Box::pin(async move {
            info!("Data channel closed on connection {}", id);
            let _ = tx.send(TransportEvent::ChannelClosed(id)).await;
        })
    }));

    dc.on_message(Box::new(move |msg: DataChannelMessage| {
        let tx = event_tx.clone();
        Box::pin(async move {
            let _ = tx.send(TransportEvent::Message(id, msg.data)).await;
        })
    }));

    let mut current = slot.lock().await;
    if current.is_some() {
        warn!("Connection {} replaced its data channel", id);
    }
    *current = Some(dc);
}
