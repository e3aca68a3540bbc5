use crate::error::SessionError;
use crate::session::session_command::{Reply, SessionCommand};
use crate::session::{SessionConfig, SessionObserver};
use crate::transport::{LinkFactory, PeerLink, TransportEvent};
use bytes::Bytes;
use draw2p_core::codec::{self, Decoded};
use draw2p_core::{ConnectionId, ConnectionStatus, HandshakePhase, SdpKind, SignalingDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Offerer,
    Answerer,
}

/// An offer or answer waiting for candidate gathering to finish.
struct PendingHandshake {
    kind: SdpKind,
    reply: Reply<Result<String, SessionError>>,
}

/// Everything tied to one peer-connection instance. Replaced wholesale on
/// reset.
struct Connection {
    id: ConnectionId,
    link: Option<Box<dyn PeerLink>>,
    status: ConnectionStatus,
    role: Option<Role>,
    has_channel: bool,
    pending: Option<PendingHandshake>,
    failed: bool,
}

impl Connection {
    fn new(id: ConnectionId, link: Option<Box<dyn PeerLink>>) -> Self {
        let failed = link.is_none();
        Self {
            id,
            link,
            status: ConnectionStatus::INIT,
            role: None,
            has_channel: false,
            pending: None,
            failed,
        }
    }
}

pub(crate) struct SessionLoop {
    config: SessionConfig,
    factory: Arc<dyn LinkFactory>,
    observer: Arc<dyn SessionObserver>,
    command_rx: mpsc::Receiver<SessionCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    connection: Connection,
}

impl SessionLoop {
    /// Allocates the first connection. Fails if the backend cannot create it.
    pub(crate) async fn new(
        config: SessionConfig,
        factory: Arc<dyn LinkFactory>,
        observer: Arc<dyn SessionObserver>,
        command_rx: mpsc::Receiver<SessionCommand>,
    ) -> Result<Self, SessionError> {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        let id = ConnectionId::new();
        let link = factory
            .connect(id, &config.transport, transport_tx.clone())
            .await
            .map_err(SessionError::Negotiation)?;

        Ok(Self {
            config,
            factory,
            observer,
            command_rx,
            transport_rx,
            transport_tx,
            connection: Connection::new(id, Some(link)),
        })
    }

    pub(crate) async fn run(mut self) {
        info!("Session loop started (connection {})", self.connection.id);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SessionCommand::Shutdown) | None => {
                            info!("Shutting down session.");
                            break;
                        }
                        Some(c) => self.handle_command(c).await,
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(e) => self.handle_transport_event(e).await,
                        None => {
                            warn!("Transport channel closed unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        self.close_connection(SessionError::Closed).await;
        info!("Session loop finished");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::GenerateOffer { reply } => self.generate_offer(reply).await,
            SessionCommand::AcceptOffer { text, reply } => self.accept_offer(text, reply).await,
            SessionCommand::AcceptAnswer { text, reply } => {
                let _ = reply.send(self.accept_answer(&text).await);
            }
            SessionCommand::SendRaw { data, reply } => {
                let _ = reply.send(self.send_raw(data).await);
            }
            SessionCommand::Status { reply } => {
                let _ = reply.send(self.connection.status);
            }
            SessionCommand::Reset { reply } => {
                let _ = reply.send(self.reset().await);
            }
            SessionCommand::Shutdown => {}
        }
    }

    /// Shared guard for the two operations that start a handshake.
    /// Re-entrant calls are rejected, never queued.
    fn check_can_start(&self, op: &'static str) -> Result<&dyn PeerLink, SessionError> {
        let conn = &self.connection;
        if conn.failed {
            return Err(SessionError::NeedsReset);
        }
        if conn.pending.is_some() {
            return Err(SessionError::Busy);
        }
        if conn.role.is_some() || conn.has_channel || conn.status.handshake != HandshakePhase::Init
        {
            return Err(SessionError::InvalidState {
                op,
                status: conn.status,
            });
        }
        conn.link.as_deref().ok_or(SessionError::NeedsReset)
    }

    async fn generate_offer(&mut self, reply: Reply<Result<String, SessionError>>) {
        let link = match self.check_can_start("generate_offer") {
            Ok(link) => link,
            Err(e) => {
                warn!("generate_offer rejected: {}", e);
                let _ = reply.send(Err(e));
                return;
            }
        };

        info!("Generating offer on connection {}", self.connection.id);

        let offered = match link.open_data_channel(&self.config.channel_label).await {
            Ok(()) => link.create_offer().await,
            Err(e) => Err(e),
        };

        match offered {
            Ok(()) => {
                self.connection.has_channel = true;
                self.connection.role = Some(Role::Offerer);
                self.connection.pending = Some(PendingHandshake {
                    kind: SdpKind::Offer,
                    reply,
                });
            }
            Err(e) => {
                let _ = reply.send(Err(self.negotiation_failed(e)));
            }
        }
    }

    async fn accept_offer(&mut self, text: String, reply: Reply<Result<String, SessionError>>) {
        let link = match self.check_can_start("accept_offer") {
            Ok(link) => link,
            Err(e) => {
                warn!("accept_offer rejected: {}", e);
                let _ = reply.send(Err(e));
                return;
            }
        };

        let offer = match SignalingDescription::from_transport_text(SdpKind::Offer, &text) {
            Ok(offer) => offer,
            Err(e) => {
                warn!("Rejected pasted offer: {}", e);
                let _ = reply.send(Err(e.into()));
                return;
            }
        };

        info!("Accepting offer on connection {}", self.connection.id);

        if let Err(e) = link
            .set_remote_description(SdpKind::Offer, offer.payload())
            .await
        {
            let _ = reply.send(Err(self.negotiation_failed(e)));
            return;
        }
        self.connection.role = Some(Role::Answerer);
        self.advance(HandshakePhase::Offered).await;

        let Some(link) = self.connection.link.as_deref() else {
            let _ = reply.send(Err(SessionError::NeedsReset));
            return;
        };
        if let Err(e) = link.create_answer().await {
            let _ = reply.send(Err(self.negotiation_failed(e)));
            return;
        }
        self.advance(HandshakePhase::Answered).await;

        self.connection.pending = Some(PendingHandshake {
            kind: SdpKind::Answer,
            reply,
        });
    }

    async fn accept_answer(&mut self, text: &str) -> Result<(), SessionError> {
        let conn = &self.connection;
        if conn.failed {
            return Err(SessionError::NeedsReset);
        }
        if conn.pending.is_some() {
            return Err(SessionError::Busy);
        }
        if conn.role != Some(Role::Offerer) || conn.status.handshake != HandshakePhase::Offered {
            return Err(SessionError::InvalidState {
                op: "accept_answer",
                status: conn.status,
            });
        }
        let link = conn.link.as_deref().ok_or(SessionError::NeedsReset)?;

        let answer = SignalingDescription::from_transport_text(SdpKind::Answer, text)?;

        info!("Applying answer on connection {}", conn.id);
        if let Err(e) = link
            .set_remote_description(SdpKind::Answer, answer.payload())
            .await
        {
            return Err(self.negotiation_failed(e));
        }

        self.advance(HandshakePhase::Answered).await;
        Ok(())
    }

    async fn send_raw(&self, data: Bytes) -> bool {
        let conn = &self.connection;
        if !conn.status.is_open() {
            debug!("Dropping outbound message: channel is {}", conn.status);
            return false;
        }
        let Some(link) = conn.link.as_deref() else {
            return false;
        };

        match link.send(data).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send on connection {}: {:#}", conn.id, e);
                false
            }
        }
    }

    async fn reset(&mut self) -> Result<(), SessionError> {
        info!("Resetting connection {}", self.connection.id);
        self.close_connection(SessionError::Reset).await;

        let id = ConnectionId::new();
        let result = self
            .factory
            .connect(id, &self.config.transport, self.transport_tx.clone())
            .await;

        let outcome = match result {
            Ok(link) => {
                self.connection = Connection::new(id, Some(link));
                Ok(())
            }
            Err(e) => {
                error!("Failed to allocate connection {}: {:#}", id, e);
                self.connection = Connection::new(id, None);
                Err(SessionError::Negotiation(e))
            }
        };

        self.notify_status().await;
        outcome
    }

    /// Closes the current link and resolves a handshake still waiting on it
    /// with `abandoned`.
    async fn close_connection(&mut self, abandoned: SessionError) {
        if let Some(pending) = self.connection.pending.take() {
            let _ = pending.reply.send(Err(abandoned));
        }
        if let Some(link) = self.connection.link.take() {
            if let Err(e) = link.close().await {
                warn!("Failed to close connection {}: {:#}", self.connection.id, e);
            }
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        if event.connection_id() != self.connection.id {
            debug!("Ignoring event from discarded connection: {:?}", event);
            return;
        }

        match event {
            TransportEvent::GatheringComplete(_) => self.complete_handshake().await,

            TransportEvent::ChannelOpen(_) => {
                if self.connection.status.open_channel() {
                    self.notify_status().await;
                }
            }

            TransportEvent::ChannelClosed(_) => {
                if self.connection.status.close_channel() {
                    self.notify_status().await;
                }
            }

            TransportEvent::Message(_, data) => match codec::decode_bytes(&data) {
                Decoded::Draw(stroke) => self.observer.on_stroke(stroke).await,
                Decoded::Ignored(reason) => debug!("Dropped inbound message: {:?}", reason),
            },

            TransportEvent::Failed(_) => {
                warn!("Connection {} failed", self.connection.id);
                self.connection.failed = true;
                if self.connection.status.close_channel() {
                    self.notify_status().await;
                }
            }
        }
    }

    /// Hands the gathered local description to the caller waiting on it.
    async fn complete_handshake(&mut self) {
        let Some(pending) = self.connection.pending.take() else {
            debug!("Gathering finished with no handshake waiting");
            return;
        };

        let local = match self.connection.link.as_deref() {
            Some(link) => link.local_description().await,
            None => None,
        };
        let Some(sdp) = local else {
            let e = anyhow::anyhow!("no local {} after gathering", pending.kind);
            let _ = pending.reply.send(Err(self.negotiation_failed(e)));
            return;
        };

        let text = SignalingDescription::new(pending.kind, sdp, self.config.encoding)
            .to_transport_text();
        info!("Local {} ready ({} chars)", pending.kind, text.len());

        if pending.kind == SdpKind::Offer {
            self.advance(HandshakePhase::Offered).await;
        }
        let _ = pending.reply.send(Ok(text));
    }

    fn negotiation_failed(&mut self, e: anyhow::Error) -> SessionError {
        error!("Negotiation failed on connection {}: {:#}", self.connection.id, e);
        self.connection.failed = true;
        SessionError::Negotiation(e)
    }

    async fn advance(&mut self, phase: HandshakePhase) {
        if self.connection.status.advance(phase) {
            self.notify_status().await;
        }
    }

    async fn notify_status(&self) {
        let status = self.connection.status;
        info!("Connection {} status: {}", self.connection.id, status);
        self.observer.on_status_change(status).await;
    }
}
