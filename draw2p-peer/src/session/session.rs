use crate::error::SessionError;
use crate::session::session_command::SessionCommand;
use crate::session::session_loop::SessionLoop;
use crate::session::{SessionConfig, SessionObserver};
use crate::transport::{LinkFactory, RtcLinkFactory};
use bytes::Bytes;
use draw2p_core::codec;
use draw2p_core::{ConnectionStatus, Stroke};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// Handle to a running session. Cheap to clone; every clone talks to the
/// same loop.
///
/// `generate_offer` and `accept_offer` resolve only after candidate
/// gathering completes, possibly many loop turns after the call.
#[derive(Clone)]
pub struct Session {
    command_tx: mpsc::Sender<SessionCommand>,
}

impl Session {
    /// Allocates the first connection and spawns the session loop.
    pub async fn start(
        config: SessionConfig,
        factory: Arc<dyn LinkFactory>,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        let (command_tx, command_rx) = mpsc::channel(100);
        let session_loop = SessionLoop::new(config, factory, observer, command_rx).await?;
        tokio::spawn(session_loop.run());
        Ok(Self { command_tx })
    }

    /// [`Session::start`] on the `webrtc` backend.
    pub async fn with_webrtc(
        config: SessionConfig,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        Self::start(config, Arc::new(RtcLinkFactory), observer).await
    }

    pub async fn generate_offer(&self) -> Result<String, SessionError> {
        self.request(|reply| SessionCommand::GenerateOffer { reply })
            .await?
    }

    pub async fn accept_offer(&self, text: &str) -> Result<String, SessionError> {
        let text = text.to_owned();
        self.request(|reply| SessionCommand::AcceptOffer { text, reply })
            .await?
    }

    pub async fn accept_answer(&self, text: &str) -> Result<(), SessionError> {
        let text = text.to_owned();
        self.request(|reply| SessionCommand::AcceptAnswer { text, reply })
            .await?
    }

    /// Sends one message if the channel is open. Never fails: returns
    /// `false` when the message could not be handed to the channel.
    pub async fn send_raw(&self, data: Bytes) -> bool {
        self.request(|reply| SessionCommand::SendRaw { data, reply })
            .await
            .unwrap_or(false)
    }

    /// Encodes a stroke given as flattened coordinates and sends it.
    pub async fn send_stroke(&self, color: &str, width: f64, points: &[f64]) -> bool {
        match codec::encode_parts(color, width, points) {
            Ok(message) => self.send_raw(Bytes::from(message)).await,
            Err(e) => {
                warn!("Not sending stroke: {}", e);
                false
            }
        }
    }

    pub async fn send(&self, stroke: &Stroke) -> bool {
        self.send_stroke(&stroke.color, stroke.width, &stroke.flat_coords())
            .await
    }

    pub async fn status(&self) -> Result<ConnectionStatus, SessionError> {
        self.request(|reply| SessionCommand::Status { reply }).await
    }

    /// Discards the current connection (abandoning any pending handshake)
    /// and allocates a fresh one in `INIT`.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Reset { reply })
            .await?
    }

    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(SessionCommand::Shutdown).await;
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }
}
