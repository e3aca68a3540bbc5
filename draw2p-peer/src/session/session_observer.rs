use async_trait::async_trait;
use draw2p_core::{ConnectionStatus, Stroke};

/// Callbacks from the session loop to the collaborator (UI).
///
/// Called from inside the loop: implementations must not await calls on
/// the same [`Session`](crate::Session), spawn a task for that instead.
#[async_trait]
pub trait SessionObserver: Send + Sync + 'static {
    async fn on_status_change(&self, status: ConnectionStatus);

    /// A remote stroke was fully decoded.
    async fn on_stroke(&self, stroke: Stroke);
}
