use async_trait::async_trait;
use draw2p_core::{ConnectionStatus, Stage, Stroke};
use draw2p_peer::SessionObserver;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Event types that can be recorded by RecordingObserver.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Status(ConnectionStatus),
    Stroke(Stroke),
}

/// A SessionObserver that records every callback.
#[derive(Clone)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn get_events(&self) -> Vec<ObservedEvent> {
        self.events.lock().await.clone()
    }

    /// Stages of all status notifications, in order.
    pub async fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ObservedEvent::Status(status) => Some(status.stage()),
                _ => None,
            })
            .collect()
    }

    pub async fn strokes(&self) -> Vec<Stroke> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ObservedEvent::Stroke(stroke) => Some(stroke.clone()),
                _ => None,
            })
            .collect()
    }

    /// Wait until a status with the given stage was reported.
    pub async fn wait_for_stage(&self, stage: Stage, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.stages().await.contains(&stage) {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    /// Wait until at least `count` strokes were received.
    pub async fn wait_for_strokes(&self, count: usize, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.strokes().await.len() >= count {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

impl Default for RecordingObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionObserver for RecordingObserver {
    async fn on_status_change(&self, status: ConnectionStatus) {
        tracing::info!("[RecordingObserver] status: {}", status);
        self.events.lock().await.push(ObservedEvent::Status(status));
    }

    async fn on_stroke(&self, stroke: Stroke) {
        tracing::info!(
            "[RecordingObserver] stroke: {} points in {}",
            stroke.points.len(),
            stroke.color
        );
        self.events.lock().await.push(ObservedEvent::Stroke(stroke));
    }
}
