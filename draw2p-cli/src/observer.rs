use async_trait::async_trait;
use colored::*;
use draw2p_core::render::{PathOp, replay};
use draw2p_core::{ConnectionStatus, Stage, Stroke};
use draw2p_peer::SessionObserver;
use std::fmt::Write;
use tokio::sync::watch;

/// Prints status changes and remote strokes, and publishes the latest
/// status for the prompt loop.
pub struct TerminalObserver {
    status_tx: watch::Sender<ConnectionStatus>,
}

impl TerminalObserver {
    pub fn new() -> Self {
        let (status_tx, _) = watch::channel(ConnectionStatus::INIT);
        Self { status_tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_tx.subscribe()
    }
}

#[async_trait]
impl SessionObserver for TerminalObserver {
    async fn on_status_change(&self, status: ConnectionStatus) {
        let stage = match status.stage() {
            Stage::Opened => status.to_string().green().bold(),
            Stage::Closed => status.to_string().red().bold(),
            _ => status.to_string().yellow(),
        };
        println!("{} {}", "status:".dimmed(), stage);
        self.status_tx.send_replace(status);
    }

    async fn on_stroke(&self, stroke: Stroke) {
        if let Some(text) = describe(&stroke) {
            println!("{} {}", "remote:".magenta().bold(), text);
        }
    }
}

/// Renders a stroke onto a recording canvas and spells out the path.
pub fn describe(stroke: &Stroke) -> Option<String> {
    let mut ops: Vec<PathOp> = Vec::new();
    if !replay(stroke, &mut ops) {
        return None;
    }

    let mut out = String::new();
    for op in &ops {
        let _ = match op {
            PathOp::BeginPath => write!(out, "path"),
            PathOp::MoveTo(p) => write!(out, " M{},{}", p.x, p.y),
            PathOp::LineTo(p) => write!(out, " L{},{}", p.x, p.y),
            PathOp::Stroke { color, width } => write!(out, " stroke {color} {width}"),
        };
    }
    Some(out)
}
