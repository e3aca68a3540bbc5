use anyhow::{Context, Result};
use std::time::Duration;

use draw2p_peer::Session;

/// Timeout for a single offer/answer step (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 10000;

/// Timeout for the data channel to open after the answer is applied (ms).
pub const DATA_CHANNEL_TIMEOUT_MS: u64 = 10000;

/// Timeout for a stroke to arrive on the remote side (ms).
pub const STROKE_TIMEOUT_MS: u64 = 5000;

/// Runs the manual copy-paste exchange between two sessions: the offer text
/// is "pasted" into the answerer and the answer text back into the offerer.
pub async fn perform_handshake(offerer: &Session, answerer: &Session) -> Result<()> {
    let step = Duration::from_millis(SIGNAL_TIMEOUT_MS);

    let offer = tokio::time::timeout(step, offerer.generate_offer())
        .await
        .context("Timeout generating offer")?
        .context("Failed to generate offer")?;
    tracing::debug!("[SignalHelper] Offer ready ({} chars)", offer.len());

    let answer = tokio::time::timeout(step, answerer.accept_offer(&offer))
        .await
        .context("Timeout accepting offer")?
        .context("Failed to accept offer")?;
    tracing::debug!("[SignalHelper] Answer ready ({} chars)", answer.len());

    offerer
        .accept_answer(&answer)
        .await
        .context("Failed to accept answer")?;
    tracing::debug!("[SignalHelper] Answer applied");

    Ok(())
}
