pub mod handshake_tests;

use std::sync::Arc;

use draw2p_core::TransportEncoding;
use draw2p_peer::{Session, SessionConfig, TransportConfig};
use tracing::Level;

use crate::utils::{LinkScript, RecordingObserver, ScriptedLinkFactory};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A session driven by scripted links instead of a real peer connection.
pub async fn create_scripted_session(
    script: LinkScript,
) -> (Session, ScriptedLinkFactory, RecordingObserver) {
    let factory = ScriptedLinkFactory::new(script);
    let observer = RecordingObserver::new();

    let session = Session::start(
        SessionConfig::default(),
        Arc::new(factory.clone()),
        Arc::new(observer.clone()),
    )
    .await
    .expect("Failed to start scripted session");

    (session, factory, observer)
}

/// A session on the webrtc backend with host candidates only.
pub async fn create_rtc_session(encoding: TransportEncoding) -> (Session, RecordingObserver) {
    let observer = RecordingObserver::new();
    let config = SessionConfig {
        transport: TransportConfig::local(),
        encoding,
        ..SessionConfig::default()
    };

    let session = Session::with_webrtc(config, Arc::new(observer.clone()))
        .await
        .expect("Failed to start webrtc session");

    (session, observer)
}
