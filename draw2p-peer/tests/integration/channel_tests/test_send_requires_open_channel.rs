use bytes::Bytes;
use draw2p_core::{SdpKind, Stage};

use super::open_scripted_channel;
use crate::integration::{create_scripted_session, init_tracing};
use crate::utils::{LinkScript, scripted_text};

#[tokio::test]
async fn test_send_before_open_is_dropped() {
    init_tracing();

    let (session, factory, _observer) = create_scripted_session(LinkScript::default()).await;
    let handle = factory.latest().await;

    assert!(!session.send_raw(Bytes::from_static(b"draw,red,1,0,0")).await);

    session
        .accept_offer(&scripted_text(SdpKind::Offer))
        .await
        .expect("Failed to accept offer");
    assert!(!session.send_stroke("#000000", 3.0, &[0.0, 0.0, 1.0, 1.0]).await);

    assert!(handle.sent().await.is_empty());

    // Cleanup
    session.shutdown().await;
}

#[tokio::test]
async fn test_send_after_close_is_dropped() {
    init_tracing();

    let (session, handle, observer) = open_scripted_channel().await;
    assert!(session.send_raw(Bytes::from_static(b"draw,red,1,0,0")).await);

    handle.close_channel().await;
    assert!(observer.wait_for_stage(Stage::Closed, 2000).await);

    assert!(!session.send_raw(Bytes::from_static(b"draw,red,1,5,5")).await);
    assert_eq!(handle.sent().await.len(), 1);

    // A late open event cannot revive a closed channel.
    handle.open_channel().await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(session.status().await.unwrap().stage(), Stage::Closed);

    // Cleanup
    session.shutdown().await;
}
