use std::time::Duration;

use draw2p_core::Stage;
use draw2p_peer::SessionError;

use crate::integration::{create_scripted_session, init_tracing};
use crate::utils::{LinkScript, wait_for_channels};

#[tokio::test]
async fn test_reset_abandons_pending_handshake() {
    init_tracing();

    let script = LinkScript {
        auto_gather: false,
        ..LinkScript::default()
    };
    let (session, factory, _observer) = create_scripted_session(script).await;
    let old = factory.latest().await;

    let pending = tokio::spawn({
        let session = session.clone();
        async move { session.generate_offer().await }
    });
    assert!(wait_for_channels(&old, 1, 2000).await);

    session.reset().await.expect("Failed to reset");

    let abandoned = pending.await.unwrap();
    assert!(matches!(abandoned, Err(SessionError::Reset)), "got {abandoned:?}");
    assert!(old.is_closed());

    // Late events from the discarded connection change nothing.
    old.finish_gathering().await;
    old.open_channel().await;
    old.deliver("draw,#000000,2,0,0,5,5").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(session.status().await.unwrap().stage(), Stage::Init);

    // The fresh connection negotiates from scratch.
    let fresh = factory.latest().await;
    assert_ne!(fresh.id, old.id);
    let offer = tokio::spawn({
        let session = session.clone();
        async move { session.generate_offer().await }
    });
    assert!(wait_for_channels(&fresh, 1, 2000).await);
    fresh.finish_gathering().await;
    assert!(offer.await.unwrap().is_ok());

    // Cleanup
    session.shutdown().await;
}

#[tokio::test]
async fn test_operations_after_shutdown_report_closed() {
    init_tracing();

    let (session, _factory, _observer) = create_scripted_session(LinkScript::default()).await;
    session.shutdown().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(matches!(session.status().await, Err(SessionError::Closed)));
    assert!(matches!(session.generate_offer().await, Err(SessionError::Closed)));
    assert!(!session.send_raw("draw,red,1,0,0".into()).await);
}

#[tokio::test]
async fn test_shutdown_closes_pending_handshake() {
    init_tracing();

    let script = LinkScript {
        auto_gather: false,
        ..LinkScript::default()
    };
    let (session, factory, _observer) = create_scripted_session(script).await;
    let handle = factory.latest().await;

    let pending = tokio::spawn({
        let session = session.clone();
        async move { session.generate_offer().await }
    });
    assert!(wait_for_channels(&handle, 1, 2000).await);

    session.shutdown().await;

    let abandoned = pending.await.unwrap();
    assert!(matches!(abandoned, Err(SessionError::Closed)), "got {abandoned:?}");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.is_closed());
}
