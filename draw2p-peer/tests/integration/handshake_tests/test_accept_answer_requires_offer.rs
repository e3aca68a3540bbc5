use draw2p_core::{SdpKind, Stage};
use draw2p_peer::SessionError;

use crate::integration::{create_scripted_session, init_tracing};
use crate::utils::{LinkScript, scripted_text};

#[tokio::test]
async fn test_accept_answer_without_offer() {
    init_tracing();

    let (session, factory, _observer) = create_scripted_session(LinkScript::default()).await;

    let result = session.accept_answer(&scripted_text(SdpKind::Answer)).await;
    assert!(
        matches!(result, Err(SessionError::InvalidState { op: "accept_answer", .. })),
        "got {result:?}"
    );
    assert_eq!(session.status().await.unwrap().stage(), Stage::Init);
    assert!(factory.latest().await.remote_descriptions().await.is_empty());

    // Cleanup
    session.shutdown().await;
}

#[tokio::test]
async fn test_answerer_cannot_accept_answer() {
    init_tracing();

    let (session, _factory, _observer) = create_scripted_session(LinkScript::default()).await;
    session
        .accept_offer(&scripted_text(SdpKind::Offer))
        .await
        .expect("Failed to accept offer");

    let result = session.accept_answer(&scripted_text(SdpKind::Answer)).await;
    assert!(
        matches!(result, Err(SessionError::InvalidState { .. })),
        "got {result:?}"
    );

    // Cleanup
    session.shutdown().await;
}
