use draw2p_core::{SdpKind, Stage};
use draw2p_peer::SessionError;

use crate::integration::{create_scripted_session, init_tracing};
use crate::utils::{LinkScript, scripted_text};

#[tokio::test]
async fn test_malformed_offer_is_rejected() {
    init_tracing();

    let (session, factory, observer) = create_scripted_session(LinkScript::default()).await;

    for text in ["", "   ", "%%% not base64 %%%", "aGVsbG8gd29ybGQ="] {
        let result = session.accept_offer(text).await;
        assert!(
            matches!(result, Err(SessionError::InvalidSignalingText(_))),
            "{text:?} gave {result:?}"
        );
    }

    assert_eq!(session.status().await.unwrap().stage(), Stage::Init);
    assert!(observer.stages().await.is_empty());
    assert!(factory.latest().await.remote_descriptions().await.is_empty());

    // Rejected text leaves the session usable.
    let answer = session.accept_offer(&scripted_text(SdpKind::Offer)).await;
    assert!(answer.is_ok(), "got {answer:?}");

    // Cleanup
    session.shutdown().await;
}

#[tokio::test]
async fn test_malformed_answer_keeps_offered() {
    init_tracing();

    let (session, _factory, _observer) = create_scripted_session(LinkScript::default()).await;
    session.generate_offer().await.expect("Failed to generate offer");

    let result = session.accept_answer("definitely not an answer").await;
    assert!(
        matches!(result, Err(SessionError::InvalidSignalingText(_))),
        "got {result:?}"
    );
    assert_eq!(session.status().await.unwrap().stage(), Stage::Offered);

    session
        .accept_answer(&scripted_text(SdpKind::Answer))
        .await
        .expect("A valid answer should still be accepted");
    assert_eq!(session.status().await.unwrap().stage(), Stage::Answered);

    // Cleanup
    session.shutdown().await;
}
