use draw2p_core::{Point, Stroke};

use super::open_scripted_channel;
use crate::integration::init_tracing;

#[tokio::test]
async fn test_send_stroke_wire_format() {
    init_tracing();

    let (session, handle, _observer) = open_scripted_channel().await;

    let sent = session
        .send_stroke("#000000", 3.0, &[0.0, 0.0, 10.0, 10.0, 20.0, 0.0])
        .await;
    assert!(sent);

    let stroke = Stroke::new(
        "rgb(0, 128, 255)",
        2.5,
        vec![Point::new(1.5, -2.0), Point::new(3.0, 4.25)],
    );
    // Colors may not contain the field delimiter.
    assert!(!session.send(&stroke).await);

    let stroke = Stroke::new(
        "#ffffff",
        20.0,
        vec![Point::new(1.5, -2.0), Point::new(3.0, 4.25)],
    );
    assert!(session.send(&stroke).await);

    let sent = handle.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].as_ref(), b"draw,#000000,3,0,0,10,10,20,0");
    assert_eq!(sent[1].as_ref(), b"draw,#ffffff,20,1.5,-2,3,4.25");

    // Cleanup
    session.shutdown().await;
}
