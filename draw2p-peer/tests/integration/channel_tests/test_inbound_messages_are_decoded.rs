use std::time::Duration;

use draw2p_core::{Point, Stage};

use super::open_scripted_channel;
use crate::integration::init_tracing;
use crate::utils::ObservedEvent;

#[tokio::test]
async fn test_inbound_messages_are_decoded() {
    init_tracing();

    let (session, handle, observer) = open_scripted_channel().await;

    handle.deliver("draw,#ff0000,4,1,2,3,4").await;
    handle.deliver("hello there").await;
    handle.deliver(vec![0xff_u8, 0xfe, 0x00]).await;
    handle.deliver("draw,#00ff00").await;
    handle.deliver("draw,#00ff00,2,7").await;
    handle.deliver("draw,blue,wide,0,0,5,5").await;

    assert!(observer.wait_for_strokes(2, 2000).await);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let strokes = observer.strokes().await;
    assert_eq!(strokes.len(), 2, "only well-formed draw messages are delivered");

    assert_eq!(strokes[0].color, "#ff0000");
    assert_eq!(strokes[0].width, 4.0);
    assert_eq!(strokes[0].points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);

    // An unparseable width is kept as NaN and left to the renderer.
    assert_eq!(strokes[1].color, "blue");
    assert!(strokes[1].width.is_nan());
    assert_eq!(strokes[1].points.len(), 2);

    // Strokes are only reported once the channel is open.
    let events = observer.get_events().await;
    let opened = events
        .iter()
        .position(|e| matches!(e, ObservedEvent::Status(s) if s.stage() == Stage::Opened))
        .expect("no OPENED status recorded");
    assert!(
        events[opened + 1..]
            .iter()
            .all(|e| matches!(e, ObservedEvent::Stroke(_)))
    );
    assert_eq!(events.len(), opened + 3);

    // Cleanup
    session.shutdown().await;
}
