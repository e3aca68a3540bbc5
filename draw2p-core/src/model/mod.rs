mod brush;
mod connection;
mod description;
mod ice;
mod status;
mod stroke;

pub use brush::{
    Brush, DEFAULT_COLOR, DEFAULT_LINE_WIDTH, ERASER_COLOR, ERASER_WIDTH, MAX_LINE_WIDTH,
    MIN_LINE_WIDTH, Palette,
};
pub use connection::ConnectionId;
pub use description::{SdpKind, SignalingDescription, SignalingError, TransportEncoding};
pub use ice::{DEFAULT_STUN_ADDR, IceServerConfig};
pub use status::{ChannelState, ConnectionStatus, HandshakePhase, Stage};
pub use stroke::{Point, Stroke};
