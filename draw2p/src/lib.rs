pub use draw2p_core::model::{ConnectionStatus, Stage, Stroke};

pub mod model {
    pub use draw2p_core::model::*;
}

pub mod codec {
    pub use draw2p_core::codec::*;
}

pub mod render {
    pub use draw2p_core::render::*;
}

pub mod capture {
    pub use draw2p_core::capture::*;
}

#[cfg(feature = "peer")]
pub mod peer {
    pub use draw2p_peer::*;
}
