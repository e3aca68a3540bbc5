use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered progress of the offer/answer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandshakePhase {
    Init,
    Offered,
    Answered,
}

/// Lifecycle of the data channel, independent from the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelState {
    Pending,
    Opened,
    /// Terminal until the connection is reset.
    Closed,
}

/// Single value shown to the user, collapsing handshake and channel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Init,
    Offered,
    Answered,
    Opened,
    Closed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "INIT",
            Stage::Offered => "OFFERED",
            Stage::Answered => "ANSWERED",
            Stage::Opened => "OPENED",
            Stage::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub handshake: HandshakePhase,
    pub channel: ChannelState,
}

impl ConnectionStatus {
    pub const INIT: Self = Self {
        handshake: HandshakePhase::Init,
        channel: ChannelState::Pending,
    };

    /// Moves the handshake forward. Returns `false` (and changes nothing)
    /// when `next` is not strictly ahead of the current phase.
    pub fn advance(&mut self, next: HandshakePhase) -> bool {
        if next <= self.handshake {
            return false;
        }
        self.handshake = next;
        true
    }

    pub fn open_channel(&mut self) -> bool {
        if self.channel != ChannelState::Pending {
            return false;
        }
        self.channel = ChannelState::Opened;
        true
    }

    pub fn close_channel(&mut self) -> bool {
        if self.channel == ChannelState::Closed {
            return false;
        }
        self.channel = ChannelState::Closed;
        true
    }

    pub fn is_open(&self) -> bool {
        self.channel == ChannelState::Opened
    }

    pub fn stage(&self) -> Stage {
        match (self.channel, self.handshake) {
            (ChannelState::Opened, _) => Stage::Opened,
            (ChannelState::Closed, _) => Stage::Closed,
            (ChannelState::Pending, HandshakePhase::Init) => Stage::Init,
            (ChannelState::Pending, HandshakePhase::Offered) => Stage::Offered,
            (ChannelState::Pending, HandshakePhase::Answered) => Stage::Answered,
        }
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::INIT
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.stage().fmt(f)
    }
}
