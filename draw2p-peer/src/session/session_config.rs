use crate::transport::TransportConfig;
use draw2p_core::TransportEncoding;

pub const DEFAULT_CHANNEL_LABEL: &str = "draw";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub transport: TransportConfig,
    /// Form of the offer/answer text handed to the user.
    pub encoding: TransportEncoding,
    pub channel_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            encoding: TransportEncoding::Base64,
            channel_label: DEFAULT_CHANNEL_LABEL.to_owned(),
        }
    }
}
