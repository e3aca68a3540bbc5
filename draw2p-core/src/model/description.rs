use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine as _, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard alphabet, padded on encode, padding optional on decode.
/// Pasted blobs often lose their trailing `=`.
const TRANSPORT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Every session description starts with the protocol version line.
const SDP_VERSION_PREFIX: &str = "v=";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalingError {
    #[error("invalid signaling text: {0}")]
    InvalidSignalingText(String),
}

impl SignalingError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSignalingText(reason.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SdpKind {
    Offer,
    Answer,
}

impl fmt::Display for SdpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpKind::Offer => f.write_str("offer"),
            SdpKind::Answer => f.write_str("answer"),
        }
    }
}

/// How a description travels through the user's clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportEncoding {
    Plain,
    #[default]
    Base64,
}

/// A local or remote session description with its gathered candidates,
/// in the form users copy between peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalingDescription {
    kind: SdpKind,
    payload: String,
    encoding: TransportEncoding,
}

impl SignalingDescription {
    pub fn new(kind: SdpKind, payload: impl Into<String>, encoding: TransportEncoding) -> Self {
        Self {
            kind,
            payload: payload.into(),
            encoding,
        }
    }

    pub fn kind(&self) -> SdpKind {
        self.kind
    }

    /// Raw SDP text, ready for the negotiation primitive.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn encoding(&self) -> TransportEncoding {
        self.encoding
    }

    pub fn into_payload(self) -> String {
        self.payload
    }

    pub fn to_transport_text(&self) -> String {
        match self.encoding {
            TransportEncoding::Plain => self.payload.clone(),
            TransportEncoding::Base64 => TRANSPORT_BASE64.encode(self.payload.as_bytes()),
        }
    }

    /// Parses text pasted by the user. Plain SDP is recognised by its
    /// version line; anything else must be base64 of plain SDP. Whitespace
    /// inside a base64 blob is ignored.
    pub fn from_transport_text(kind: SdpKind, text: &str) -> Result<Self, SignalingError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SignalingError::invalid(format!("empty {kind}")));
        }

        if trimmed.starts_with(SDP_VERSION_PREFIX) {
            return Ok(Self::new(kind, normalize_sdp(trimmed), TransportEncoding::Plain));
        }

        let compact: String = trimmed
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = TRANSPORT_BASE64
            .decode(compact.as_bytes())
            .map_err(|e| SignalingError::invalid(format!("{kind} is not base64: {e}")))?;
        let payload = String::from_utf8(bytes)
            .map_err(|_| SignalingError::invalid(format!("{kind} is not UTF-8 text")))?;

        if !payload.trim_start().starts_with(SDP_VERSION_PREFIX) {
            return Err(SignalingError::invalid(format!(
                "{kind} does not contain a session description"
            )));
        }

        Ok(Self::new(kind, payload, TransportEncoding::Base64))
    }
}

/// Restores CRLF line endings that text fields and editors tend to rewrite.
fn normalize_sdp(text: &str) -> String {
    let mut sdp = String::with_capacity(text.len() + 64);
    for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
        sdp.push_str(line);
        sdp.push_str("\r\n");
    }
    sdp
}
