//! Wire format for drawing events on the data channel.
//!
//! One stroke per message, comma-delimited text:
//!
//! ```text
//! draw,<color>,<width>,<x0>,<y0>,<x1>,<y1>,...
//! ```
//!
//! Decoding never fails. Messages that cannot be drawn come back as
//! [`Decoded::Ignored`] so a peer speaking a different revision of the
//! protocol can never break the channel.

use crate::model::Stroke;
use thiserror::Error;
use tracing::debug;

pub const DRAW_KIND: &str = "draw";
pub const DELIMITER: char = ',';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("stroke color {0:?} contains the field delimiter")]
    DelimiterInColor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotText,
    UnknownKind,
    MissingHeader,
    TooFewCoordinates,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Draw(Stroke),
    Ignored(IgnoreReason),
}

impl Decoded {
    pub fn into_stroke(self) -> Option<Stroke> {
        match self {
            Decoded::Draw(stroke) => Some(stroke),
            Decoded::Ignored(_) => None,
        }
    }
}

pub fn encode_stroke(stroke: &Stroke) -> Result<String, CodecError> {
    encode_parts(&stroke.color, stroke.width, &stroke.flat_coords())
}

/// Encodes a stroke given as a flattened `[x0, y0, x1, y1, ...]` list.
/// An unpaired trailing value is dropped.
pub fn encode_parts(color: &str, width: f64, coords: &[f64]) -> Result<String, CodecError> {
    if color.contains(DELIMITER) {
        return Err(CodecError::DelimiterInColor(color.to_owned()));
    }
    let coords = &coords[..coords.len() & !1];

    let mut message = String::with_capacity(DRAW_KIND.len() + color.len() + coords.len() * 6);
    message.push_str(DRAW_KIND);
    message.push(DELIMITER);
    message.push_str(color);
    message.push(DELIMITER);
    message.push_str(&format_number(width));
    for value in coords {
        message.push(DELIMITER);
        message.push_str(&format_number(*value));
    }
    Ok(message)
}

pub fn decode_bytes(data: &[u8]) -> Decoded {
    match std::str::from_utf8(data) {
        Ok(text) => decode_message(text),
        Err(_) => {
            debug!("Ignoring non-text message ({} bytes)", data.len());
            Decoded::Ignored(IgnoreReason::NotText)
        }
    }
}

pub fn decode_message(text: &str) -> Decoded {
    let mut fields = text.split(DELIMITER);

    let kind = fields.next().unwrap_or_default();
    if kind != DRAW_KIND {
        debug!("Ignoring message of unknown kind {:?}", kind);
        return Decoded::Ignored(IgnoreReason::UnknownKind);
    }

    let (Some(color), Some(width)) = (fields.next(), fields.next()) else {
        debug!("Ignoring draw message without color/width");
        return Decoded::Ignored(IgnoreReason::MissingHeader);
    };

    let coords: Vec<f64> = fields.map(parse_number).collect();
    if coords.len() < 2 {
        debug!("Ignoring draw message with {} coordinate(s)", coords.len());
        return Decoded::Ignored(IgnoreReason::TooFewCoordinates);
    }

    Decoded::Draw(Stroke::from_flat(color, parse_number(width), &coords))
}

/// Shortest text that parses back to the same value. Non-finite values use
/// the names browsers print for them.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

/// Permissive number parsing used for every numeric field on the wire.
///
/// Leading whitespace is skipped and the longest numeric prefix is taken,
/// so `"12px"` is `12` and `" 3.5e1,"` is `35`. A field with no numeric
/// prefix yields `NaN` instead of an error; the renderer is responsible for
/// skipping non-finite values.
pub fn parse_number(field: &str) -> f64 {
    let text = field.trim_start();
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}
