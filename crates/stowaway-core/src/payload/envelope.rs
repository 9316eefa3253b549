//! The canonical single-line text form of a payload.
//!
//! Wire format, four ordered fields, no whitespace:
//!
//! ```text
//! {"type":"<text|gray|color>","size":<null|"H,W">,"isCompressed":<true|false>,"content":"<base64>"}
//! ```
//!
//! Serialization goes through a field-ordered serde record, which emits
//! exactly these bytes. Deserialization accepts only this one schema:
//! unknown fields, whitespace anywhere in the text, or a size field that
//! contradicts the content type are all rejected.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};

use crate::payload::{CompressionLevel, Content, COLOR_CHANNELS};
use crate::result::Result;
use crate::StowawayError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ContentKind {
    Text,
    Gray,
    Color,
}

/// Field order matters: serde_json serializes in declaration order, which
/// keeps the wire bytes identical to envelopes embedded by earlier tools.
#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EnvelopeRecord {
    #[serde(rename = "type")]
    kind: ContentKind,
    size: Option<String>,
    #[serde(rename = "isCompressed")]
    is_compressed: bool,
    content: String,
}

pub(crate) fn serialize(content: &Content, level: CompressionLevel) -> Result<String> {
    let flat = content.raster_bytes();
    let transported = match level.zlib() {
        Some(compression) => compress(flat, compression)?,
        None => flat.to_vec(),
    };

    let record = EnvelopeRecord {
        kind: match content {
            Content::Text(_) => ContentKind::Text,
            Content::Gray { .. } => ContentKind::Gray,
            Content::Color { .. } => ContentKind::Color,
        },
        size: content
            .dimensions()
            .map(|(height, width)| format!("{height},{width}")),
        is_compressed: level.zlib().is_some(),
        content: BASE64.encode(transported),
    };

    Ok(serde_json::to_string(&record)?)
}

pub(crate) fn deserialize(text: &str) -> Result<Content> {
    if text.contains(char::is_whitespace) {
        return Err(StowawayError::EnvelopeWhitespace);
    }

    let record: EnvelopeRecord = serde_json::from_str(text)?;
    let transported = BASE64.decode(record.content.as_bytes())?;
    let flat = if record.is_compressed {
        decompress(&transported)?
    } else {
        transported
    };

    match record.kind {
        ContentKind::Text => {
            if record.size.is_some() {
                return Err(StowawayError::UnexpectedSize);
            }
            Ok(Content::Text(flat))
        }
        ContentKind::Gray => {
            let (height, width) = parse_size(record.size.as_deref())?;
            Content::gray(height, width, flat)
        }
        ContentKind::Color => {
            let (height, width) = parse_size(record.size.as_deref())?;
            Content::color(height, width, COLOR_CHANNELS, flat)
        }
    }
}

fn parse_size(size: Option<&str>) -> Result<(usize, usize)> {
    let size = size.ok_or(StowawayError::UnexpectedSize)?;
    let (height, width) = size.split_once(',').ok_or(StowawayError::MalformedSize)?;
    let height = height.parse().map_err(|_| StowawayError::MalformedSize)?;
    let width = width.parse().map_err(|_| StowawayError::MalformedSize)?;

    Ok((height, width))
}

fn compress(data: &[u8], level: flate2::Compression) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;

    Ok(encoder.finish()?)
}

fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut flat = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut flat)
        .map_err(StowawayError::DecompressionError)?;

    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_text_matches_the_wire_format_exactly() {
        let envelope = serialize(&Content::text("hi"), CompressionLevel::NONE).unwrap();

        assert_eq!(
            envelope,
            r#"{"type":"text","size":null,"isCompressed":false,"content":"aGk="}"#
        );
    }

    #[test]
    fn gray_content_carries_its_size() {
        let content = Content::gray(2, 3, vec![9; 6]).unwrap();
        let envelope = serialize(&content, CompressionLevel::NONE).unwrap();

        assert!(envelope.contains(r#""type":"gray""#));
        assert!(envelope.contains(r#""size":"2,3""#));
        assert_eq!(deserialize(&envelope).unwrap(), content);
    }

    #[test]
    fn content_round_trips_at_every_compression_level() {
        let samples = [
            Content::text("the quick brown fox jumps over the lazy dog"),
            Content::gray(3, 5, (0u8..15).collect()).unwrap(),
            Content::color(2, 4, 3, (0u8..24).collect()).unwrap(),
        ];

        for level in -1..=9 {
            let level = CompressionLevel::new(level).unwrap();
            for content in &samples {
                let envelope = serialize(content, level).unwrap();
                assert_eq!(&deserialize(&envelope).unwrap(), content);
            }
        }
    }

    #[test]
    fn level_zero_still_frames_the_stream_as_zlib() {
        let envelope =
            serialize(&Content::text("abc"), CompressionLevel::new(0).unwrap()).unwrap();

        assert!(envelope.contains(r#""isCompressed":true"#));
        assert_eq!(
            deserialize(&envelope).unwrap(),
            Content::text("abc")
        );
    }

    #[test]
    fn whitespace_in_the_envelope_is_rejected() {
        let spaced = r#"{"type": "text","size":null,"isCompressed":false,"content":"aGk="}"#;

        match deserialize(spaced) {
            Err(StowawayError::EnvelopeWhitespace) => (),
            other => panic!("expected whitespace rejection, got {other:?}"),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let extra = r#"{"type":"text","size":null,"isCompressed":false,"content":"aGk=","x":1}"#;

        match deserialize(extra) {
            Err(StowawayError::MalformedEnvelope(_)) => (),
            other => panic!("expected schema rejection, got {other:?}"),
        }
    }

    #[test]
    fn sized_text_is_rejected() {
        let sized = r#"{"type":"text","size":"1,2","isCompressed":false,"content":"aGk="}"#;

        match deserialize(sized) {
            Err(StowawayError::UnexpectedSize) => (),
            other => panic!("expected size rejection, got {other:?}"),
        }
    }

    #[test]
    fn unsized_gray_is_rejected() {
        let unsized_ = r#"{"type":"gray","size":null,"isCompressed":false,"content":"aGk="}"#;

        match deserialize(unsized_) {
            Err(StowawayError::UnexpectedSize) => (),
            other => panic!("expected size rejection, got {other:?}"),
        }
    }

    #[test]
    fn malformed_size_is_rejected() {
        let garbled = r#"{"type":"gray","size":"2x3","isCompressed":false,"content":"aGk="}"#;

        match deserialize(garbled) {
            Err(StowawayError::MalformedSize) => (),
            other => panic!("expected size parse failure, got {other:?}"),
        }
    }

    #[test]
    fn astronomical_sizes_are_rejected() {
        // schema-valid, but the declared shape cannot be represented
        let huge = r#"{"type":"gray","size":"9999999999999999999,9999999999999999999","isCompressed":false,"content":"aGk="}"#;

        match deserialize(huge) {
            Err(StowawayError::MalformedSize) => (),
            other => panic!("expected size rejection, got {other:?}"),
        }
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let bad = r#"{"type":"text","size":null,"isCompressed":false,"content":"!!!"}"#;

        match deserialize(bad) {
            Err(StowawayError::Base64Error(_)) => (),
            other => panic!("expected base64 failure, got {other:?}"),
        }
    }

    #[test]
    fn broken_zlib_stream_is_rejected() {
        // "aGk=" decodes to plain "hi", which is not a zlib stream
        let bad = r#"{"type":"text","size":null,"isCompressed":true,"content":"aGk="}"#;

        match deserialize(bad) {
            Err(StowawayError::DecompressionError(_)) => (),
            other => panic!("expected decompression failure, got {other:?}"),
        }
    }

    #[test]
    fn reshape_length_mismatch_is_rejected() {
        // two bytes of content declared as a 2x2 gray grid
        let short = r#"{"type":"gray","size":"2,2","isCompressed":false,"content":"aGk="}"#;

        match deserialize(short) {
            Err(StowawayError::ContentShapeMismatch { expected: 4, actual: 2 }) => (),
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }
}
