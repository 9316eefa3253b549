use crate::result::Result;
use crate::StowawayError;

/// The number of channels a color payload must carry. Alpha-bearing
/// content cannot be represented in the envelope and is rejected.
pub const COLOR_CHANNELS: usize = 3;

/// Raw payload content, stored flat in row-major (raster) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// An opaque byte sequence, e.g. UTF-8 text
    Text(Vec<u8>),
    /// A height x width grid of gray values
    Gray {
        height: usize,
        width: usize,
        pixels: Vec<u8>,
    },
    /// A height x width x 3 grid of interleaved RGB values
    Color {
        height: usize,
        width: usize,
        pixels: Vec<u8>,
    },
}

impl Content {
    pub fn text(bytes: impl Into<Vec<u8>>) -> Self {
        Content::Text(bytes.into())
    }

    /// Creates grayscale content, validating that the flat buffer matches the shape.
    pub fn gray(height: usize, width: usize, pixels: Vec<u8>) -> Result<Self> {
        // dimensions may come from untrusted envelope text, so the product
        // must not be allowed to wrap
        let expected = height
            .checked_mul(width)
            .ok_or(StowawayError::MalformedSize)?;
        if pixels.len() != expected {
            return Err(StowawayError::ContentShapeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Content::Gray {
            height,
            width,
            pixels,
        })
    }

    /// Creates color content from an interleaved buffer with the given channel count.
    /// Only exactly 3 channels are representable, anything else is rejected.
    pub fn color(height: usize, width: usize, channels: usize, pixels: Vec<u8>) -> Result<Self> {
        if channels != COLOR_CHANNELS {
            return Err(StowawayError::UnsupportedChannelCount(channels));
        }
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(COLOR_CHANNELS))
            .ok_or(StowawayError::MalformedSize)?;
        if pixels.len() != expected {
            return Err(StowawayError::ContentShapeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Content::Color {
            height,
            width,
            pixels,
        })
    }

    /// The flat byte sequence in raster order, uniform across all content kinds.
    pub fn raster_bytes(&self) -> &[u8] {
        match self {
            Content::Text(bytes) => bytes,
            Content::Gray { pixels, .. } | Content::Color { pixels, .. } => pixels,
        }
    }

    /// `(height, width)` for image content, `None` for text.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        match self {
            Content::Text(_) => None,
            Content::Gray { height, width, .. } | Content::Color { height, width, .. } => {
                Some((*height, *width))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_content_must_match_its_shape() {
        assert!(Content::gray(2, 3, vec![0; 6]).is_ok());

        match Content::gray(2, 3, vec![0; 5]) {
            Err(StowawayError::ContentShapeMismatch {
                expected: 6,
                actual: 5,
            }) => (),
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn color_content_must_match_its_shape() {
        assert!(Content::color(2, 2, 3, vec![0; 12]).is_ok());

        match Content::color(2, 2, 3, vec![0; 16]) {
            Err(StowawayError::ContentShapeMismatch {
                expected: 12,
                actual: 16,
            }) => (),
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_shapes_are_rejected() {
        match Content::gray(usize::MAX, 2, vec![0; 4]) {
            Err(StowawayError::MalformedSize) => (),
            other => panic!("expected shape rejection, got {other:?}"),
        }

        // height * width fits, the channel factor does not
        match Content::color(usize::MAX / 2, 2, 3, vec![0; 4]) {
            Err(StowawayError::MalformedSize) => (),
            other => panic!("expected shape rejection, got {other:?}"),
        }
    }

    #[test]
    fn alpha_bearing_content_is_rejected() {
        match Content::color(2, 2, 4, vec![0; 16]) {
            Err(StowawayError::UnsupportedChannelCount(4)) => (),
            other => panic!("expected channel count error, got {other:?}"),
        }
    }

    #[test]
    fn raster_bytes_are_flat_and_row_major() {
        let content = Content::gray(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(content.raster_bytes(), &[1, 2, 3, 4]);
        assert_eq!(content.dimensions(), Some((2, 2)));

        let text = Content::text("hi");
        assert_eq!(text.raster_bytes(), b"hi");
        assert_eq!(text.dimensions(), None);
    }
}
