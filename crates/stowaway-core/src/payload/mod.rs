//! Payloads and their envelope codec.

mod content;
mod envelope;

pub use content::{Content, COLOR_CHANNELS};

use crate::result::Result;
use crate::StowawayError;

/// A deflate level for the envelope content.
///
/// `-1` skips compression entirely; `0` through `9` are zlib levels, where
/// `0` still wraps the bytes in a zlib stream without shrinking them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(i8);

impl CompressionLevel {
    pub const NONE: Self = Self(-1);
    pub const BEST: Self = Self(9);

    pub fn new(level: i8) -> Result<Self> {
        if !(-1..=9).contains(&level) {
            return Err(StowawayError::CompressionLevelOutOfRange(level));
        }

        Ok(Self(level))
    }

    pub fn get(&self) -> i8 {
        self.0
    }

    pub(crate) fn zlib(&self) -> Option<flate2::Compression> {
        u32::try_from(self.0).ok().map(flate2::Compression::new)
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::NONE
    }
}

/// Content to be hidden, paired with its canonical envelope text.
///
/// A payload is immutable: it is built either from raw content (the envelope
/// is derived) or from envelope text (the content is derived), and the two
/// stay consistent for its whole lifetime. Re-compressing produces a new
/// payload via [`Payload::with_compression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    content: Content,
    envelope: String,
}

impl Payload {
    /// Creates a payload from raw content, deriving the envelope text.
    pub fn from_content(content: Content, level: CompressionLevel) -> Result<Self> {
        let envelope = envelope::serialize(&content, level)?;

        Ok(Self { content, envelope })
    }

    /// Creates a payload from envelope text, deriving the content.
    pub fn from_envelope(text: impl Into<String>) -> Result<Self> {
        let envelope = text.into();
        let content = envelope::deserialize(&envelope)?;

        Ok(Self { content, envelope })
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn envelope(&self) -> &str {
        &self.envelope
    }

    /// Returns a new payload with the same content serialized at another level.
    pub fn with_compression(&self, level: CompressionLevel) -> Result<Self> {
        Self::from_content(self.content.clone(), level)
    }
}
