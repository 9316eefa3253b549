use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StowawayError {
    /// Represents payload content with an alpha or otherwise unsupported channel layout
    #[error("Payload content with {0} channels is not supported, color content must have exactly 3")]
    UnsupportedChannelCount(usize),

    /// Represents a flat pixel buffer that does not match its declared shape
    #[error("Content of {actual} bytes does not match the declared shape of {expected} bytes")]
    ContentShapeMismatch { expected: usize, actual: usize },

    /// Represents a compression level outside the accepted range
    #[error("Compression level {0} is out of the acceptable range [-1, 9]")]
    CompressionLevelOutOfRange(i8),

    /// Represents an envelope that carries whitespace, which the wire format forbids
    #[error("Envelope text must be a single line without whitespace")]
    EnvelopeWhitespace,

    /// Represents envelope text that does not match the payload schema
    #[error("Envelope text does not match the payload schema")]
    MalformedEnvelope(#[from] serde_json::Error),

    /// Represents a size field that is not a representable "H,W" shape
    #[error("Envelope size field is not a representable \"H,W\" shape")]
    MalformedSize,

    /// Represents a size field that contradicts the content type, e.g. a sized text payload
    #[error("Envelope size field does not fit the declared content type")]
    UnexpectedSize,

    /// Represents envelope content that is not valid base64
    #[error("Envelope content is not valid base64")]
    Base64Error(#[from] base64::DecodeError),

    /// Represents a broken zlib stream inside a compressed envelope
    #[error("Envelope content failed to decompress")]
    DecompressionError(#[source] std::io::Error),

    /// Represents the error of invalid UTF-8 data found where envelope text was expected
    #[error("Invalid text data found inside a carrier")]
    InvalidTextData(#[from] FromUtf8Error),

    /// Represents a carrier whose bit plane holds no terminated envelope
    #[error("No envelope terminator found in the carrier")]
    TerminatorNotFound,

    /// Represents a raw carrier buffer that is not height x width x 4 bytes
    #[error("Carrier buffer of {actual} bytes does not match the {width}x{height} RGBA layout of {expected} bytes")]
    InvalidCarrierBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Represents an envelope that does not fit into the carrier
    #[error("Payload envelope of {needed} bytes exceeds the carrier capacity of {capacity} bytes")]
    PayloadTooLarge { needed: usize, capacity: usize },

    /// Represents an embed into a carrier that already holds a payload
    #[error("Carrier already holds a payload and override was not requested")]
    PayloadAlreadyPresent,

    /// Represents an invalid carrier image file. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to write a target file
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("API Error: Missing payload source")]
    MissingPayload,
}
