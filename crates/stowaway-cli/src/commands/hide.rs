use std::path::PathBuf;

use clap::{ArgGroup, Args};
use stowaway_core::commands::PayloadSource;
use stowaway_core::{CompressionLevel, StowawayError};

use crate::CliResult;

/// Hides a message, a data file or a payload image in a PNG carrier
#[derive(Args, Debug)]
#[command(group = ArgGroup::new("source").required(true).args(["message", "data_file", "payload_image"]))]
pub struct HideArgs {
    /// Carrier PNG image, used readonly
    #[arg(short = 'i', long = "in", value_name = "carrier file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file (always PNG encoded)
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// File whose bytes will be hidden as text content
    #[arg(short = 'd', long = "data", value_name = "data file")]
    pub data_file: Option<PathBuf>,

    /// Grayscale or color PNG that will be hidden as image content
    #[arg(short = 'p', long = "payload", value_name = "payload image")]
    pub payload_image: Option<PathBuf>,

    /// Deflate level in [-1, 9], where -1 stores the payload uncompressed
    #[arg(
        short = 'c',
        long = "compression",
        value_name = "level",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    pub compression: i8,

    /// Replace a payload that is already embedded in the carrier
    #[arg(long = "override")]
    pub override_existing: bool,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let source = match (self.message, self.data_file, self.payload_image) {
            (Some(message), _, _) => PayloadSource::Message(message),
            (_, Some(file), _) => PayloadSource::TextFile(file),
            (_, _, Some(image)) => PayloadSource::ImageFile(image),
            _ => return Err(StowawayError::MissingPayload),
        };

        stowaway_core::commands::hide(
            &self.media,
            &self.write_to_file,
            source,
            CompressionLevel::new(self.compression)?,
            self.override_existing,
        )
    }
}
