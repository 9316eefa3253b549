use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Scrubs the low bit plane of a PNG image, erasing any hidden payload
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Source image whose bit plane will be scrubbed, used readonly
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,

    /// Scrubbed image will be stored as file (always PNG encoded)
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,
}

impl CleanArgs {
    pub fn run(self) -> CliResult<()> {
        stowaway_core::commands::clean(&self.media, &self.write_to_file)
    }
}
