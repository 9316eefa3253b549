use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Unveils the payload hidden in a PNG image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,

    /// Extracted data will be stored as this file; image payloads are PNG encoded
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output_file: PathBuf,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        stowaway_core::commands::unveil(&self.media, &self.output_file)
    }
}
