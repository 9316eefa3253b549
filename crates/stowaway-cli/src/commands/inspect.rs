use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Reports whether a PNG image appears to carry a hidden payload
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Source image to inspect
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,
}

impl InspectArgs {
    pub fn run(self) -> CliResult<()> {
        if stowaway_core::commands::inspect(&self.media)? {
            println!("payload signature found");
        } else {
            println!("no payload detected");
        }

        Ok(())
    }
}
