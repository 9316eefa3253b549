use clap::Parser;

mod cli;
mod commands;

pub type CliResult<T> = Result<T, stowaway_core::StowawayError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = cli::CliArgs::parse();
    let result = match args.command {
        cli::Commands::Hide(cmd) => cmd.run(),
        cli::Commands::Unveil(cmd) => cmd.run(),
        cli::Commands::Clean(cmd) => cmd.run(),
        cli::Commands::Inspect(cmd) => cmd.run(),
    };

    if let Err(err) = &result {
        log::error!("{err}");
    }

    result
}
