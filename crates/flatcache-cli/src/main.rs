use std::process::ExitCode;

use clap::Parser;
use flatcache_cli::{init_logging, run, Cli, CommandStatus, VerbosityLevel};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(VerbosityLevel::from_flags(cli.verbose, cli.quiet));

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &mut stdout)? {
        CommandStatus::Success => Ok(ExitCode::SUCCESS),
        CommandStatus::NotFound => Ok(ExitCode::from(1)),
    }
}
