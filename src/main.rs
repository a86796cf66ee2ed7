use clap::Parser;
use colored::Colorize;
use phpscope::cli::{self, Cli};
use phpscope::error::ParseError;
use phpscope::exit::ExitStatus;

fn main() -> ExitStatus {
    let cli = Cli::parse();

    match cli::dispatch::execute(cli.command) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            if e.is::<ParseError>() {
                ExitStatus::InvalidInput
            } else {
                ExitStatus::Error
            }
        }
    }
}
