//! Command dispatch: bridges CLI args -> core pipeline -> output formatting.

pub mod config_cmd;
pub mod correlate;
pub mod messages;
pub mod uri;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Correlate(args) => correlate::handle(args, global).await,
        Command::Uri(args) => uri::handle(&args, global),
        Command::Messages => messages::handle(global),
        Command::Config(args) => config_cmd::handle(&args, global),
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = crate::cli::Cli::command();
            generate(args.shell, &mut cmd, "satsignal", &mut std::io::stdout());
            Ok(())
        }
    }
}
