//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`init`], [`validate`], or [`health`].
//! Each handler lives in its own submodule.

pub mod health;
pub mod init;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::ForwarderError;

pub async fn dispatch(cli: Cli) -> Result<(), ForwarderError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  pixiv-forwarder v{version}\n\n  \
         No command provided. To get started:\n\n    \
         pixiv-forwarder run                    Start with built-in defaults\n    \
         pixiv-forwarder run --runtime edge     Serve under the /api prefix\n    \
         pixiv-forwarder init                   Write the default config to edit\n    \
         pixiv-forwarder --help                 See all commands and options\n"
    );
}
