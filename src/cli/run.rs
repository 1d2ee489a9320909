use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        diagnose::diagnose,
        extract::extract,
        init::init,
        normalize::normalize,
        rewrite::rewrite,
        sync::{ensure, sync, sync_file},
    },
    exit_status::ExitStatus,
};

/// Dispatch to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Rewrite(cmd)) => rewrite(cmd),
        Some(Command::Normalize(cmd)) => normalize(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::SyncFile(cmd)) => sync_file(cmd),
        Some(Command::Ensure(cmd)) => ensure(cmd),
        Some(Command::Diagnose(cmd)) => diagnose(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
