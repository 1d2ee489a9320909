use anyhow::Result;

use super::super::{args::DiagnoseCommand, exit_status::ExitStatus, report};
use crate::core::diagnostics::parse_diagnostic;

pub fn diagnose(cmd: DiagnoseCommand) -> Result<ExitStatus> {
    match parse_diagnostic(&cmd.message) {
        Some(diagnostic) => {
            tracing::debug!(key = diagnostic.key(), "parsed diagnostic");
            println!("{}", serde_json::to_string_pretty(&diagnostic)?);
            Ok(ExitStatus::Success)
        }
        None => {
            report::print_failure("Unrecognized diagnostic message");
            Ok(ExitStatus::Failure)
        }
    }
}
