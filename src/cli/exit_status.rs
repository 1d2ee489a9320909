use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): everything processed
/// - `Failure` (1): finished, but some files or documents failed
/// - `Error` (2): could not run at all (bad config, bad arguments)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
