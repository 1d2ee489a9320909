use tracing::Level;
use tracing_subscriber::fmt;

/// Install the stderr subscriber. Warnings are always shown; `verbose` adds
/// per-file debug output. A subscriber installed earlier is kept.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let installed = fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use crate::logging::*;

    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        init(false);
        init(true);
        tracing::warn!("still logging");
    }
}
