//! Sync, sync-file and ensure commands.
//!
//! All three run the async sync engine on a single-threaded runtime and
//! exit with `Failure` when any document could not be written.

use anyhow::Result;

use super::super::{
    args::{EnsureCommand, SyncCommand, SyncFileCommand},
    exit_status::ExitStatus,
    report,
};
use super::helper::{ProjectContext, parse_entries, runtime};
use crate::core::sync::{SyncEngine, SyncResult};

fn finish(result: &SyncResult, engine: &SyncEngine, verb: &str) -> ExitStatus {
    report::print_sync_result(result, engine.root(), verb);
    if result.is_success() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    }
}

pub fn sync(cmd: SyncCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let engine = SyncEngine::new(
        ctx.translations_root(&cmd.locale),
        ctx.sync_options(&cmd.locale, cmd.force),
    );
    let result = runtime()?.block_on(engine.sync_keys(&cmd.keys));
    Ok(finish(&result, &engine, "Added"))
}

pub fn sync_file(cmd: SyncFileCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let engine = SyncEngine::new(
        ctx.translations_root(&cmd.locale),
        ctx.sync_options(&cmd.locale, false),
    );
    let file = std::path::absolute(&cmd.file)?;
    let result = runtime()?.block_on(engine.sync_file(&file));
    Ok(finish(&result, &engine, "Added"))
}

pub fn ensure(cmd: EnsureCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let (keys, values) = parse_entries(&cmd.entries)?;
    let engine = SyncEngine::new(
        ctx.translations_root(&cmd.locale),
        ctx.sync_options(&cmd.locale, cmd.force),
    );
    let result = runtime()?.block_on(engine.ensure_keys(&keys, &values));
    Ok(finish(&result, &engine, "Wrote"))
}
