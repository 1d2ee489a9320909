//! Rewrite command - Replace translatable strings with translation calls.
//!
//! Only strings with a key map entry are rewritten; everything else is
//! counted as unresolved and left verbatim. Files are processed in parallel
//! and written only with `--apply`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;

use super::super::{
    args::RewriteCommand,
    exit_status::ExitStatus,
    report::{self, display_path, plural},
};
use super::helper::ProjectContext;
use crate::core::{
    file_scanner::is_script_file,
    frameworks::{Framework, FrameworkHandler, FrameworkOptions},
    keymap::KeyMap,
    normalize::{NormalizeOptions, normalize_source},
};

struct FileRewrite {
    path: PathBuf,
    change_count: usize,
    unresolved_count: usize,
    fix_count: usize,
}

struct RewriteSettings<'a> {
    key_map: &'a KeyMap,
    namespace: &'a str,
    options: &'a FrameworkOptions,
    forced: Option<Framework>,
    normalize: bool,
    apply: bool,
}

fn rewrite_file(path: &Path, settings: &RewriteSettings) -> Result<FileRewrite> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    let framework = settings
        .forced
        .unwrap_or_else(|| Framework::detect(Some(path), &content));
    let outcome = framework.replace(&content, settings.key_map, settings.namespace, settings.options);

    let mut rewritten = outcome.content;
    let mut fix_count = 0;
    if settings.normalize && outcome.change_count > 0 && is_script_file(path) {
        let options = NormalizeOptions {
            function_name: settings.options.function_name.clone(),
            keys: None,
        };
        match normalize_source(&rewritten, &path.to_string_lossy(), &options) {
            Ok(normalized) => {
                fix_count = normalized.fix_count;
                rewritten = normalized.content;
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "normalize skipped"),
        }
    }

    if settings.apply && rewritten != content {
        fs::write(path, &rewritten)
            .with_context(|| format!("Failed to write source file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), changes = outcome.change_count, "rewrote");
    }

    Ok(FileRewrite {
        path: path.to_path_buf(),
        change_count: outcome.change_count,
        unresolved_count: outcome.unresolved_count,
        fix_count,
    })
}

pub fn rewrite(cmd: RewriteCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let options = ctx.framework_options()?;
    let key_map = KeyMap::load(&ctx.key_map_path())?;
    let namespace = ctx.namespace(&cmd.source);
    let settings = RewriteSettings {
        key_map: &key_map,
        namespace: &namespace,
        options: &options,
        forced: ctx.framework_override(&cmd.source)?,
        normalize: cmd.normalize,
        apply: cmd.apply,
    };
    let cwd = std::env::current_dir()?;

    let files = ctx.source_files(&cmd.source.paths);
    let results: Vec<Result<FileRewrite>> =
        files.par_iter().map(|path| rewrite_file(path, &settings)).collect();

    let mut changed_files = 0;
    let mut change_total = 0;
    let mut unresolved_total = 0;
    let mut error_count = 0;
    for result in results {
        match result {
            Ok(file) => {
                if file.change_count > 0 || file.unresolved_count > 0 {
                    let fixes = if file.fix_count > 0 {
                        format!(", {}", plural(file.fix_count, "fix"))
                    } else {
                        String::new()
                    };
                    println!(
                        "  {}: {}, {} unresolved{}",
                        display_path(&file.path, &cwd),
                        plural(file.change_count, "change"),
                        file.unresolved_count,
                        fixes
                    );
                }
                if file.change_count > 0 {
                    changed_files += 1;
                }
                change_total += file.change_count;
                unresolved_total += file.unresolved_count;
            }
            Err(e) => {
                error_count += 1;
                eprintln!("{} {:#}", "error:".bold().red(), e);
            }
        }
    }

    if cmd.apply {
        report::print_success(&format!(
            "Rewrote {} in {} ({} unresolved)",
            plural(change_total, "string"),
            plural(changed_files, "file"),
            unresolved_total
        ));
    } else {
        println!(
            "{} {} in {} ({} unresolved).",
            "Would rewrite".yellow().bold(),
            plural(change_total, "string"),
            plural(changed_files, "file"),
            unresolved_total
        );
        if change_total > 0 {
            println!("Run with {} to write these changes.", "--apply".cyan());
        }
    }

    if error_count > 0 {
        report::print_failure(&format!("{} failed", plural(error_count, "file")));
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}
