use std::collections::HashSet;

use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::NormalizeCommand,
    exit_status::ExitStatus,
    report::{self, display_path, plural},
};
use super::helper::ProjectContext;
use crate::core::{
    file_scanner::is_script_file,
    normalize::{NormalizeOptions, normalize_file},
};

pub fn normalize(cmd: NormalizeCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let options = NormalizeOptions {
        function_name: ctx.loaded.config.translation_function.clone(),
        keys: if cmd.keys.is_empty() {
            None
        } else {
            Some(cmd.keys.iter().cloned().collect::<HashSet<_>>())
        },
    };
    let cwd = std::env::current_dir()?;

    let mut fixed_files = 0;
    let mut fix_total = 0;
    let mut error_count = 0;
    for path in ctx.source_files(&cmd.paths) {
        if !is_script_file(&path) {
            continue;
        }
        match normalize_file(&path, &options, cmd.apply) {
            Ok(outcome) if outcome.fix_count > 0 => {
                println!(
                    "  {}: {}",
                    display_path(&path, &cwd),
                    plural(outcome.fix_count, "fix")
                );
                fixed_files += 1;
                fix_total += outcome.fix_count;
            }
            Ok(_) => {}
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "{} {}: {:#}",
                    "error:".bold().red(),
                    display_path(&path, &cwd),
                    e
                );
            }
        }
    }

    if cmd.apply {
        report::print_success(&format!(
            "Repaired {} in {}",
            plural(fix_total, "split parenthetical"),
            plural(fixed_files, "file")
        ));
    } else {
        println!(
            "{} {} in {}.",
            "Would repair".yellow().bold(),
            plural(fix_total, "split parenthetical"),
            plural(fixed_files, "file")
        );
    }

    if error_count > 0 {
        report::print_failure(&format!("{} could not be parsed", plural(error_count, "file")));
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}
