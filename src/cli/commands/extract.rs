//! Extract command - List translatable strings per source file.
//!
//! With `--assign`, every extracted string gets a key in the key map
//! (existing signatures are reused) and the key map is saved.

use std::{collections::HashMap, fs, io};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{self, display_path, plural},
};
use super::helper::ProjectContext;
use crate::core::{
    data::{ExtractedItem, ExtractionResult, ExtractionStats, LineIndex},
    frameworks::{Framework, FrameworkHandler},
    keymap::KeyMap,
};

#[derive(Serialize)]
struct FileOutput<'a> {
    file: String,
    framework: &'static str,
    items: Vec<ItemOutput<'a>>,
    stats: ExtractionStats,
}

#[derive(Serialize)]
struct ItemOutput<'a> {
    #[serde(flatten)]
    item: &'a ExtractedItem,
    line: usize,
    column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

struct FileExtraction {
    file: String,
    content: String,
    framework: Framework,
    result: ExtractionResult,
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let options = ctx.framework_options()?;
    let forced = ctx.framework_override(&cmd.source)?;
    let namespace = ctx.namespace(&cmd.source);
    let cwd = std::env::current_dir()?;

    let mut extractions = Vec::new();
    let mut error_count = 0;
    for path in ctx.source_files(&cmd.source.paths) {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read source file");
                error_count += 1;
                continue;
            }
        };
        let framework = forced.unwrap_or_else(|| Framework::detect(Some(path.as_path()), &content));
        let result = framework.parse(&content, &options);
        tracing::debug!(
            path = %path.display(),
            framework = framework.name(),
            extracted = result.stats.extracted_count,
            "parsed"
        );
        extractions.push(FileExtraction {
            file: display_path(&path, &cwd),
            content,
            framework,
            result,
        });
    }

    let mut keys: HashMap<(usize, usize), String> = HashMap::new();
    let mut new_key_count = 0;
    if cmd.assign {
        let key_map_path = ctx.key_map_path();
        let mut key_map = KeyMap::load(&key_map_path)?;
        for (file_index, extraction) in extractions.iter().enumerate() {
            let assignments = key_map.assign(&namespace, &extraction.result.items);
            for (item_index, assignment) in assignments.into_iter().enumerate() {
                if assignment.is_new {
                    new_key_count += 1;
                }
                keys.insert((file_index, item_index), assignment.key);
            }
        }
        if new_key_count > 0 {
            key_map.save(&key_map_path)?;
        }
    }

    if cmd.json {
        let output: Vec<FileOutput> = extractions
            .iter()
            .enumerate()
            .map(|(file_index, extraction)| {
                let index = LineIndex::new(&extraction.content);
                let items = extraction
                    .result
                    .items
                    .iter()
                    .enumerate()
                    .map(|(item_index, item)| {
                        let (line, column) = index.line_col(item.range.start);
                        ItemOutput {
                            item,
                            line,
                            column,
                            key: keys.get(&(file_index, item_index)).cloned(),
                        }
                    })
                    .collect();
                FileOutput {
                    file: extraction.file.clone(),
                    framework: extraction.framework.name(),
                    items,
                    stats: extraction.result.stats,
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mut stdout = io::stdout().lock();
        for extraction in &extractions {
            report::print_extraction_to(
                &extraction.file,
                &extraction.content,
                &extraction.result,
                &mut stdout,
            );
        }
        drop(stdout);

        let extracted: usize = extractions.iter().map(|e| e.result.stats.extracted_count).sum();
        let skipped: usize = extractions.iter().map(|e| e.result.stats.skipped_count).sum();
        report::print_success(&format!(
            "Extracted {} from {} ({} skipped)",
            plural(extracted, "string"),
            plural(extractions.len(), "file"),
            skipped
        ));
        if cmd.assign {
            println!(
                "{} {} in {}",
                "Assigned".green().bold(),
                plural(new_key_count, "new key"),
                display_path(&ctx.key_map_path(), &cwd)
            );
        }
    }

    if error_count > 0 {
        report::print_failure(&format!("{} could not be read", plural(error_count, "file")));
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}
