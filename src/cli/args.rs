//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: List translatable strings, optionally assigning keys
//! - `rewrite`: Replace strings with translation calls using the key map
//! - `normalize`: Repair split parentheticals in rewritten JSX
//! - `sync`: Copy keys from the base locale into the other locales
//! - `sync-file`: Propagate every key of one base locale document
//! - `ensure`: Add keys to the base locale, then propagate them
//! - `diagnose`: Parse a diagnostic message
//! - `init`: Write a default `.lingorc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Rewrite(cmd)) => cmd.common.verbose,
            Some(Command::Normalize(cmd)) => cmd.common.verbose,
            Some(Command::Sync(cmd)) => cmd.common.verbose,
            Some(Command::SyncFile(cmd)) => cmd.common.verbose,
            Some(Command::Ensure(cmd)) => cmd.common.verbose,
            Some(Command::Diagnose(_)) | Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to start the config file search from (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Source rewriting options.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Force a framework instead of detecting it per file (generic, jsx, vue, blade)
    #[arg(long)]
    pub framework: Option<String>,

    /// Key namespace (overrides config file)
    #[arg(long)]
    pub namespace: Option<String>,
}

/// Locale store options.
#[derive(Debug, Clone, Args)]
pub struct LocaleArgs {
    /// Translations root (overrides config file)
    #[arg(long)]
    pub translations_root: Option<PathBuf>,

    /// Base locale (overrides config file)
    #[arg(long)]
    pub base_locale: Option<String>,

    /// Target locale; repeat for several (default: every locale under the root)
    #[arg(long = "locale")]
    pub locales: Vec<String>,

    /// Per-document write timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub source: SourceArgs,

    /// Assign keys to new strings and save them to the key map
    #[arg(long)]
    pub assign: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write changes (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Also repair split parentheticals in script files
    #[arg(long)]
    pub normalize: bool,
}

#[derive(Debug, Args)]
pub struct NormalizeCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Only repair calls with this key; repeat for several
    #[arg(long = "key")]
    pub keys: Vec<String>,

    /// Write changes (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub locale: LocaleArgs,

    /// Keys to propagate; a key naming a subtree copies all of its leaves
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Overwrite existing target values
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct SyncFileCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub locale: LocaleArgs,

    /// Base locale document whose keys are propagated
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct EnsureCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub locale: LocaleArgs,

    /// Keys to add, as `key` or `key=value`
    #[arg(required = true)]
    pub entries: Vec<String>,

    /// Overwrite base values that are supplied explicitly
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct DiagnoseCommand {
    /// Diagnostic message text
    pub message: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List translatable strings in source files
    Extract(ExtractCommand),
    /// Replace translatable strings with translation calls
    Rewrite(RewriteCommand),
    /// Repair `{t('key')}{value})` left behind by rewriting
    Normalize(NormalizeCommand),
    /// Copy keys from the base locale into every other locale
    Sync(SyncCommand),
    /// Propagate every key of a base locale document
    SyncFile(SyncFileCommand),
    /// Add keys to the base locale and propagate them
    Ensure(EnsureCommand),
    /// Parse a translation diagnostic message
    Diagnose(DiagnoseCommand),
    /// Initialize a new .lingorc.json configuration file
    Init,
}
