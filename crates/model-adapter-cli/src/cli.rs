//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Model Adapter CLI - adapt source documents into models and restore them
///
/// Reads an adapter schema (JSON or YAML), applies it to a source document
/// and prints the resulting model, or restores a model back into the
/// source shape.
#[derive(Parser, Debug)]
#[command(
    name = "model-adapter",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MODEL_ADAPTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Adapt a source document into a model
    Adapt(AdaptArgs),

    /// Restore a model back into the source shape
    Restore(RestoreArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the adapt command
#[derive(Parser, Debug)]
pub struct AdaptArgs {
    /// Path to the adapter schema (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub adapters: PathBuf,

    /// Path to the source document; when omitted only defaults are filled in,
    /// nothing is validated and keys without a default are left out
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Only keep the keys declared in the adapter schema
    #[arg(long, conflicts_with = "live")]
    pub no_copy: bool,

    /// Build a live-binding model instead of a copying one
    #[arg(long)]
    pub live: bool,

    /// Defaults document merged beneath the source (live models only)
    #[arg(short, long, value_name = "FILE", requires = "live")]
    pub defaults: Option<PathBuf>,

    /// Print validation diagnostics to stderr
    #[arg(long)]
    pub show_diagnostics: bool,
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Path to the adapter schema (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub adapters: PathBuf,

    /// Path to the model document to restore (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub model: PathBuf,

    /// Restore only the declared keys instead of copying the whole model
    #[arg(long)]
    pub no_copy: bool,

    /// Only print the value at this source path
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Compact JSON output
    Json,
    /// Pretty-printed JSON output
    #[default]
    JsonPretty,
    /// YAML output
    Yaml,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
