//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::PromptMode;

/// Recursion helper: build LLM prompts and split answers into sections and a recursion tree
#[derive(Parser, Debug)]
#[command(name = "rectree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Project directory holding .rectree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the model prompt for a question or code snippet
    Prompt {
        /// Kind of input
        #[arg(value_enum)]
        mode: ModeArg,
        /// Question or code (default: --file, then stdin)
        content: Option<String>,
        /// Read content from file
        #[arg(short, long, value_hint = ValueHint::FilePath, conflicts_with = "content")]
        file: Option<PathBuf>,
        /// Print a generateContent request body instead of plain text
        #[arg(long)]
        payload: bool,
    },

    /// Split a model answer into sections and recursion tree
    Split {
        /// Answer file (default or '-': stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Input is a generateContent response body
        #[arg(short, long)]
        envelope: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Draw only the recursion tree of a model answer
    Tree {
        /// Answer file (default or '-': stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Input is a generateContent response body
        #[arg(short, long)]
        envelope: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Question,
    Code,
}

impl From<ModeArg> for PromptMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Question => PromptMode::Question,
            ModeArg::Code => PromptMode::Code,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
