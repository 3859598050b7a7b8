//! CLI argument definitions for the question bank.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qbank_core::QuestionFilter;

#[derive(Parser)]
#[command(
    name = "qbank",
    version,
    about = "Question bank - keep questions in a JSON file and export question papers",
    long_about = "Keep exam questions (text, optional image, subject and topic) in a \
                  single JSON file.\n\n\
                  Questions can be filtered, edited and deleted, and any selection can \
                  be exported as a .docx paper with one question per page."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Question file to use instead of the configured one.
    #[arg(long = "data-file", value_name = "PATH", global = true)]
    pub data_file: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new question.
    Add(AddArgs),

    /// Change fields of an existing question.
    Edit(EditArgs),

    /// List questions, optionally filtered.
    List(FilterArgs),

    /// List the subject filter choices.
    Subjects,

    /// List the topic filter choices.
    Topics,

    /// Delete a question after confirmation.
    Delete(DeleteArgs),

    /// Export selected questions as a question paper.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Question text.
    #[arg(long = "text")]
    pub text: String,

    #[arg(long = "subject", default_value = "")]
    pub subject: String,

    #[arg(long = "topic", default_value = "")]
    pub topic: String,

    /// Image to attach (png, jpg or jpeg).
    #[arg(long = "image", value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Id of the question to edit.
    #[arg(value_name = "ID")]
    pub id: u64,

    #[arg(long = "text")]
    pub text: Option<String>,

    #[arg(long = "subject")]
    pub subject: Option<String>,

    #[arg(long = "topic")]
    pub topic: Option<String>,

    /// Replacement image (png, jpg or jpeg). The current image is kept when omitted.
    #[arg(long = "image", value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text to look for in the question text.
    #[arg(long = "search")]
    pub search: Option<String>,

    /// Only questions with this subject ("All" for any).
    #[arg(long = "subject")]
    pub subject: Option<String>,

    /// Only questions with this topic ("All" for any).
    #[arg(long = "topic")]
    pub topic: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> QuestionFilter {
        QuestionFilter {
            search_text: self.search.clone(),
            subject: self.subject.clone(),
            topic: self.topic.clone(),
        }
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Id of the question to delete.
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Args, Default)]
pub struct ExportArgs {
    /// Comma-separated ids to export.
    #[arg(long = "ids", value_delimiter = ',', conflicts_with = "all")]
    pub ids: Vec<u64>,

    /// Export every question matching the filters.
    #[arg(long = "all")]
    pub all: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file (default: <output_dir>/question_paper_<YYYYMMDD>.docx).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a text outline instead of writing a document.
    #[arg(long = "outline")]
    pub outline: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
