//! Command-line arguments for `genie`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "genie",
    version,
    about = "Validate center flat-file submissions and upload them",
    long_about = "Validate a center's flat-file submission against the registered file types.\n\n\
                  The file type is recognized from the filenames unless --filetype is given.\n\
                  Valid submissions are uploaded to --parentid, or to the center's input\n\
                  folder with --upload-to-center-input."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Config file (default: ./genie.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate one submission and upload it when valid.
    Validate(ValidateCommand),

    /// List the file types registered by the configured packages.
    Formats(FormatsCommand),
}

#[derive(Args)]
pub struct PackageArgs {
    /// Format registry packages to load, in order. Later packages override
    /// file types registered by earlier ones.
    #[arg(long = "format-registry-packages", value_name = "PACKAGE", num_args = 1..)]
    pub format_registry_packages: Vec<String>,

    /// Skip unknown packages instead of failing.
    #[arg(long = "skip-missing-packages")]
    pub skip_missing_packages: bool,
}

#[derive(Args)]
pub struct ValidateCommand {
    /// Files of the submission.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Center code of the submitting center.
    #[arg(long = "center")]
    pub center: String,

    /// Use this file type instead of recognizing it from the filenames.
    #[arg(long = "filetype", value_name = "KEY")]
    pub filetype: Option<String>,

    /// Upload destination; must be a folder the caller can read.
    #[arg(long = "parentid", value_name = "ID")]
    pub parentid: Option<String>,

    /// Oncotree URL to validate codes against.
    #[arg(long = "oncotree-link", value_name = "URL")]
    pub oncotree_link: Option<String>,

    /// Skip gene symbol checks.
    #[arg(long = "nosymbol-check")]
    pub nosymbol_check: bool,

    /// Project holding the location mapping.
    #[arg(long = "project-id", value_name = "ID")]
    pub project_id: Option<String>,

    /// Upload to the center's input folder when --parentid is not given.
    #[arg(long = "upload-to-center-input", conflicts_with = "parentid")]
    pub upload_to_center_input: bool,

    /// Local platform store directory.
    #[arg(long = "store", value_name = "DIR")]
    pub store: Option<PathBuf>,

    #[command(flatten)]
    pub packages: PackageArgs,
}

#[derive(Args)]
pub struct FormatsCommand {
    #[command(flatten)]
    pub packages: PackageArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
