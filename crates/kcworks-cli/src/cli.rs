//! CLI argument definitions for the KCWorks bibliography toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use kcworks_model::SortKey;

#[derive(Parser)]
#[command(
    name = "kcworks",
    version,
    about = "KCWorks bibliography toolkit - fetch, sort and format bibliographic records",
    long_about = "Run a KCWorks bibliographic query through the full pipeline:\n\
                  validate, fetch from the proxy, normalize and sort the records,\n\
                  and format them into a bibliography with a citation style and locale."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
    /// Run a query through the pipeline and print the bibliography.
    Render(RenderArgs),

    /// List the styles and locales available under the assets directory.
    Assets(AssetsArgs),
}

#[derive(Parser)]
pub struct RenderArgs {
    /// KCWorks query string (e.g. "orcid:0000-0001-2345-6789").
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Citation style identifier.
    #[arg(long, default_value = "apa")]
    pub style: String,

    /// Locale identifier (unsupported locales fall back to en-US).
    #[arg(long, default_value = "en-US")]
    pub locale: String,

    /// Sort order for the results.
    #[arg(long, value_enum, default_value = "newest")]
    pub sort: SortArg,

    /// Base URL of the site hosting the KCWorks proxy.
    #[arg(
        long = "proxy-url",
        value_name = "URL",
        default_value = "https://hcommons.org"
    )]
    pub proxy_url: String,

    /// Assets directory holding styles/ and locales/ (default: KCWORKS_ASSETS_DIR or the bundled assets).
    #[arg(long = "assets-dir", value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Emit the outcome as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct AssetsArgs {
    /// Assets directory holding styles/ and locales/.
    #[arg(long = "assets-dir", value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Newest,
    Oldest,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => Self::Newest,
            SortArg::Oldest => Self::Oldest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum LogFormatArg {
    #[default]
    Pretty,
    Compact,
    Json,
}
