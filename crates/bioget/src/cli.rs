//! CLI types and struct definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use url::Url;

use bioget_core::{Error, Result};

/// Log output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliLogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Structured JSON output.
    Json,
}

impl From<CliLogFormat> for bioget_core::LogFormat {
    fn from(fmt: CliLogFormat) -> Self {
        match fmt {
            CliLogFormat::Text => bioget_core::LogFormat::Text,
            CliLogFormat::Json => bioget_core::LogFormat::Json,
        }
    }
}

const DOWNLOAD_EXAMPLES: &str = "Examples:

    # Download OriginalFile 2 to local_file
    bioget download OriginalFile:2 local_file
    # Bare ids assume OriginalFile; '-' writes to stdout
    bioget download 2 -

    # Download the OriginalFile linked to FileAnnotation 20
    bioget download FileAnnotation:20 my_file

    # Download the OriginalFile linked to Image 5
    # Works only for images whose fileset holds a single file
    bioget download Image:5 original_image
";

/// Download original files from a bio-image data server.
#[derive(Debug, Parser)]
#[command(
    name = "bioget",
    version,
    about = "Download original files from a bio-image data server"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Server base URL
    #[arg(
        long = "server",
        global = true,
        env = "BIOGET_SERVER",
        value_name = "URL"
    )]
    pub server: Option<Url>,

    /// Key of the established server session
    #[arg(
        short = 'k',
        long = "session-key",
        global = true,
        env = "BIOGET_SESSION_KEY",
        value_name = "KEY"
    )]
    pub session_key: Option<String>,

    /// Connection timeout in seconds (per request)
    #[arg(
        long = "connect-timeout",
        global = true,
        default_value = "10",
        value_name = "SECONDS"
    )]
    pub connect_timeout_secs: u64,

    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log to file instead of stderr
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(long = "log-format", global = true, default_value = "text")]
    pub log_format: CliLogFormat,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download the referenced file to a local path or stdout
    #[command(after_long_help = DOWNLOAD_EXAMPLES)]
    Download(DownloadArgs),
}

/// Arguments for the download subcommand.
#[derive(Debug, Parser)]
pub struct DownloadArgs {
    /// Object to download, of form <Kind>:<id>. OriginalFile is assumed
    /// if <Kind>: is omitted
    #[arg(value_name = "OBJECT")]
    pub object: String,

    /// Local filename to be saved to. '-' for stdout
    #[arg(value_name = "FILENAME")]
    pub filename: String,
}

impl Cli {
    /// Connection timeout (per request).
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The configured server URL, or a session error when missing.
    pub fn server(&self) -> Result<&Url> {
        self.server.as_ref().ok_or_else(|| Error::Session {
            message: "no server specified (use --server or BIOGET_SERVER)".to_string(),
        })
    }
}
