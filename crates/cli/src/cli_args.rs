//! Command-line flag grammar.
//!
//! This module defines the flags twurl accepts using the `clap` crate. The
//! sub-command and API path are pulled out of the raw arguments before this
//! grammar runs (see [`crate::arguments::extraction`]); whatever clap does not
//! recognise as a flag ends up in [`Args::subcommand_args`].

use clap::{ArgAction, CommandFactory, Parser};

/// Name used for usage output and as the program name handed to clap.
pub const BIN_NAME: &str = "twurl";

/// Command-line flags for the twurl CLI tool.
///
/// # Examples
///
/// ```rust
/// use twurl_cli::cli_args::Args;
///
/// let args = Args::from_remaining(&["-d".to_string(), "status=hi".to_string()]).unwrap();
/// assert_eq!(args.data, vec!["status=hi".to_string()]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(
    name = BIN_NAME,
    term_width = 0, // Just to make testing across clap features easier
    disable_help_flag = true,
    disable_version_flag = true,
    override_usage = "twurl [options] [command] [/api/path] [command-specific args...]",
    about = "Send OAuth 1.0a signed requests to a REST API from the terminal.",
    after_help = "Commands: authorize, accounts, alias, set (anything else sends a request)"
)]
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Narrative explanation of how to use twurl.
    #[arg(short = 'T', long)]
    pub tutorial: bool,

    /// Your consumer key (prompted for when no value is given).
    #[arg(short = 'c', long, value_name = "KEY", num_args = 0..=1)]
    pub consumer_key: Option<Option<String>>,

    /// Your consumer secret (prompted for when no value is given).
    #[arg(short = 's', long, value_name = "SECRET", num_args = 0..=1)]
    pub consumer_secret: Option<Option<String>>,

    /// Your access token.
    #[arg(short = 'a', long, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Your token secret.
    #[arg(short = 'S', long, value_name = "SECRET")]
    pub token_secret: Option<String>,

    /// Username of account to authorize (required).
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Password of account to authorize (prompted for when no value is given).
    #[arg(short = 'p', long, num_args = 0..=1)]
    pub password: Option<Option<String>>,

    /// Trace request/response traffic.
    #[arg(short = 't', long, overrides_with = "no_trace")]
    pub trace: bool,

    /// Do not trace request/response traffic (default).
    #[arg(long, overrides_with = "trace")]
    pub no_trace: bool,

    /// Sends the specified data in a POST request to the HTTP server.
    ///
    /// Pairs are joined with `&`, e.g. `-d "status=hello&lat=1.5"`.
    #[arg(short = 'd', long, action = ArgAction::Append)]
    pub data: Vec<String>,

    /// Sends the specified data as it is in a POST request to the HTTP server.
    #[arg(short = 'r', long)]
    pub raw_data: Option<String>,

    /// Adds the specified header to the request to the HTTP server.
    ///
    /// Headers take the form `"Key: Value"`.
    #[arg(short = 'A', long = "header", value_name = "HEADER", action = ArgAction::Append)]
    pub headers: Vec<String>,

    /// Specify host to make requests to (default: api.twitter.com).
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Suppress all output (default: output is printed to STDOUT).
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable SSL (default: SSL is enabled).
    #[arg(short = 'U', long)]
    pub no_ssl: bool,

    /// Request method (default: GET, or POST when data is sent).
    #[arg(short = 'X', long, value_name = "METHOD")]
    pub request_method: Option<String>,

    /// Specify HTTP proxy to forward requests to (default: no proxy).
    #[arg(short = 'P', long)]
    pub proxy: Option<String>,

    /// Pretty-print JSON responses.
    #[arg(short = 'j', long)]
    pub json_pretty: bool,

    /// Number of seconds to wait for the request to complete.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of seconds to wait for the connection to open.
    #[arg(long, value_name = "SECS")]
    pub connection_timeout: Option<u64>,

    /// Show this message.
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Show version.
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Arguments passed through to the selected command.
    pub subcommand_args: Vec<String>,
}

impl Args {
    /// Parses the arguments left after the command and path were extracted.
    ///
    /// # Errors
    ///
    /// Returns a clap usage error for unknown flags or missing flag values.
    pub fn from_remaining(remaining: &[String]) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once(BIN_NAME.to_string()).chain(remaining.iter().cloned()))
    }

    /// The full usage statement.
    #[must_use]
    pub fn usage() -> String {
        Self::command().render_long_help().to_string()
    }

    #[must_use]
    pub fn version_string() -> String {
        format!("{BIN_NAME} {}", env!("CARGO_PKG_VERSION"))
    }
}
