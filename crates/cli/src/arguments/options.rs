//! Applies parsed flags to a fresh [`RequestConfig`].
//!
//! `--tutorial`, `--help` and `--version` end the run before anything else is
//! applied. Credentials come next, prompting for any flag given without a
//! value, and `--quiet` is applied last so those prompts stay visible.

use log::debug;
use twurl_core::error::Result;
use twurl_core::request_config::RequestConfig;

use crate::arguments::extraction::Extracted;
use crate::cli_args::Args;
use crate::prompt::Prompt;

/// Narrative help printed by `--tutorial`.
pub const TUTORIAL: &str = include_str!("../../resources/tutorial.txt");

/// What to do once the flags have been applied.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Dispatch this configuration.
    Run(Box<RequestConfig>),
    /// Print this text and exit successfully without dispatching.
    Exit(String),
}

/// Text for the first `--tutorial`, `--help` or `--version` among `remaining`.
///
/// Runs before the flag grammar, so these flags end the run even when other
/// arguments would not parse. Scanning stops at `--`.
#[must_use]
pub fn terminating_flag_text(remaining: &[String]) -> Option<String> {
    remaining
        .iter()
        .take_while(|arg| arg.as_str() != "--")
        .find_map(|arg| match arg.as_str() {
            "-T" | "--tutorial" => Some(TUTORIAL.to_string()),
            "-h" | "--help" => Some(Args::usage()),
            "-v" | "--version" => Some(Args::version_string()),
            _ => None,
        })
}

/// Builds the configuration for this run from the extracted command and path
/// and the parsed flags.
///
/// # Errors
///
/// Returns an error if prompting for a missing credential fails.
pub fn build_config(
    args: Args,
    extracted: Extracted,
    prompt: &mut impl Prompt,
) -> Result<ParseOutcome> {
    if args.tutorial {
        return Ok(ParseOutcome::Exit(TUTORIAL.to_string()));
    }
    if args.help {
        return Ok(ParseOutcome::Exit(Args::usage()));
    }
    if args.version {
        return Ok(ParseOutcome::Exit(Args::version_string()));
    }

    let mut config = RequestConfig::new();
    config.command = extracted.command;
    config.path = extracted.path;
    config.subcommand_args = args.subcommand_args;
    debug!(
        "Command `{}`, path {:?}, arguments {:?}",
        config.command, config.path, config.subcommand_args
    );

    config.consumer_key = value_or_prompt(args.consumer_key, "Consumer key", prompt, &mut config)?;
    config.consumer_secret =
        value_or_prompt(args.consumer_secret, "Consumer secret", prompt, &mut config)?;
    config.access_token = args.access_token;
    config.token_secret = args.token_secret;
    config.username = args.username;
    config.password = value_or_prompt(args.password, "Password", prompt, &mut config)?;

    config.trace = args.trace;
    for data in &args.data {
        config.add_data(data);
    }
    config.raw_data = args.raw_data;
    for header in &args.headers {
        config.add_header(header);
    }
    config.host = args.host;
    if args.no_ssl {
        config.disable_ssl();
    }
    config.request_method = args.request_method.map(|method| method.to_lowercase());
    config.proxy = args.proxy;
    config.json_pretty = args.json_pretty;
    config.timeout = args.timeout;
    config.connection_timeout = args.connection_timeout;

    if args.quiet {
        config.quiet();
    }

    Ok(ParseOutcome::Run(Box::new(config)))
}

/// An inline value is used as given; a flag without one prompts; no flag means no value.
fn value_or_prompt(
    flag: Option<Option<String>>,
    label: &str,
    prompt: &mut impl Prompt,
    config: &mut RequestConfig,
) -> Result<Option<String>> {
    match flag {
        Some(Some(value)) => Ok(Some(value)),
        Some(None) => prompt.secret(label, config.output()).map(Some),
        None => Ok(None),
    }
}
