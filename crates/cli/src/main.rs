use std::env;
use std::process::ExitCode;

use log::debug;
use twurl_cli::arguments::{build_config, extract, terminating_flag_text, ParseOutcome};
use twurl_cli::cli_args::Args;
use twurl_cli::dispatch::dispatch;
use twurl_cli::prompt::SecurePrompt;
use twurl_core::config::{get_rcfile_path, rcfile_path_from_env};
use twurl_core::error::Result;
use twurl_core::output::OutputSink;
use twurl_core::rcfile::RcFile;

fn execute() -> Result<()> {
    let extracted = extract(env::args().skip(1).collect());
    if let Some(text) = terminating_flag_text(&extracted.remaining) {
        OutputSink::stdout().puts(&text)?;
        return Ok(());
    }

    let args = Args::from_remaining(&extracted.remaining).unwrap_or_else(|e| e.exit());

    let mut config = match build_config(args, extracted, &mut SecurePrompt)? {
        ParseOutcome::Run(config) => config,
        ParseOutcome::Exit(text) => {
            OutputSink::stdout().puts(&text)?;
            return Ok(());
        }
    };

    let rcfile_path = get_rcfile_path(&rcfile_path_from_env());
    debug!("rcfile path: `{rcfile_path}`");
    let mut rcfile = RcFile::load(&rcfile_path)?;

    dispatch(&mut config, &mut rcfile)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = OutputSink::stderr().puts(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
