//! End-to-end tests of the argument pipeline: extraction, flag parsing,
//! configuration and dispatch against a temporary rcfile.

use twurl_cli::arguments::{build_config, extract, ParseOutcome};
use twurl_cli::cli_args::Args;
use twurl_cli::dispatch::dispatch;
use twurl_cli::prompt::Prompt;
use twurl_core::error::{Error, Result};
use twurl_core::output::OutputSink;
use twurl_core::rcfile::{Profile, RcFile};
use twurl_core::request_config::{Command, RequestConfig};

/// Fails the test if anything is prompted for.
struct NoPrompt;

impl Prompt for NoPrompt {
    fn secret(&mut self, label: &str, _output: &mut OutputSink) -> Result<String> {
        panic!("Unexpected prompt for {label}");
    }
}

fn parse(args: &[&str]) -> RequestConfig {
    let extracted = extract(args.iter().map(ToString::to_string).collect());
    let parsed = Args::from_remaining(&extracted.remaining).unwrap();
    match build_config(parsed, extracted, &mut NoPrompt).unwrap() {
        ParseOutcome::Run(config) => *config,
        ParseOutcome::Exit(text) => panic!("Unexpected exit: {text}"),
    }
}

fn run(args: &[&str], rcfile: &mut RcFile) -> (Result<()>, String) {
    let mut config = parse(args);
    config.quiet();
    let result = dispatch(&mut config, rcfile);
    let output = String::from_utf8(config.output().captured_output().unwrap().to_vec()).unwrap();
    (result, output)
}

fn authorized_rcfile() -> (tempfile::TempDir, RcFile) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twurlrc");
    let mut rcfile = RcFile::load(path.to_str().unwrap()).unwrap();
    for (username, consumer_key) in [("alice", "key1"), ("bob", "key2")] {
        rcfile
            .add_profile(Profile {
                username: username.to_string(),
                consumer_key: consumer_key.to_string(),
                consumer_secret: "consumer-secret".to_string(),
                token: "token".to_string(),
                secret: "token-secret".to_string(),
            })
            .unwrap();
    }
    (dir, rcfile)
}

#[test]
fn test_accounts_listing() {
    let (_dir, mut rcfile) = authorized_rcfile();

    let (result, output) = run(&["accounts"], &mut rcfile);

    assert!(result.is_ok());
    assert_eq!(output, "alice\n  key1 (default)\nbob\n  key2\n");
}

#[test]
fn test_alias_then_set_default_then_accounts() {
    let (_dir, mut rcfile) = authorized_rcfile();

    let (result, output) = run(&["alias", "h", "/1.1/statuses/home_timeline.json"], &mut rcfile);
    assert!(result.is_ok());
    assert_eq!(output, "");

    let (_, output) = run(&["alias"], &mut rcfile);
    assert_eq!(output, "h: /1.1/statuses/home_timeline.json\n");

    let (result, output) = run(&["set", "default", "bob"], &mut rcfile);
    assert!(result.is_ok());
    assert_eq!(output, "Default account set to bob\n");

    let reloaded = RcFile::load(rcfile.path()).unwrap();
    assert_eq!(reloaded.default_profile(), Some(("bob", "key2")));
    assert_eq!(
        reloaded.alias_from_name("h"),
        Some("/1.1/statuses/home_timeline.json")
    );
}

#[test]
fn test_request_without_path_or_alias() {
    let (_dir, mut rcfile) = authorized_rcfile();

    let (result, output) = run(&["-t", "nothing-here"], &mut rcfile);

    assert!(result.is_ok());
    assert_eq!(output, "No URI specified\n");
}

#[test]
fn test_unknown_user_must_authorize() {
    let (_dir, mut rcfile) = authorized_rcfile();

    let (result, _) = run(&["-u", "carol", "/1.1/statuses/home_timeline.json"], &mut rcfile);

    assert!(matches!(result, Err(Error::NeedsAuthorization)));
}

#[test]
fn test_empty_rcfile_must_authorize_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twurlrc");
    let mut rcfile = RcFile::load(path.to_str().unwrap()).unwrap();

    let (result, output) = run(&["/1.1/statuses/home_timeline.json"], &mut rcfile);

    assert_eq!(result.unwrap_err().to_string(), "You must authorize first.");
    assert_eq!(output, "");
    assert!(!path.exists());
}

#[test]
fn test_reserved_name_after_path_is_not_a_command() {
    let config = parse(&["/1.1/statuses/home_timeline.json", "accounts"]);

    assert_eq!(config.command, Command::Request);
    assert_eq!(config.path.as_deref(), Some("/1.1/statuses/home_timeline.json"));
    assert_eq!(config.subcommand_args, vec!["accounts".to_string()]);
}

#[test]
fn test_full_request_configuration() {
    let config = parse(&[
        "-X",
        "DELETE",
        "-A",
        "X-Foo: bar",
        "-d",
        "id=1&id=2",
        "-H",
        "localhost:3000",
        "-U",
        "-P",
        "localhost:8080",
        "/1.1/statuses/destroy.json",
    ]);

    assert_eq!(config.request_method(), "delete");
    assert_eq!(config.base_url(), "http://localhost:3000");
    assert_eq!(config.proxy(), Some("localhost:8080"));
    assert_eq!(config.data.len(), 1);
    assert_eq!(config.data["id"], "2");
    assert_eq!(config.headers["X-Foo"].as_deref(), Some("bar"));
}

#[test]
fn test_unknown_flag_never_reaches_configuration() {
    let extracted = extract(vec!["--bogus".to_string(), "/1.1/x.json".to_string()]);

    assert_eq!(extracted.path.as_deref(), Some("/1.1/x.json"));
    assert!(Args::from_remaining(&extracted.remaining).is_err());
}
