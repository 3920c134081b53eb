//! Configuration defaults and path utilities for twurl.
//!
//! This module provides the default request settings and resolves the
//! location of the credential store, expanding shell variables like `~`.

/// Default path for the credential store
const DEFAULT_RCFILE_PATH: &str = "~/.twurlrc";

/// Environment variable that overrides the credential store location
pub const RCFILE_PATH_ENV: &str = "TWURL_RC";

/// Host requests are sent to unless `--host` is given
pub const DEFAULT_HOST: &str = "api.twitter.com";

/// Protocol used unless `--no-ssl` is given
pub const DEFAULT_PROTOCOL: &str = "https";

/// Protocol used with `--no-ssl`
pub const INSECURE_PROTOCOL: &str = "http";

/// Overall request timeout when `--timeout` is not given
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";
pub const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";
pub const VERIFY_CREDENTIALS_PATH: &str = "/1.1/account/verify_credentials.json";

/// Resolves the credential store path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// `~/.twurlrc`. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use twurl_core::config::get_rcfile_path;
///
/// let default_path = get_rcfile_path(&None);
/// assert!(default_path.ends_with(".twurlrc"));
///
/// let custom_path = get_rcfile_path(&Some("/tmp/twurlrc".to_string()));
/// assert_eq!(custom_path, "/tmp/twurlrc");
/// ```
pub fn get_rcfile_path(rcfile_path_arg: &Option<String>) -> String {
    let rcfile_path = match rcfile_path_arg {
        Some(rcfile_path) => rcfile_path,
        None => DEFAULT_RCFILE_PATH,
    };

    shellexpand::tilde(rcfile_path).to_string()
}

/// Reads the credential store override from the environment, if any.
pub fn rcfile_path_from_env() -> Option<String> {
    std::env::var(RCFILE_PATH_ENV)
        .ok()
        .filter(|path| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_rcfile_path_with_custom_path() {
        let custom_path = Some("/custom/path/twurlrc".to_string());
        let result = get_rcfile_path(&custom_path);
        assert_eq!(result, "/custom/path/twurlrc");
    }

    #[test]
    fn test_get_rcfile_path_with_none() {
        let result = get_rcfile_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".twurlrc"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_rcfile_path_with_tilde() {
        let tilde_path = Some("~/other-twurlrc".to_string());
        let result = get_rcfile_path(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("other-twurlrc"));
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_HOST, "api.twitter.com");
        assert_eq!(DEFAULT_PROTOCOL, "https");
        assert_eq!(INSECURE_PROTOCOL, "http");
    }
}
