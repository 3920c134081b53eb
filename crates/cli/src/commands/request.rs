use log::debug;
use twurl_core::error::{Error, Result};
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

use super::Handler;

pub const NO_URI_MESSAGE: &str = "No URI specified";

/// Sends a signed request for the path, or for the path of the first alias
/// named in the arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestHandler;

impl Handler for RequestHandler {
    fn command(&self) -> Command {
        Command::Request
    }

    fn dispatch(
        &self,
        client: &mut OAuthClient,
        config: &mut RequestConfig,
        rcfile: &mut RcFile,
    ) -> Result<()> {
        if client.needs_to_authorize() {
            return Err(Error::NeedsAuthorization);
        }

        if config.path.is_none() {
            config.path = rcfile
                .alias_from_args(&config.subcommand_args)
                .map(ToString::to_string);
            debug!("Path from alias: {:?}", config.path);
        }

        match client.perform_request_from_options(config) {
            Err(Error::NoUri) => {
                config.output().puts(NO_URI_MESSAGE)?;
                Ok(())
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{captured, profile, quiet_config, rcfile_with};

    fn authorized_client() -> OAuthClient {
        OAuthClient::from(&profile("alice", "key1"))
    }

    #[test]
    fn test_requires_authorization() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&[]);
        config.path = Some("/1.1/statuses/home_timeline.json".to_string());
        let mut client = OAuthClient {
            consumer_key: Some("key".to_string()),
            consumer_secret: Some("secret".to_string()),
            ..OAuthClient::default()
        };

        let result = RequestHandler.dispatch(&mut client, &mut config, &mut rcfile);

        assert!(matches!(result, Err(Error::NeedsAuthorization)));
        assert_eq!(captured(&mut config), "");
    }

    #[test]
    fn test_no_path_and_no_alias() {
        let (_dir, mut rcfile) = rcfile_with(&[("alice", "key1")]);
        rcfile.alias("h", "/1.1/statuses/home_timeline.json").unwrap();
        let mut config = quiet_config(&["unknown"]);

        RequestHandler
            .dispatch(&mut authorized_client(), &mut config, &mut rcfile)
            .unwrap();

        assert_eq!(config.path, None);
        assert_eq!(captured(&mut config), "No URI specified\n");
    }

    #[test]
    fn test_invalid_method_is_reported_after_alias_lookup() {
        let (_dir, mut rcfile) = rcfile_with(&[("alice", "key1")]);
        rcfile.alias("h", "/1.1/statuses/home_timeline.json").unwrap();
        let mut config = quiet_config(&["extra", "h"]);
        config.request_method = Some("not a method".to_string());

        let result = RequestHandler.dispatch(&mut authorized_client(), &mut config, &mut rcfile);

        assert_eq!(
            config.path.as_deref(),
            Some("/1.1/statuses/home_timeline.json")
        );
        assert!(matches!(result, Err(Error::InvalidMethod(_))));
    }
}
