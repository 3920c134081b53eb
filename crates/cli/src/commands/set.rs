use log::info;
use twurl_core::error::{Error, Result};
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

use super::Handler;

pub const DEFAULT_SETTING: &str = "default";
pub const SET_DEFAULT_USAGE: &str = "Usage: twurl set default USERNAME [CONSUMER_KEY]";

/// Changes stored settings. Only `default` is recognized.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetHandler;

impl Handler for SetHandler {
    fn command(&self) -> Command {
        Command::Set
    }

    fn dispatch(
        &self,
        _client: &mut OAuthClient,
        config: &mut RequestConfig,
        rcfile: &mut RcFile,
    ) -> Result<()> {
        let args = config.subcommand_args.clone();
        let Some((setting, values)) = args.split_first() else {
            config.output().puts(SET_DEFAULT_USAGE)?;
            return Ok(());
        };

        if setting != DEFAULT_SETTING {
            config
                .output()
                .puts(&format!("Unrecognized setting: '{setting}'"))?;
            return Ok(());
        }

        let message = match values {
            [username] => {
                let client = OAuthClient::load_client_for_username(rcfile, username)?;
                let consumer_key = client
                    .consumer_key
                    .ok_or(Error::MissingCredential("consumer key"))?;
                set_default(rcfile, username, &consumer_key)?
            }
            [username, consumer_key] => {
                if rcfile.profile(username, consumer_key).is_none() {
                    return Err(Error::NoProfile(username.clone()));
                }
                set_default(rcfile, username, consumer_key)?
            }
            _ => SET_DEFAULT_USAGE.to_string(),
        };

        config.output().puts(&message)?;
        Ok(())
    }
}

fn set_default(rcfile: &mut RcFile, username: &str, consumer_key: &str) -> Result<String> {
    info!("Setting default profile to `{username}`");
    rcfile.set_default_profile(username, consumer_key)?;
    Ok(format!("Default account set to {username}"))
}
