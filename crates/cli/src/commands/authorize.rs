use log::{debug, info};
use twurl_core::error::Result;
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

use super::Handler;
use crate::prompt::prompt_line;

pub const AUTHORIZATION_SUCCESSFUL_MESSAGE: &str = "Authorization successful";

/// Obtains an access token for the client and stores it.
///
/// With a password the token comes straight from xAuth. Without one the
/// user is sent to the authorize URL and asked for the PIN shown there.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizeHandler;

impl Handler for AuthorizeHandler {
    fn command(&self) -> Command {
        Command::Authorize
    }

    fn dispatch(
        &self,
        client: &mut OAuthClient,
        config: &mut RequestConfig,
        rcfile: &mut RcFile,
    ) -> Result<()> {
        if client.password.is_some() {
            debug!("Authorizing with username and password");
            client.exchange_credentials_for_access_token(config)?;
        } else {
            let request_token = client.request_token(config)?;
            let url = OAuthClient::authorize_url(config, &request_token);
            let output = config.output();
            output.puts(&format!("Go to {url} and paste in the supplied PIN"))?;
            let pin = prompt_line("PIN", output)?;
            client.exchange_pin_for_access_token(config, &request_token, pin.trim())?;
        }

        client.save(config, rcfile)?;
        info!("Stored access token in `{}`", rcfile.path());
        config.output().puts(AUTHORIZATION_SUCCESSFUL_MESSAGE)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet_config, rcfile_with};
    use twurl_core::error::Error;

    #[test]
    fn test_authorize_requires_consumer_credentials() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&[]);
        let mut client = OAuthClient {
            username: Some("alice".to_string()),
            password: Some("secret".to_string()),
            ..OAuthClient::default()
        };

        let result = AuthorizeHandler.dispatch(&mut client, &mut config, &mut rcfile);

        assert!(matches!(result, Err(Error::MissingCredential("consumer key"))));
        assert!(rcfile.profiles().is_empty());
    }

    #[test]
    fn test_pin_flow_requires_consumer_credentials() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&[]);
        let mut client = OAuthClient {
            consumer_key: Some("key".to_string()),
            ..OAuthClient::default()
        };

        let result = AuthorizeHandler.dispatch(&mut client, &mut config, &mut rcfile);

        assert!(matches!(result, Err(Error::MissingCredential("consumer secret"))));
    }
}
