use twurl_core::error::Result;
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

use super::Handler;

pub const NO_ACCOUNTS_MESSAGE: &str = "No authorized accounts";

/// Lists every authorized username with its consumer keys, marking the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccountsHandler;

impl Handler for AccountsHandler {
    fn command(&self) -> Command {
        Command::Accounts
    }

    fn dispatch(
        &self,
        _client: &mut OAuthClient,
        config: &mut RequestConfig,
        rcfile: &mut RcFile,
    ) -> Result<()> {
        let output = config.output();

        if rcfile.profiles().is_empty() {
            output.puts(NO_ACCOUNTS_MESSAGE)?;
            return Ok(());
        }

        let default_profile = rcfile.default_profile();
        for (username, profiles) in rcfile.profiles() {
            output.puts(username)?;
            for consumer_key in profiles.keys() {
                let is_default =
                    default_profile == Some((username.as_str(), consumer_key.as_str()));
                if is_default {
                    output.puts(&format!("  {consumer_key} (default)"))?;
                } else {
                    output.puts(&format!("  {consumer_key}"))?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{captured, quiet_config, rcfile_with};

    #[test]
    fn test_no_accounts() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&[]);

        AccountsHandler
            .dispatch(&mut OAuthClient::default(), &mut config, &mut rcfile)
            .unwrap();

        assert_eq!(captured(&mut config), "No authorized accounts\n");
    }

    #[test]
    fn test_lists_accounts_sorted_with_default_marked() {
        let (_dir, mut rcfile) = rcfile_with(&[("bob", "key2"), ("alice", "key3"), ("alice", "key1")]);
        let mut config = quiet_config(&[]);

        AccountsHandler
            .dispatch(&mut OAuthClient::default(), &mut config, &mut rcfile)
            .unwrap();

        assert_eq!(
            captured(&mut config),
            "alice\n  key1\n  key3\nbob\n  key2 (default)\n"
        );
    }
}
