use itertools::Itertools;
use log::info;
use twurl_core::error::Result;
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

use super::Handler;

pub const NO_ALIASES_MESSAGE: &str =
    "No aliases exist. Set one this way: twurl alias h /1.1/statuses/home_timeline.json";
pub const NO_PATH_PROVIDED_MESSAGE: &str = "No path was provided to alias. Paths must start with a forward slash (ex. /1.1/statuses/update.json).";
pub const TOO_MANY_NAMES_MESSAGE: &str =
    "An alias takes a single name. Set one this way: twurl alias h /1.1/statuses/home_timeline.json";

/// Lists aliases, or stores the path under the one name given.
#[derive(Debug, Default, Clone, Copy)]
pub struct AliasHandler;

impl Handler for AliasHandler {
    fn command(&self) -> Command {
        Command::Alias
    }

    fn dispatch(
        &self,
        _client: &mut OAuthClient,
        config: &mut RequestConfig,
        rcfile: &mut RcFile,
    ) -> Result<()> {
        let args = config.subcommand_args.clone();
        match args.as_slice() {
            [] => {
                let aliases = rcfile.aliases();
                let listing = if aliases.is_empty() {
                    NO_ALIASES_MESSAGE.to_string()
                } else {
                    aliases
                        .iter()
                        .map(|(name, path)| format!("{name}: {path}"))
                        .join("\n")
                };
                config.output().puts(&listing)?;
            }
            [name] => match config.path.clone() {
                Some(path) => {
                    info!("Aliasing `{name}` to `{path}`");
                    rcfile.alias(name, &path)?;
                }
                None => config.output().puts(NO_PATH_PROVIDED_MESSAGE)?,
            },
            _ => config.output().puts(TOO_MANY_NAMES_MESSAGE)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{captured, quiet_config, rcfile_with};

    fn run(config: &mut RequestConfig, rcfile: &mut RcFile) {
        AliasHandler
            .dispatch(&mut OAuthClient::default(), config, rcfile)
            .unwrap();
    }

    #[test]
    fn test_no_aliases() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&[]);

        run(&mut config, &mut rcfile);

        assert_eq!(captured(&mut config), format!("{NO_ALIASES_MESSAGE}\n"));
    }

    #[test]
    fn test_store_then_list() {
        let (_dir, mut rcfile) = rcfile_with(&[]);

        let mut config = quiet_config(&["h"]);
        config.path = Some("/1.1/statuses/home_timeline.json".to_string());
        run(&mut config, &mut rcfile);
        assert_eq!(captured(&mut config), "");

        let mut config = quiet_config(&["m"]);
        config.path = Some("/1.1/statuses/mentions_timeline.json".to_string());
        run(&mut config, &mut rcfile);

        let mut config = quiet_config(&[]);
        run(&mut config, &mut rcfile);
        assert_eq!(
            captured(&mut config),
            "h: /1.1/statuses/home_timeline.json\nm: /1.1/statuses/mentions_timeline.json\n"
        );

        let reloaded = RcFile::load(rcfile.path()).unwrap();
        assert_eq!(
            reloaded.alias_from_name("h"),
            Some("/1.1/statuses/home_timeline.json")
        );
    }

    #[test]
    fn test_name_without_path() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&["h"]);

        run(&mut config, &mut rcfile);

        assert_eq!(captured(&mut config), format!("{NO_PATH_PROVIDED_MESSAGE}\n"));
        assert!(rcfile.aliases().is_empty());
    }

    #[test]
    fn test_more_than_one_name() {
        let (_dir, mut rcfile) = rcfile_with(&[]);
        let mut config = quiet_config(&["h", "home"]);
        config.path = Some("/1.1/statuses/home_timeline.json".to_string());

        run(&mut config, &mut rcfile);

        assert_eq!(captured(&mut config), format!("{TOO_MANY_NAMES_MESSAGE}\n"));
        assert!(rcfile.aliases().is_empty());
    }
}
