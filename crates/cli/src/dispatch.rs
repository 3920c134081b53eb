//! Routing a finished configuration to its command handler.

use log::debug;
use twurl_core::error::Result;
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

use crate::commands::{
    AccountsHandler, AliasHandler, AuthorizeHandler, Handler, RequestHandler, SetHandler,
};

/// The one handler for `command`.
#[must_use]
pub fn handler_for(command: Command) -> &'static dyn Handler {
    match command {
        Command::Authorize => &AuthorizeHandler,
        Command::Accounts => &AccountsHandler,
        Command::Alias => &AliasHandler,
        Command::Set => &SetHandler,
        Command::Request => &RequestHandler,
    }
}

/// Loads the OAuth client for this run and hands it to the command's handler.
///
/// # Errors
///
/// Returns the domain error raised while choosing the client or by the handler.
pub fn dispatch(config: &mut RequestConfig, rcfile: &mut RcFile) -> Result<()> {
    let handler = handler_for(config.command);
    debug!("Dispatching `{}`", handler.command());

    let mut client = OAuthClient::load_from_options(config, rcfile)?;
    handler.dispatch(&mut client, config, rcfile)
}
