//! Command handlers.
//!
//! Each sub-command has one handler. A handler gets the OAuth client chosen
//! for this run, the request configuration and the credential store, and
//! writes everything it has to say to the configuration's output sink.
//!
//! # Handlers
//!
//! - [`authorize`]: obtain and store an access token
//! - [`accounts`]: list authorized accounts
//! - [`alias`]: list or store path aliases
//! - [`set`]: change stored settings
//! - [`request`]: send a signed request (the default)

pub mod accounts;
pub mod alias;
pub mod authorize;
pub mod request;
pub mod set;

use twurl_core::error::Result;
use twurl_core::oauth::OAuthClient;
use twurl_core::rcfile::RcFile;
use twurl_core::request_config::{Command, RequestConfig};

pub use accounts::AccountsHandler;
pub use alias::AliasHandler;
pub use authorize::AuthorizeHandler;
pub use request::RequestHandler;
pub use set::SetHandler;

/// A sub-command implementation.
pub trait Handler {
    /// The command this handler runs for.
    fn command(&self) -> Command;

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the command cannot complete.
    fn dispatch(
        &self,
        client: &mut OAuthClient,
        config: &mut RequestConfig,
        rcfile: &mut RcFile,
    ) -> Result<()>;
}
