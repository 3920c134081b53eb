//! The per-invocation request configuration.
//!
//! One [`RequestConfig`] is built for each run from parsed arguments and handed
//! to exactly one dispatch. Settings with defaults are stored unresolved and
//! resolved when read, so a later change before the first read is observed.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::config::{DEFAULT_HOST, DEFAULT_PROTOCOL, INSECURE_PROTOCOL};
use crate::output::OutputSink;

/// The sub-command selected for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    Authorize,
    Accounts,
    Alias,
    Set,
    /// Generic signed request; used whenever no reserved name is given.
    #[default]
    Request,
}

impl Command {
    /// Names that are consumed as a sub-command when they are the first argument.
    pub const RESERVED: [&'static str; 4] = ["authorize", "accounts", "alias", "set"];

    /// Looks up a reserved sub-command by its exact name.
    #[must_use]
    pub fn from_reserved(token: &str) -> Option<Self> {
        match token {
            "authorize" => Some(Self::Authorize),
            "accounts" => Some(Self::Accounts),
            "alias" => Some(Self::Alias),
            "set" => Some(Self::Set),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::Accounts => "accounts",
            Self::Alias => "alias",
            Self::Set => "set",
            Self::Request => "request",
        }
    }
}

impl Display for Command {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

#[derive(Debug, Default)]
pub struct RequestConfig {
    pub command: Command,
    pub path: Option<String>,
    pub subcommand_args: Vec<String>,

    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    pub token_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    pub host: Option<String>,
    pub protocol: Option<String>,
    pub request_method: Option<String>,
    pub proxy: Option<String>,

    /// Form body pairs; a repeated key keeps the last value.
    pub data: IndexMap<String, String>,
    /// Body sent verbatim instead of `data`.
    pub raw_data: Option<String>,
    /// Extra headers. `None` marks a header given without a `": "` separator.
    pub headers: IndexMap<String, Option<String>>,

    pub trace: bool,
    pub json_pretty: bool,
    pub timeout: Option<u64>,
    pub connection_timeout: Option<u64>,

    /// Overrides the default standard output sink for this invocation.
    pub output: Option<OutputSink>,
}

impl RequestConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lower-cased HTTP verb.
    ///
    /// An explicit `--request-method` wins. Otherwise requests carrying a body
    /// are `post` and everything else is `get`.
    #[must_use]
    pub fn request_method(&self) -> String {
        if let Some(method) = &self.request_method {
            return method.to_lowercase();
        }

        if self.data.is_empty() && self.raw_data.is_none() {
            "get".to_string()
        } else {
            "post".to_string()
        }
    }

    #[must_use]
    pub fn protocol(&self) -> &str {
        self.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL)
    }

    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol(), self.host())
    }

    /// Switches to plain HTTP.
    pub fn disable_ssl(&mut self) {
        self.protocol = Some(INSECURE_PROTOCOL.to_string());
    }

    /// Redirects all further output for this invocation to an in-memory buffer.
    pub fn quiet(&mut self) {
        self.output = Some(OutputSink::captured());
    }

    /// The output sink for this invocation, resolved to standard output on first use.
    pub fn output(&mut self) -> &mut OutputSink {
        self.output.get_or_insert_with(OutputSink::stdout)
    }

    /// Adds every `key=value` pair of an `&`-joined data string.
    ///
    /// Each pair is split on its first `=`; a pair without one stores an empty value.
    /// Empty segments (`-d ""`, `a=1&&b=2`) add nothing.
    pub fn add_data(&mut self, data: &str) {
        for pair in data.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            self.data.insert(key.to_string(), value.to_string());
        }
    }

    /// Adds a `"Key: Value"` header, splitting on the first `": "`.
    ///
    /// Without the separator the whole string becomes the key with no value.
    pub fn add_header(&mut self, header: &str) {
        match header.split_once(": ") {
            Some((key, value)) => {
                self.headers.insert(key.to_string(), Some(value.to_string()));
            }
            None => {
                self.headers.insert(header.to_string(), None);
            }
        }
    }
}
