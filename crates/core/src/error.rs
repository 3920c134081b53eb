use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("You must authorize first.")]
    MustAuthorizeFirst,

    #[error("You need to authorize first.")]
    NeedsAuthorization,

    #[error("No profile for {}", .0)]
    NoProfile(String),

    #[error(
        "There is more than one consumer key associated with {}. Please specify which consumer key you want as well.",
        .0
    )]
    AmbiguousConsumerKey(String),

    #[error("No URI specified")]
    NoUri,

    #[error("Missing required credential: {}", .0)]
    MissingCredential(&'static str),

    #[error("Authorization failed. Check that your consumer key is correct.")]
    AuthorizationFailed,

    #[error("Unauthorized: {}", .0)]
    Unauthorized(String),

    #[error("Unexpected response from `{}`: {}", .url, .reason)]
    UnexpectedResponse { url: String, reason: String },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("HTTP error: {}", .0)]
    Http(#[from] reqwest::Error),

    #[error("Invalid request method: `{}`", .0)]
    InvalidMethod(String),

    #[error("Invalid header `{}`: {}", .0, .1)]
    InvalidHeader(String, String),

    #[error("Invalid proxy `{}`: {}", .0, .1)]
    InvalidProxy(String, String),

    #[error("Error signing request: {}", .0)]
    Signing(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn unexpected_response(url: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
