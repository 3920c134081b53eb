//! The OAuth client: profile selection, authorization and signed requests.

pub mod signer;

use std::io::Write;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::blocking::{Client, Request, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Proxy, StatusCode};

use crate::config::{
    ACCESS_TOKEN_PATH, AUTHORIZE_PATH, DEFAULT_TIMEOUT_SECS, REQUEST_TOKEN_PATH,
    VERIFY_CREDENTIALS_PATH,
};
use crate::error::{Error, Result};
use crate::output::OutputSink;
use crate::rcfile::{Profile, RcFile};
use crate::request_config::{Command, RequestConfig};

pub use signer::Signer;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A temporary token from the first leg of the PIN flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthClient {
    pub username: Option<String>,
    pub password: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub token: Option<String>,
    pub secret: Option<String>,
}

impl From<&Profile> for OAuthClient {
    fn from(profile: &Profile) -> Self {
        Self {
            username: Some(profile.username.clone()),
            password: None,
            consumer_key: Some(profile.consumer_key.clone()),
            consumer_secret: Some(profile.consumer_secret.clone()),
            token: Some(profile.token.clone()),
            secret: Some(profile.secret.clone()),
        }
    }
}

impl OAuthClient {
    /// Picks the client for this invocation.
    ///
    /// A stored profile matching the given username and consumer key wins.
    /// A username alone selects that user's only stored profile, except when
    /// authorizing. Otherwise a username (or the `authorize` command) builds a
    /// new client from the command-line credentials, and anything else uses
    /// the default profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the default profile is needed but none is set, or it
    /// no longer exists.
    pub fn load_from_options(config: &RequestConfig, rcfile: &RcFile) -> Result<Self> {
        let username = config.username.as_deref();
        let consumer_key = config.consumer_key.as_deref();

        if let (Some(username), Some(consumer_key)) = (username, consumer_key) {
            if rcfile.has_profile(Some(username), Some(consumer_key)) {
                debug!("Using stored profile for `{username}`");
                return Self::load_client_for_username_and_consumer_key(
                    rcfile,
                    username,
                    consumer_key,
                );
            }
        }

        if let (Some(username), None) = (username, consumer_key) {
            if config.command != Command::Authorize && rcfile.profiles_for(username).is_some() {
                debug!("Using the stored profile for `{username}`");
                return Self::load_client_for_username(rcfile, username);
            }
        }

        if username.is_some() || config.command == Command::Authorize {
            debug!("Building client from command-line credentials");
            return Ok(Self::from_options(config));
        }

        Self::load_default_client(rcfile)
    }

    /// A client holding exactly the credentials given on the command line.
    #[must_use]
    pub fn from_options(config: &RequestConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            token: config.access_token.clone(),
            secret: config.token_secret.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::NoProfile`] if nothing is stored for the pair.
    pub fn load_client_for_username_and_consumer_key(
        rcfile: &RcFile,
        username: &str,
        consumer_key: &str,
    ) -> Result<Self> {
        rcfile
            .profile(username, consumer_key)
            .map(Self::from)
            .ok_or_else(|| Error::NoProfile(username.to_string()))
    }

    /// Loads the only profile stored for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user has no profile or more than one consumer key.
    pub fn load_client_for_username(rcfile: &RcFile, username: &str) -> Result<Self> {
        let profiles = rcfile
            .profiles_for(username)
            .filter(|profiles| !profiles.is_empty())
            .ok_or_else(|| Error::NoProfile(username.to_string()))?;

        if profiles.len() > 1 {
            return Err(Error::AmbiguousConsumerKey(username.to_string()));
        }

        Ok(profiles.values().next().map(Self::from).unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns [`Error::MustAuthorizeFirst`] if no default profile is set.
    pub fn load_default_client(rcfile: &RcFile) -> Result<Self> {
        let (username, consumer_key) = rcfile
            .default_profile()
            .ok_or(Error::MustAuthorizeFirst)?;
        Self::load_client_for_username_and_consumer_key(rcfile, username, consumer_key)
    }

    #[must_use]
    pub fn needs_to_authorize(&self) -> bool {
        self.token.is_none() || self.secret.is_none()
    }

    /// The stored form of this client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] for the first field still unset.
    pub fn to_profile(&self) -> Result<Profile> {
        Ok(Profile {
            username: required(self.username.as_ref(), "username")?,
            consumer_key: required(self.consumer_key.as_ref(), "consumer key")?,
            consumer_secret: required(self.consumer_secret.as_ref(), "consumer secret")?,
            token: required(self.token.as_ref(), "access token")?,
            secret: required(self.secret.as_ref(), "token secret")?,
        })
    }

    /// Signs with the consumer credentials only.
    fn consumer_signer(&self) -> Result<Signer<'_>> {
        let consumer_key = self
            .consumer_key
            .as_deref()
            .ok_or(Error::MissingCredential("consumer key"))?;
        let consumer_secret = self
            .consumer_secret
            .as_deref()
            .ok_or(Error::MissingCredential("consumer secret"))?;

        Ok(Signer::new(consumer_key, consumer_secret))
    }

    fn signer(&self) -> Result<Signer<'_>> {
        let signer = self.consumer_signer()?;
        Ok(match (&self.token, &self.secret) {
            (Some(token), Some(secret)) => signer.with_token(token, secret),
            _ => signer,
        })
    }

    /// Trades username and password for an access token (xAuth).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorizationFailed`] if the credentials are rejected.
    pub fn exchange_credentials_for_access_token(&mut self, config: &RequestConfig) -> Result<()> {
        let username = self
            .username
            .clone()
            .ok_or(Error::MissingCredential("username"))?;
        let password = self
            .password
            .clone()
            .ok_or(Error::MissingCredential("password"))?;

        let url = format!("{}{ACCESS_TOKEN_PATH}", config.base_url());
        let params = vec![
            ("x_auth_username".to_string(), username),
            ("x_auth_password".to_string(), password),
            ("x_auth_mode".to_string(), "client_auth".to_string()),
        ];
        let header = self
            .consumer_signer()?
            .authorization_header("POST", &url, &params, &[])?;

        info!("Exchanging credentials for an access token at {url}");
        let response = http_client(config)?
            .post(&url)
            .header(AUTHORIZATION, header)
            .form(&params)
            .send()?;

        self.apply_token_response(&url, response)
    }

    /// First leg of the PIN flow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorizationFailed`] if the consumer is rejected.
    pub fn request_token(&self, config: &RequestConfig) -> Result<RequestToken> {
        let url = format!("{}{REQUEST_TOKEN_PATH}", config.base_url());
        let header = self.consumer_signer()?.authorization_header(
            "POST",
            &url,
            &[],
            &[("oauth_callback", "oob")],
        )?;

        let response = http_client(config)?
            .post(&url)
            .header(AUTHORIZATION, header)
            .send()?;
        let body = token_response_body(&url, response)?;

        let token = form_value(&body, "oauth_token")
            .ok_or_else(|| Error::unexpected_response(&url, "missing oauth_token"))?;
        let secret = form_value(&body, "oauth_token_secret")
            .ok_or_else(|| Error::unexpected_response(&url, "missing oauth_token_secret"))?;

        Ok(RequestToken { token, secret })
    }

    /// Where the user grants access and receives a PIN.
    #[must_use]
    pub fn authorize_url(config: &RequestConfig, request_token: &RequestToken) -> String {
        format!(
            "{}{AUTHORIZE_PATH}?oauth_token={}",
            config.base_url(),
            signer::percent_encode(&request_token.token)
        )
    }

    /// Last leg of the PIN flow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorizationFailed`] if the PIN is rejected.
    pub fn exchange_pin_for_access_token(
        &mut self,
        config: &RequestConfig,
        request_token: &RequestToken,
        pin: &str,
    ) -> Result<()> {
        let url = format!("{}{ACCESS_TOKEN_PATH}", config.base_url());
        let header = self
            .consumer_signer()?
            .with_token(&request_token.token, &request_token.secret)
            .authorization_header("POST", &url, &[], &[("oauth_verifier", pin)])?;

        let response = http_client(config)?
            .post(&url)
            .header(AUTHORIZATION, header)
            .send()?;

        self.apply_token_response(&url, response)
    }

    fn apply_token_response(&mut self, url: &str, response: Response) -> Result<()> {
        let body = token_response_body(url, response)?;

        self.token = Some(
            form_value(&body, "oauth_token")
                .ok_or_else(|| Error::unexpected_response(url, "missing oauth_token"))?,
        );
        self.secret = Some(
            form_value(&body, "oauth_token_secret")
                .ok_or_else(|| Error::unexpected_response(url, "missing oauth_token_secret"))?,
        );
        if let Some(screen_name) = form_value(&body, "screen_name") {
            self.username = Some(screen_name);
        }

        Ok(())
    }

    /// Stores this client in the rcfile, looking up the username first if unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the username lookup fails or the rcfile cannot be saved.
    pub fn save(&mut self, config: &RequestConfig, rcfile: &mut RcFile) -> Result<()> {
        if self.username.is_none() {
            self.username = Some(self.verify_credentials(config)?);
        }
        rcfile.add_profile(self.to_profile()?)
    }

    fn verify_credentials(&self, config: &RequestConfig) -> Result<String> {
        let url = format!("{}{VERIFY_CREDENTIALS_PATH}", config.base_url());
        let header = self.signer()?.authorization_header("GET", &url, &[], &[])?;

        let response = http_client(config)?
            .get(&url)
            .header(AUTHORIZATION, header)
            .send()?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized(url));
        }

        let body: serde_json::Value = response.json()?;
        body.get("screen_name")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| Error::unexpected_response(&url, "missing screen_name"))
    }

    /// Sends the request described by `config` and writes the response body to
    /// its output sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built, signed or sent, or the
    /// output cannot be written.
    pub fn perform_request_from_options(&self, config: &mut RequestConfig) -> Result<()> {
        let path = config.path.clone().ok_or(Error::NoUri)?;
        let url = format!("{}{path}", config.base_url());
        let method_name = config.request_method().to_uppercase();
        let method = Method::from_bytes(method_name.as_bytes())
            .map_err(|_| Error::InvalidMethod(method_name.clone()))?;

        let form: Vec<(String, String)> = if config.raw_data.is_some() {
            Vec::new()
        } else {
            config
                .data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };
        let header = self
            .signer()?
            .authorization_header(&method_name, &url, &form, &[])?;

        info!("{method_name} {url}");
        let client = http_client(config)?;
        let mut request = client
            .request(method, &url)
            .header(AUTHORIZATION, header);
        request = with_headers(request, config)?;

        if let Some(raw_data) = &config.raw_data {
            let has_content_type = config
                .headers
                .keys()
                .any(|key| key.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !has_content_type {
                request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
            }
            request = request.body(raw_data.clone());
        } else if !form.is_empty() {
            request = request.form(&form);
        }

        let request = request.build()?;
        let trace = config.trace;
        let json_pretty = config.json_pretty;
        let output = config.output();

        if trace {
            trace_request(output, &request)?;
        }

        let mut response = client.execute(request)?;
        if !response.status().is_success() {
            warn!("{url} responded with {}", response.status());
        }

        if trace {
            trace_response(output, &response)?;
        }

        if json_pretty {
            let body = response.text()?;
            output.puts(&pretty_json(&body))?;
        } else {
            response.copy_to(output)?;
            output.flush()?;
        }

        Ok(())
    }
}

fn required(value: Option<&String>, name: &'static str) -> Result<String> {
    value.cloned().ok_or(Error::MissingCredential(name))
}

fn http_client(config: &RequestConfig) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(
        config.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
    ));

    if let Some(connection_timeout) = config.connection_timeout {
        builder = builder.connect_timeout(Duration::from_secs(connection_timeout));
    }

    if let Some(proxy) = config.proxy() {
        let proxy_url = if proxy.contains("://") {
            proxy.to_string()
        } else {
            format!("http://{proxy}")
        };
        debug!("Using proxy {proxy_url}");
        builder = builder.proxy(
            Proxy::all(proxy_url.as_str())
                .map_err(|e| Error::InvalidProxy(proxy.to_string(), e.to_string()))?,
        );
    }

    Ok(builder.build()?)
}

fn with_headers(mut request: RequestBuilder, config: &RequestConfig) -> Result<RequestBuilder> {
    for (key, value) in &config.headers {
        let Some(value) = value else {
            warn!("Skipping header `{key}` without a value");
            continue;
        };
        if reqwest::header::HeaderName::from_bytes(key.as_bytes()).is_err() {
            return Err(Error::InvalidHeader(key.clone(), value.clone()));
        }
        request = request.header(key.as_str(), value.as_str());
    }
    Ok(request)
}

/// Writes the request line, headers and body, each line prefixed with `> `.
fn trace_request(output: &mut OutputSink, request: &Request) -> Result<()> {
    output.puts(&format!("> {} {}", request.method(), request.url()))?;
    for (name, value) in request.headers() {
        output.puts(&format!(
            "> {}: {}",
            name,
            value.to_str().unwrap_or("<binary>")
        ))?;
    }
    output.puts(">")?;
    if let Some(body) = request.body().and_then(|body| body.as_bytes()) {
        for line in String::from_utf8_lossy(body).lines() {
            output.puts(&format!("> {line}"))?;
        }
    }
    Ok(())
}

fn trace_response(output: &mut OutputSink, response: &Response) -> Result<()> {
    output.puts(&format!("< {:?} {}", response.version(), response.status()))?;
    for (name, value) in response.headers() {
        output.puts(&format!(
            "< {}: {}",
            name,
            value.to_str().unwrap_or("<binary>")
        ))?;
    }
    output.puts("")?;
    Ok(())
}

fn token_response_body(url: &str, response: Response) -> Result<String> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(Error::AuthorizationFailed),
        status if status.is_success() => Ok(response.text()?),
        status => Err(Error::unexpected_response(url, status.to_string())),
    }
}

fn form_value(body: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn pretty_json(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}
