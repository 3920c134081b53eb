//! OAuth 1.0a request signing (HMAC-SHA1).

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use sha1::Sha1;
use url::Url;

use crate::error::{Error, Result};

/// Everything except the RFC 3986 unreserved characters gets encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Signs requests for one consumer and, once authorized, one access token.
#[derive(Debug, Clone)]
pub struct Signer<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: Option<&'a str>,
    token_secret: Option<&'a str>,
}

impl<'a> Signer<'a> {
    #[must_use]
    pub fn new(consumer_key: &'a str, consumer_secret: &'a str) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token: None,
            token_secret: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: &'a str, token_secret: &'a str) -> Self {
        self.token = Some(token);
        self.token_secret = Some(token_secret);
        self
    }

    /// Builds the `Authorization` header value for a request.
    ///
    /// `params` are the form body parameters; query parameters are read from
    /// `url`. `oauth_extras` (such as `oauth_callback` or `oauth_verifier`) are
    /// signed and sent in the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the clock is before the epoch.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        oauth_extras: &[(&str, &str)],
    ) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Signing(format!("Failed to get timestamp: {e}")))?
            .as_secs()
            .to_string();

        self.authorization_header_with(
            method,
            url,
            params,
            oauth_extras,
            &generate_nonce(),
            &timestamp,
        )
    }

    /// Same as [`Signer::authorization_header`] with a fixed nonce and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        oauth_extras: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.to_string()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            (
                "oauth_signature_method".to_string(),
                "HMAC-SHA1".to_string(),
            ),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        if let Some(token) = self.token {
            oauth_params.push(("oauth_token".to_string(), token.to_string()));
        }
        for (key, value) in oauth_extras {
            oauth_params.push(((*key).to_string(), (*value).to_string()));
        }

        let signature = self.signature(method, url, params, &oauth_params)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {header}"))
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        oauth_params: &[(String, String)],
    ) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| Error::Signing(format!("`{url}`: {e}")))?;

        let mut all_params: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
            .collect();
        all_params.extend(
            params
                .iter()
                .chain(oauth_params)
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        );
        all_params.sort();

        let param_string = all_params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(&normalize_url(&parsed)),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(self.consumer_secret),
            percent_encode(self.token_secret.unwrap_or(""))
        );

        hmac_sha1(&signing_key, &base_string)
    }
}

/// Scheme, host, non-default port and path; no query or fragment.
fn normalize_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    match url.port() {
        Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
        None => format!("{}://{host}{}", url.scheme(), url.path()),
    }
}

/// Percent-encode a string according to RFC 3986.
#[must_use]
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Generate a random 32 hex character nonce.
fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hmac_sha1(key: &str, data: &str) -> Result<String> {
    type HmacSha1 = Hmac<Sha1>;

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| Error::Signing(e.to_string()))?;
    mac.update(data.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
