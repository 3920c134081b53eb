//! Twurl Core Library
//!
//! This crate provides the core functionality for twurl, a command-line tool
//! for sending OAuth 1.0a signed requests to a REST API and managing the
//! credentials used to sign them.
//!
//! # Key Features
//!
//! - **Request Configuration**: A single per-invocation [`request_config::RequestConfig`]
//!   with defaults resolved at read time
//! - **Credential Store**: YAML rcfile holding profiles, the default profile and aliases
//! - **OAuth 1.0a**: HMAC-SHA1 signing, xAuth and PIN-based authorization
//! - **Output Sinks**: Flushing write targets, including a captured sink for quiet mode
//! - **Error Handling**: One error type for every domain failure
//!
//! # Examples
//!
//! Resolving request defaults:
//!
//! ```
//! use twurl_core::request_config::RequestConfig;
//!
//! let mut config = RequestConfig::new();
//! config.add_data("status=hello");
//! assert_eq!(config.request_method(), "post");
//! assert_eq!(config.base_url(), "https://api.twitter.com");
//! ```

pub mod config;
pub mod error;
pub mod oauth;
pub mod output;
pub mod rcfile;
pub mod request_config;
