//! Turning raw process arguments into a [`twurl_core::request_config::RequestConfig`].
//!
//! Processing happens in two stages:
//! - **Extraction**: the sub-command and API path are pulled out of the raw
//!   arguments, command first
//! - **Options**: the rest is parsed by the flag grammar and applied to a
//!   fresh configuration, prompting for credentials given without a value

pub mod extraction;
pub mod options;

pub use extraction::extract;
pub use extraction::Extracted;
pub use options::build_config;
pub use options::terminating_flag_text;
pub use options::ParseOutcome;
