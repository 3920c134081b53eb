//! Twurl CLI Library
//!
//! This crate provides the command-line interface for twurl: turning process
//! arguments into a request configuration, prompting for credentials that
//! were left off the command line, and running the selected command.
//!
//! # Architecture
//!
//! - [`arguments`]: sub-command and path extraction, then flag application
//! - [`cli_args`]: the flag grammar
//! - [`prompt`]: echo-free credential prompts
//! - [`dispatch`]: picks the handler for the command and runs it
//! - [`commands`]: the handlers themselves
//!
//! # Examples
//!
//! ```bash
//! # Authorize an account (prompts for the consumer secret)
//! twurl authorize -c key -s
//!
//! # GET a path with the default account
//! twurl /1.1/statuses/home_timeline.json
//!
//! # POST form data
//! twurl -d 'status=hello world' /1.1/statuses/update.json
//!
//! # Alias a path and use it
//! twurl alias h /1.1/statuses/home_timeline.json
//! twurl h
//! ```

pub mod arguments;
pub mod cli_args;
pub mod commands;
pub mod dispatch;
pub mod prompt;
