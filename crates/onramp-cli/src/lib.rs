//! # onramp-cli
//!
//! The `onramp` command-line tool.
//!
//! This crate provides:
//! - the platform catalog and route table listings
//! - a scripted signup wizard run against the hosted backend or in memory
//! - listing and inspecting the current identity's signup attempts
//! - config file management (`path`, `show`, `get`, `init`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::OnrampConfig;
