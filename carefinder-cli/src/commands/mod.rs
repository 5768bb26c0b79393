//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`init`] - Write a default configuration file
//! - [`search`] - Find and rank facilities near a point

pub mod init;
pub mod search;
