//! Dotfile link reconciliation engine.
//!
//! Reads an ordered list of directives from a TOML or JSON file and brings
//! the filesystem in line with them.  The `link` directive maps destination
//! paths to sources; each entry is classified against the live filesystem and
//! either created, confirmed, or reported, and the batch succeeds only if
//! every entry does.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load a config file and decode directive data
//! - **[`resources`]**: classify one link destination and act on it
//! - **[`handlers`]**: directive handlers and the dispatcher
//! - **[`commands`]**: top-level orchestration used by the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod paths;
pub mod resources;
