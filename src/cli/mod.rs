//! CLI module
//!
//! Command-line interface for exporting Front collections.
//!
//! # Commands
//!
//! - `fetch` - Collect every page of one or more collections
//! - `get` - Fetch a single resource (e.g. an attachment)
//! - `inboxes` - List inboxes

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{write_json_lines, Runner};
