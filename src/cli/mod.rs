//! Command-line interface module.

mod args;
mod common;
pub mod init;
pub mod play;
pub mod resolve;

pub use args::{CatalogKind, Cli, Commands, DiscoverArgs};
