//! CLI argument definitions.

use clap::Parser;

/// Top-level CLI parser for `group-sync`.
///
/// The sync takes no arguments; everything is driven by the environment
/// (see [`crate::config::Config`]).
#[derive(Debug, Parser)]
#[command(name = "group-sync", version, about = "Mirror Backstage team hierarchies into the DevLake team table")]
pub struct Cli {}
