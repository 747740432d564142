//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, RenderArgs};
pub use commands::{
    digest, handle_config_action, init_config, load_config, resolve_options, run_render, CliError,
};
pub use enums::{GlyphSetArg, SegmentationArg};
