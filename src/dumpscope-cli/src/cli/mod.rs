//! CLI argument definitions for dumpscope
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;

pub use core::{Cli, Commands, FilterArgs, SourceArgs};
