//! CLI subcommands

pub mod resources;
