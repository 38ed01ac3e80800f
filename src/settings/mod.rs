//! Runtime configuration: a TOML file picked per build profile, overridable
//! with `--settings <path>` on the command line.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
