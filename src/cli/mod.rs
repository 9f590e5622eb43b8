//! Command-line interface: `serve`, `migrate`, `jobs` and `seed`.

pub mod args;

pub use args::{Cli, Commands};
