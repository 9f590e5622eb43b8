//! CLI command implementations, one module per subcommand.

pub mod jobs;
pub mod migrate;
pub mod seed;
pub mod serve;
