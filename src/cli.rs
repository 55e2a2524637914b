use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "roxy-scaffold")]
#[command(about = "Start a local Roxy flag server and seed it for integration tests")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Recreate the container and seed flags (default if no subcommand given)
    Run,

    /// Stop the Roxy container
    Stop,
}
