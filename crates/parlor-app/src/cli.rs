use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "parlor", version, about = "Pocket chat-room terminal client")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the TOML config file.
    #[arg(short, long, global = true, default_value = "parlor.toml")]
    pub config: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Connect to the configured server and run the chat terminal.
    Run,
    /// Validate the config file and the credential against the server.
    Check,
    /// Create a new user account on the server.
    Register { username: String, password: String },
    Version,
}
