use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Portfolio site backend")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Start {
        /// Host to bind to (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,

    /// Add an admin account
    CreateUser {
        username: String,
        password: String,

        #[arg(long, default_value = "admin")]
        role: String,
    },

    /// Insert an image row
    AddImage {
        /// Image URL
        #[arg(long)]
        url: String,

        /// Slot type, e.g. slider or column1
        #[arg(long = "type")]
        slot_type: Option<String>,

        /// Page tag (home, about, work); repeatable
        #[arg(long = "page", required = true)]
        pages: Vec<String>,
    },
}
