//! CLI module for Keygate
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API server
//! - `keygen`: provision an API key from the command line

pub mod keygen;
pub mod serve;

use clap::{Parser, Subcommand};

/// Keygate - account-scoped API key management service
#[derive(Parser)]
#[command(name = "keygate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Provision an API key and print the secret once
    Keygen(keygen::KeygenArgs),
}
