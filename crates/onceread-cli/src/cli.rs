use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "onceread",
    about = "onceread: store a note, read it exactly once",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP gateway
    Serve(ServeArgs),
    /// Store content and print its key
    Put(PutArgs),
    /// Read and destroy the entry under a key
    Take(TakeArgs),
    /// Check whether a key is well-formed
    CheckKey(CheckKeyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Use a file-backed store at this directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct PutArgs {
    /// Content to store, or `-` to read stdin
    pub content: String,
    #[arg(long, default_value = "./onceread-data")]
    pub data_dir: PathBuf,
    /// Maximum content length in characters
    #[arg(long, default_value_t = onceread_gate::DEFAULT_MAX_CHARS)]
    pub max_chars: usize,
}

#[derive(Args)]
pub struct TakeArgs {
    pub key: String,
    #[arg(long, default_value = "./onceread-data")]
    pub data_dir: PathBuf,
}

#[derive(Args)]
pub struct CheckKeyArgs {
    pub key: String,
}
