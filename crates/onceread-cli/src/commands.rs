use std::io::Read;

use anyhow::Context;
use colored::Colorize;
use onceread_gate::{GateConfig, Sanitizer, ValidationError};
use onceread_server::{BackendConfig, OnceReadServer, ServerConfig};
use onceread_store::Vault;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Put(args) => cmd_put(args),
        Command::Take(args) => cmd_take(args),
        Command::CheckKey(args) => cmd_check_key(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = args.data_dir {
        config.backend = BackendConfig::File { root };
    }

    let server = OnceReadServer::new(config).context("failed to prepare storage")?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_put(args: PutArgs) -> anyhow::Result<()> {
    let raw = if args.content == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        bytes
    } else {
        args.content.into_bytes()
    };

    let sanitizer = Sanitizer::new(GateConfig {
        max_chars: args.max_chars,
    });
    let text = sanitizer.check_bytes(&raw)?;
    let content = sanitizer.sanitize(text);

    let vault = Vault::open_dir(&args.data_dir)?;
    let key = vault.create(&content)?;
    println!("{} Stored {} characters", "✓".green().bold(), content.len_chars());
    println!("  Key: {}", key.to_string().yellow());
    Ok(())
}

fn cmd_take(args: TakeArgs) -> anyhow::Result<()> {
    let vault = Vault::open_dir(&args.data_dir)?;
    match vault.consume_once(&args.key)? {
        Some(content) => {
            println!("{content}");
            Ok(())
        }
        None => {
            eprintln!("{} not found", "✗".red().bold());
            std::process::exit(1);
        }
    }
}

fn cmd_check_key(args: CheckKeyArgs) -> anyhow::Result<()> {
    if !onceread_types::is_well_formed(&args.key) {
        return Err(ValidationError::MalformedKey.into());
    }
    println!("{} well-formed", "✓".green().bold());
    Ok(())
}
