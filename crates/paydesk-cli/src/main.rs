//! Interactive terminal client for the paydesk support assistant.

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use paydesk_application::ChatService;
use paydesk_core::config::EngineConfig;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "paydesk")]
#[command(about = "Paydesk - payments support chat assistant", long_about = None)]
struct Cli {
    /// Path to a TOML file overriding the engine configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Idle seconds before a session is evicted (overrides the config file).
    #[arg(long, value_name = "SECS")]
    idle_timeout: Option<u64>,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            EngineConfig::from_toml_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    if let Some(secs) = cli.idle_timeout {
        config.session_idle_timeout_secs = secs;
    }

    let service = Arc::new(ChatService::in_memory(config));
    service.start_eviction_scheduler();

    // One fresh conversation per process; the server issues the real id.
    let client_key = Uuid::new_v4().to_string();

    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== Paydesk Support ===".bright_magenta().bold());
    println!(
        "{}",
        "Chat with Penny about payments, refunds, and transactions. Type 'quit' to exit."
            .bright_black()
    );
    println!();

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "/quit" || trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                let _ = rl.add_history_entry(trimmed);

                match service.handle_message(&client_key, trimmed).await {
                    Ok(reply) => {
                        for line in reply.response.lines() {
                            println!("{}", line.bright_blue());
                        }
                        if reply.feedback_request {
                            println!("{}", "(reply with a number from 1 to 5)".bright_black());
                        }
                        println!();
                    }
                    Err(error) => {
                        eprintln!("{}", format!("error: {error}").red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(error) => {
                eprintln!("{}", format!("readline error: {error:?}").red());
                break;
            }
        }
    }

    Ok(())
}
