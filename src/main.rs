//! cleanpaste - Clipboard Text Cleaner for Linux
//!
//! Runs as a daemon: press the global hotkey and the clipboard text is
//! normalized in place (incidental line-wrapping collapsed, paragraph
//! breaks and list items preserved).

use anyhow::Result;
use clap::{Parser, Subcommand};
use cleanpaste::clipboard::ClipboardHandle;
use cleanpaste::config::Config;
use cleanpaste::core;
use cleanpaste::daemon::Daemon;
use cleanpaste::ipc::IpcClient;
use std::io::Read;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean text once: stdin to stdout, or the clipboard in place
    Clean {
        /// Clean the clipboard in place instead of stdin/stdout
        #[arg(long)]
        clipboard: bool,
    },
    /// Show daemon status
    Status,
    /// Stop the running daemon
    Stop,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Some(Command::Clean { clipboard }) => clean_once(clipboard),
        Some(Command::Status) => status(),
        Some(Command::Stop) => stop(),
        None => {
            info!("✂️ cleanpaste v{} starting...", env!("CARGO_PKG_VERSION"));
            Daemon::new(config).run().await
        }
    }
}

/// One-shot clean without a running daemon
fn clean_once(use_clipboard: bool) -> Result<()> {
    if use_clipboard {
        let mut clipboard = ClipboardHandle::new()?;
        let text = clipboard.read_text()?;
        let cleaned = core::clean(&text);
        clipboard.write_text(&cleaned)?;
        info!(
            "✂️ Cleaned clipboard: {} -> {} chars",
            text.chars().count(),
            cleaned.chars().count()
        );
        return Ok(());
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    // Hand the text to the daemon when one is up, otherwise clean locally;
    // the result is identical either way since the core is pure.
    let cleaned = if IpcClient::is_daemon_running() {
        IpcClient::send_clean(&input)?.unwrap_or_else(|| core::clean(&input))
    } else {
        core::clean(&input)
    };

    println!("{}", cleaned);
    Ok(())
}

fn status() -> Result<()> {
    match IpcClient::get_status() {
        Ok(Some((listening, cleans_performed))) => {
            println!(
                "cleanpaste daemon: {} ({} cleans this session)",
                if listening { "running" } else { "paused" },
                cleans_performed
            );
        }
        _ => println!("cleanpaste daemon: not running"),
    }
    Ok(())
}

fn stop() -> Result<()> {
    if !IpcClient::is_daemon_running() {
        println!("cleanpaste daemon: not running");
        return Ok(());
    }

    if IpcClient::send_shutdown()? {
        println!("cleanpaste daemon: stopping");
    } else {
        println!("cleanpaste daemon: shutdown already in progress");
    }
    Ok(())
}
