//! Daemon event loop
//!
//! Wires the shell together: global hotkey → clipboard read → normalizer
//! core → clipboard write → audio cue, with the IPC server running
//! alongside for CLI queries and shutdown.

use crate::audit;
use crate::clipboard::ClipboardHandle;
use crate::config::Config;
use crate::core;
use crate::error::CleanResult;
use crate::feedback::{Cue, SoundEngine};
use crate::hotkey::{HotkeyChord, HotkeyListener};
use crate::ipc::server::ServerContext;
use crate::ipc::{IpcClient, IpcServer};
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// The cleanpaste daemon
pub struct Daemon {
    config: Config,
}

impl Daemon {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run until a shutdown request arrives over IPC
    pub async fn run(self) -> Result<()> {
        // Single instance: a live socket means another daemon owns the hotkey
        if IpcClient::is_daemon_running() {
            bail!("Another cleanpaste daemon is already running");
        }

        let cleans_performed = Arc::new(AtomicU64::new(0));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let mut server = IpcServer::new();
        server.start(ServerContext {
            cleans_performed: cleans_performed.clone(),
            shutdown: shutdown_tx,
        })?;

        let engine = if self.config.sound_feedback {
            match SoundEngine::new(PathBuf::from(&self.config.custom_audio_dir)) {
                Ok(engine) => Some(engine),
                Err(e) => {
                    warn!("🔇 Sound feedback disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let chord = HotkeyChord::from_config(&self.config)?;
        let (hotkey_tx, mut hotkey_rx) = mpsc::channel::<()>(1);
        let listener = HotkeyListener::spawn(chord, hotkey_tx)?;
        info!(
            "✂️ cleanpaste ready - press {}+{} to clean the clipboard ({} keyboards)",
            self.config.hotkey_modifiers.join("+"),
            self.config.hotkey_key,
            listener.device_count
        );

        loop {
            tokio::select! {
                Some(()) = hotkey_rx.recv() => {
                    Self::clean_cycle(&cleans_performed, engine.as_ref());
                }
                _ = shutdown_rx.recv() => {
                    info!("👋 Shutdown requested");
                    break;
                }
                else => break,
            }
        }

        server.stop();
        Ok(())
    }

    /// One hotkey-triggered clean: read, normalize, write back, give feedback
    fn clean_cycle(cleans_performed: &AtomicU64, engine: Option<&SoundEngine>) {
        match Self::clean_clipboard() {
            Ok((before, after)) => {
                let count = cleans_performed.fetch_add(1, Ordering::SeqCst) + 1;
                info!("✂️ Cleaned clipboard: {} -> {} chars (#{})", before, after, count);
                if let Err(e) = audit::log(&format!("Cleaned clipboard: {} -> {} chars", before, after)) {
                    warn!("Failed to write audit log: {}", e);
                }
                Self::cue(engine, Cue::Success);
            }
            Err(e) => {
                warn!("📋 Nothing cleaned: {}", e);
                Self::cue(engine, Cue::Failure);
            }
        }
    }

    /// Read the clipboard, clean it, write it back; returns (before, after) sizes
    fn clean_clipboard() -> CleanResult<(usize, usize)> {
        let mut clipboard = ClipboardHandle::new()?;
        let text = clipboard.read_text()?;
        let cleaned = core::clean(&text);
        clipboard.write_text(&cleaned)?;
        Ok((text.chars().count(), cleaned.chars().count()))
    }

    fn cue(engine: Option<&SoundEngine>, cue: Cue) {
        if let Some(engine) = engine {
            if let Err(e) = engine.play(cue) {
                warn!("🔇 Feedback cue failed: {}", e);
            }
        }
    }
}
