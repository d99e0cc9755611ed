//! IPC (Inter-Process Communication) Module
//!
//! Unix socket-based communication between the cleanpaste daemon and the
//! CLI. Protocol: JSON over newline-delimited messages. A live socket also
//! serves as the single-instance check: a second daemon refuses to start
//! while the socket accepts connections.

pub mod client;
pub mod messages;
pub mod server;

pub use client::IpcClient;
pub use messages::*;
pub use server::IpcServer;

use std::path::PathBuf;

/// Get the Unix socket path for IPC
pub fn socket_path() -> PathBuf {
    // Use username for socket path so per-user daemons don't collide
    let user = std::env::var("USER").unwrap_or_else(|_| "cleanpaste".to_string());
    PathBuf::from(format!("/tmp/cleanpaste-{}.sock", user))
}
