//! IPC Client
//!
//! Unix socket client for CLI-side IPC.

use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::{socket_path, IpcRequest, IpcResponse};

/// IPC Client for the CLI
pub struct IpcClient;

static NEXT_SEQ_ID: AtomicU64 = AtomicU64::new(1);

fn next_seq_id() -> u64 {
    NEXT_SEQ_ID.fetch_add(1, Ordering::SeqCst)
}

/// Send one request and read one newline-delimited response
fn roundtrip(request: &IpcRequest) -> Result<IpcResponse> {
    let path = socket_path();

    let mut stream = UnixStream::connect(&path)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;

    let request_json = serde_json::to_string(request)? + "\n";
    stream.write_all(request_json.as_bytes())?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let response: IpcResponse = serde_json::from_str(line.trim())?;
    debug!("📨 IPC response: {:?}", response);
    Ok(response)
}

impl IpcClient {
    /// Check if the daemon is running
    pub fn is_daemon_running() -> bool {
        let path = socket_path();

        if !path.exists() {
            return false;
        }

        UnixStream::connect(path).is_ok()
    }

    /// Ask the daemon to clean a block of text
    pub fn send_clean(text: &str) -> Result<Option<String>> {
        let seq_id = next_seq_id();
        let request = IpcRequest::CleanRequest {
            seq_id,
            text: text.to_string(),
        };

        match roundtrip(&request)? {
            IpcResponse::CleanResponse {
                seq_id: resp_seq,
                text,
            } => {
                if resp_seq != seq_id {
                    warn!(
                        "⚠️ IPC sequence ID mismatch: expected {}, got {}",
                        seq_id, resp_seq
                    );
                    return Ok(None);
                }
                Ok(Some(text))
            }
            _ => {
                warn!("Unexpected IPC response type");
                Ok(None)
            }
        }
    }

    /// Request daemon status: (listening, cleans_performed)
    pub fn get_status() -> Result<Option<(bool, u64)>> {
        let seq_id = next_seq_id();
        let request = IpcRequest::StatusRequest { seq_id };

        match roundtrip(&request)? {
            IpcResponse::StatusResponse {
                seq_id: resp_seq,
                listening,
                cleans_performed,
            } => {
                if resp_seq != seq_id {
                    warn!("⚠️ IPC sequence ID mismatch");
                    return Ok(None);
                }
                Ok(Some((listening, cleans_performed)))
            }
            _ => Ok(None),
        }
    }

    /// Ask the daemon to shut down
    pub fn send_shutdown() -> Result<bool> {
        let seq_id = next_seq_id();
        let request = IpcRequest::Shutdown { seq_id };

        match roundtrip(&request)? {
            IpcResponse::Ack {
                seq_id: resp_seq,
                success,
                ..
            } => {
                if resp_seq != seq_id {
                    warn!("⚠️ IPC sequence ID mismatch");
                    return Ok(false);
                }
                Ok(success)
            }
            _ => Ok(false),
        }
    }
}
