//! IPC Message Types
//!
//! JSON-serializable messages for daemon ↔ CLI communication.

use serde::{Deserialize, Serialize};

/// Request types sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IpcRequest {
    /// Clean a block of text and return the result
    #[serde(rename = "clean_request")]
    CleanRequest { seq_id: u64, text: String },

    /// Request status of the daemon
    #[serde(rename = "status_request")]
    StatusRequest { seq_id: u64 },

    /// Ask the daemon to shut down
    #[serde(rename = "shutdown")]
    Shutdown { seq_id: u64 },
}

/// Response types sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IpcResponse {
    /// Cleaned text
    #[serde(rename = "clean_response")]
    CleanResponse { seq_id: u64, text: String },

    /// Status response
    #[serde(rename = "status_response")]
    StatusResponse {
        seq_id: u64,
        listening: bool,
        cleans_performed: u64,
    },

    /// Acknowledgment
    #[serde(rename = "ack")]
    Ack {
        seq_id: u64,
        success: bool,
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_request_serialize() {
        let req = IpcRequest::CleanRequest {
            seq_id: 1,
            text: "wrapped\nline".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("clean_request"));
        assert!(json.contains("wrapped"));
    }

    #[test]
    fn test_clean_request_roundtrip() {
        let json = r#"{"type":"clean_request","seq_id":7,"text":"a\nb"}"#;
        let req: IpcRequest = serde_json::from_str(json).unwrap();
        match req {
            IpcRequest::CleanRequest { seq_id, text } => {
                assert_eq!(seq_id, 7);
                assert_eq!(text, "a\nb");
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_status_response_serialize() {
        let resp = IpcResponse::StatusResponse {
            seq_id: 1,
            listening: true,
            cleans_performed: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("status_response"));
        assert!(json.contains("\"cleans_performed\":42"));
    }
}
