//! Framed wire protocol between the host and the in-app instrumentation
//! agent.
//!
//! # Packet structure (little endian)
//!
//! ```text
//! [Header: 4 bytes LE u32 len] [Payload: `len` bytes of JSON]
//! ```
//!
//! The `len` field counts the JSON payload only, not the 4-byte header. The
//! payload is a tagged JSON object ([`Request`] or [`Response`]); the node
//! tree already serializes through serde, so the protocol reuses that rather
//! than defining a second binary encoding.
//!
//! # Example
//!
//! ```
//! use cartwheel_core::protocol::{decode_request, encode_request, Request};
//!
//! let wire = encode_request(&Request::Tap { x: 195.0, y: 812.0 });
//! // Skip the 4-byte length header to decode.
//! let decoded = decode_request(&wire[4..]).unwrap();
//! assert_eq!(decoded, Request::Tap { x: 195.0, y: 812.0 });
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{NodeFrame, SemanticsNode};

/// Upper bound on a frame payload; anything larger is treated as corrupt.
pub const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

/// Errors that can occur while decoding wire frames.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The frame header announces an implausible payload size.
    #[error("frame exceeds maximum size: {0} bytes")]
    FrameTooLarge(u32),

    /// The payload is not a valid protocol message.
    #[error("malformed frame payload: {0}")]
    MalformedPayload(String),
}

/// A typed request from the host to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Connection handshake; the agent replies `Ok` when ready.
    Hello,
    /// Request the full semantics tree for the current screen.
    DumpTree,
    /// Request the visible screen area.
    Viewport,
    /// Tap at screen coordinates.
    Tap {
        /// The x-coordinate in logical pixels.
        x: f64,
        /// The y-coordinate in logical pixels.
        y: f64,
    },
    /// Type text into the focused editor.
    TypeText {
        /// The text to type.
        text: String,
    },
    /// Perform a drag gesture between two points.
    Swipe {
        /// Starting x-coordinate.
        start_x: f64,
        /// Starting y-coordinate.
        start_y: f64,
        /// Ending x-coordinate.
        end_x: f64,
        /// Ending y-coordinate.
        end_y: f64,
        /// Gesture duration in milliseconds.
        duration_ms: u64,
    },
    /// Restart the application under test with fresh state.
    Relaunch,
}

impl Request {
    /// A short, static name for this request type suitable for tracing span
    /// metadata. Avoids Debug-formatting large payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Hello => "hello",
            Request::DumpTree => "dump_tree",
            Request::Viewport => "viewport",
            Request::Tap { .. } => "tap",
            Request::TypeText { .. } => "type_text",
            Request::Swipe { .. } => "swipe",
            Request::Relaunch => "relaunch",
        }
    }
}

/// A typed response from the agent to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// The request succeeded with no data.
    Ok,
    /// The semantics tree for the current screen.
    Tree {
        /// Root nodes of the tree.
        nodes: Vec<SemanticsNode>,
    },
    /// The visible screen area.
    Viewport {
        /// The viewport frame.
        frame: NodeFrame,
    },
    /// The request failed on the agent side.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

/// Encodes a request as a length-prefixed frame.
pub fn encode_request(request: &Request) -> Vec<u8> {
    frame(serde_json::to_vec(request).expect("protocol messages serialize infallibly"))
}

/// Encodes a response as a length-prefixed frame.
pub fn encode_response(response: &Response) -> Vec<u8> {
    frame(serde_json::to_vec(response).expect("protocol messages serialize infallibly"))
}

/// Reads the payload length out of a 4-byte frame header.
pub fn read_frame_length(header: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*header)
}

/// Decodes a request from a frame payload (header already stripped).
pub fn decode_request(payload: &[u8]) -> Result<Request, ProtocolError> {
    serde_json::from_slice(payload).map_err(|e| ProtocolError::MalformedPayload(e.to_string()))
}

/// Decodes a response from a frame payload (header already stripped).
pub fn decode_response(payload: &[u8]) -> Result<Response, ProtocolError> {
    serde_json::from_slice(payload).map_err(|e| ProtocolError::MalformedPayload(e.to_string()))
}

fn frame(payload: Vec<u8>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(4 + payload.len());
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(&payload);
    buf
}
