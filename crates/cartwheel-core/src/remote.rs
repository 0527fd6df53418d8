//! TCP-backed driver speaking the framed protocol to an in-app agent.
//!
//! [`RemoteDriver`] connects to the instrumentation agent compiled into the
//! application under test, performs a `Hello` handshake, and then maps every
//! [`UiDriver`] operation onto one request/response exchange. Requests are
//! serialized under a single in-flight lock; the agent is single-threaded.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::debug;

use crate::driver::{DriverError, UiDriver};
use crate::element::{NodeFrame, Point, SemanticsNode};
use crate::gesture::SwipeGesture;
use crate::protocol::{
    encode_request, read_frame_length, Request, Response, MAX_FRAME_LEN,
};

/// Default bound on a single request/response exchange.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A [`UiDriver`] backed by a TCP connection to the in-app agent.
pub struct RemoteDriver {
    host: String,
    port: u16,
    request_timeout: Duration,
    stream: Mutex<Option<TcpStream>>,
}

impl RemoteDriver {
    /// Creates a driver for an agent at `host:port`. Not connected yet;
    /// call [`connect`](UiDriver::connect) before issuing commands.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stream: Mutex::new(None),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Restart the application under test with fresh state.
    ///
    /// Each scenario starts from a fresh launch; live suites call this
    /// between tests.
    pub async fn relaunch(&self) -> Result<(), DriverError> {
        match self.request(&Request::Relaunch).await? {
            Response::Ok => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    async fn request(&self, request: &Request) -> Result<Response, DriverError> {
        let mut guard = self.stream.lock().await;
        let stream = guard.as_mut().ok_or(DriverError::NotConnected)?;

        let wire = encode_request(request);
        let exchange = tokio::time::timeout(self.request_timeout, async {
            stream.write_all(&wire).await?;
            stream.flush().await?;

            let mut header = [0u8; 4];
            stream.read_exact(&mut header).await?;
            let len = read_frame_length(&header);
            if len > MAX_FRAME_LEN {
                return Err(DriverError::CommandFailed(format!(
                    "oversized frame from agent: {} bytes",
                    len
                )));
            }
            let mut payload = vec![0u8; len as usize];
            stream.read_exact(&mut payload).await?;

            crate::protocol::decode_response(&payload)
                .map_err(|e| DriverError::JsonParse(e.to_string()))
        })
        .await;

        match exchange {
            Err(_) => {
                // The connection is in an unknown state after a timeout.
                *guard = None;
                Err(DriverError::Timeout)
            }
            Ok(Err(DriverError::Io(e))) => {
                *guard = None;
                Err(DriverError::ConnectionLost(e.to_string()))
            }
            Ok(Err(e)) => Err(e),
            Ok(Ok(Response::Error { message })) => Err(DriverError::CommandFailed(message)),
            Ok(Ok(response)) => {
                debug!(request = request.name(), "agent exchange complete");
                Ok(response)
            }
        }
    }
}

fn unexpected(response: &Response) -> DriverError {
    DriverError::CommandFailed(format!("unexpected agent response: {:?}", response))
}

#[async_trait]
impl UiDriver for RemoteDriver {
    async fn connect(&mut self) -> Result<(), DriverError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        stream.set_nodelay(true)?;
        *self.stream.lock().await = Some(stream);

        match self.request(&Request::Hello).await? {
            Response::Ok => {
                debug!(host = %self.host, port = self.port, "connected to agent");
                Ok(())
            }
            other => Err(unexpected(&other)),
        }
    }

    fn is_connected(&self) -> bool {
        // A held lock means a request is in flight, which implies connected.
        match self.stream.try_lock() {
            Ok(guard) => guard.is_some(),
            Err(_) => true,
        }
    }

    async fn dump_tree(&self) -> Result<Vec<SemanticsNode>, DriverError> {
        match self.request(&Request::DumpTree).await? {
            Response::Tree { nodes } => Ok(nodes),
            other => Err(unexpected(&other)),
        }
    }

    async fn viewport(&self) -> Result<NodeFrame, DriverError> {
        match self.request(&Request::Viewport).await? {
            Response::Viewport { frame } => Ok(frame),
            other => Err(unexpected(&other)),
        }
    }

    async fn tap(&self, point: Point) -> Result<(), DriverError> {
        match self
            .request(&Request::Tap {
                x: point.x,
                y: point.y,
            })
            .await?
        {
            Response::Ok => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        match self
            .request(&Request::TypeText {
                text: text.to_string(),
            })
            .await?
        {
            Response::Ok => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    async fn perform_swipe(&self, gesture: &SwipeGesture) -> Result<(), DriverError> {
        match self
            .request(&Request::Swipe {
                start_x: gesture.start.x,
                start_y: gesture.start.y,
                end_x: gesture.end.x,
                end_y: gesture.end.y,
                duration_ms: gesture.duration_ms,
            })
            .await?
        {
            Response::Ok => Ok(()),
            other => Err(unexpected(&other)),
        }
    }
}
