//! Test doubles shared by the cartwheel-core integration suites.
//!
//! A mock TCP agent exercises the wire protocol end to end; the scripted
//! in-process drivers exercise the scroll and wait helpers without a real
//! application.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use cartwheel_core::driver::{DriverError, UiDriver};
use cartwheel_core::element::{NodeFrame, Point, SemanticsNode};
use cartwheel_core::gesture::SwipeGesture;
use cartwheel_core::protocol::{encode_response, read_frame_length, Response};

// ---------------------------------------------------------------------------
// Basic mock agent
// ---------------------------------------------------------------------------

/// Serve a list of canned responses over a single TCP connection, one per
/// incoming request frame. Since `RemoteDriver::connect()` opens with a
/// `Hello`, the list must start with the handshake's `Ok`.
pub async fn mock_agent(responses: Vec<Response>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        for response in responses {
            // Read one request frame: 4-byte LE header + payload.
            let mut header = [0u8; 4];
            stream.read_exact(&mut header).await.unwrap();
            let len = read_frame_length(&header) as usize;
            let mut payload = vec![0u8; len];
            stream.read_exact(&mut payload).await.unwrap();

            let resp_bytes = encode_response(&response);
            stream.write_all(&resp_bytes).await.unwrap();
            stream.flush().await.unwrap();
        }
    });

    addr
}

// ---------------------------------------------------------------------------
// Programmable mock agent
// ---------------------------------------------------------------------------

/// How the scripted agent handles its next request frame.
#[allow(dead_code)]
pub enum MockBehavior {
    /// Answer with this response.
    Respond(Response),
    /// Answer with this response after a pause.
    Delay(Duration, Response),
    /// Close the connection after consuming the request.
    Drop,
    /// Send bytes that are not a protocol frame payload.
    SendGarbage,
    /// Stop servicing the connection without closing it.
    Hang,
}

/// Serve one TCP connection, consuming request frames and acting out the
/// given behaviors in order. Once the script runs out, the connection
/// closes.
#[allow(dead_code)]
pub async fn programmable_mock_agent(behaviors: Vec<MockBehavior>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        for behavior in behaviors {
            match behavior {
                MockBehavior::Respond(response) => {
                    if read_request(&mut stream).await.is_err() {
                        return;
                    }
                    let resp_bytes = encode_response(&response);
                    let _ = stream.write_all(&resp_bytes).await;
                    let _ = stream.flush().await;
                }
                MockBehavior::Delay(duration, response) => {
                    if read_request(&mut stream).await.is_err() {
                        return;
                    }
                    tokio::time::sleep(duration).await;
                    let resp_bytes = encode_response(&response);
                    let _ = stream.write_all(&resp_bytes).await;
                    let _ = stream.flush().await;
                }
                MockBehavior::Drop => {
                    let _ = read_request(&mut stream).await;
                    return; // close connection
                }
                MockBehavior::SendGarbage => {
                    if read_request(&mut stream).await.is_err() {
                        return;
                    }
                    // Valid length header, invalid payload.
                    let garbage = [8u8, 0, 0, 0, 0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0xFF, 0x42, 0x13];
                    let _ = stream.write_all(&garbage).await;
                    let _ = stream.flush().await;
                }
                MockBehavior::Hang => {
                    std::future::pending::<()>().await;
                }
            }
        }
    });

    addr
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> std::io::Result<()> {
    let mut header = [0u8; 4];
    stream.read_exact(&mut header).await?;
    let len = read_frame_length(&header) as usize;
    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Node builders
// ---------------------------------------------------------------------------

/// A clickable text node at the given frame.
#[allow(dead_code)]
pub fn text_node(text: &str, x: f64, y: f64, w: f64, h: f64) -> SemanticsNode {
    SemanticsNode {
        text: Some(text.to_string()),
        clickable: true,
        frame: Some(NodeFrame::new(x, y, w, h)),
        ..Default::default()
    }
}

/// The fixed viewport all scripted drivers report.
#[allow(dead_code)]
pub fn viewport() -> NodeFrame {
    NodeFrame::new(0.0, 0.0, 390.0, 844.0)
}

// ---------------------------------------------------------------------------
// ScriptedDriver — tree advances one frame per swipe
// ---------------------------------------------------------------------------

/// A driver whose tree is a fixed sequence of frames indexed by how many
/// swipes have been performed. The final frame repeats once reached.
pub struct ScriptedDriver {
    frames: Vec<Vec<SemanticsNode>>,
    swipes: Mutex<Vec<SwipeGesture>>,
}

#[allow(dead_code)]
impl ScriptedDriver {
    pub fn new(frames: Vec<Vec<SemanticsNode>>) -> Self {
        assert!(!frames.is_empty(), "at least one frame required");
        Self {
            frames,
            swipes: Mutex::new(Vec::new()),
        }
    }

    /// Gestures performed so far, in order.
    pub fn swipes(&self) -> Vec<SwipeGesture> {
        self.swipes.lock().unwrap().clone()
    }

    pub fn swipe_count(&self) -> usize {
        self.swipes.lock().unwrap().len()
    }
}

#[async_trait]
impl UiDriver for ScriptedDriver {
    async fn connect(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    async fn dump_tree(&self) -> Result<Vec<SemanticsNode>, DriverError> {
        let index = self.swipe_count().min(self.frames.len() - 1);
        Ok(self.frames[index].clone())
    }

    async fn viewport(&self) -> Result<NodeFrame, DriverError> {
        Ok(viewport())
    }

    async fn tap(&self, _point: Point) -> Result<(), DriverError> {
        Ok(())
    }

    async fn type_text(&self, _text: &str) -> Result<(), DriverError> {
        Ok(())
    }

    async fn perform_swipe(&self, gesture: &SwipeGesture) -> Result<(), DriverError> {
        self.swipes.lock().unwrap().push(*gesture);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LatentDriver — tree content appears after N dumps
// ---------------------------------------------------------------------------

/// A driver whose tree switches from `before` to `after` once `dump_tree`
/// has been called `appear_after` times. Models content that materializes
/// asynchronously.
pub struct LatentDriver {
    before: Vec<SemanticsNode>,
    after: Vec<SemanticsNode>,
    appear_after: usize,
    dumps: AtomicUsize,
}

#[allow(dead_code)]
impl LatentDriver {
    pub fn new(
        before: Vec<SemanticsNode>,
        after: Vec<SemanticsNode>,
        appear_after: usize,
    ) -> Self {
        Self {
            before,
            after,
            appear_after,
            dumps: AtomicUsize::new(0),
        }
    }

    pub fn dump_count(&self) -> usize {
        self.dumps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UiDriver for LatentDriver {
    async fn connect(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    async fn dump_tree(&self) -> Result<Vec<SemanticsNode>, DriverError> {
        let seen = self.dumps.fetch_add(1, Ordering::SeqCst);
        if seen >= self.appear_after {
            Ok(self.after.clone())
        } else {
            Ok(self.before.clone())
        }
    }

    async fn viewport(&self) -> Result<NodeFrame, DriverError> {
        Ok(viewport())
    }

    async fn tap(&self, _point: Point) -> Result<(), DriverError> {
        Ok(())
    }

    async fn type_text(&self, _text: &str) -> Result<(), DriverError> {
        Ok(())
    }

    async fn perform_swipe(&self, _gesture: &SwipeGesture) -> Result<(), DriverError> {
        Ok(())
    }
}
