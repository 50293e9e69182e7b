//! Shared test harness for integration tests.
//!
//! [`RawServer`] is a minimal HTTP/1.1 responder that writes canned bytes,
//! giving exact control over response headers (or no response at all).
//! [`capture_logs`] installs a thread-local `tracing` subscriber that records
//! warnings and errors into memory.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing_subscriber::fmt::MakeWriter;

/// How the server answers a request target.
pub enum Reply {
    /// Write this status line and these headers, then close.
    Head {
        status: &'static str,
        headers: Vec<(&'static str, String)>,
    },
    /// Read the request and never answer.
    Hang,
}

impl Reply {
    pub fn ok_with_length(bytes: u64) -> Self {
        Reply::Head {
            status: "200 OK",
            headers: vec![("Content-Length", bytes.to_string())],
        }
    }

    pub fn ok_without_length() -> Self {
        Reply::Head {
            status: "200 OK",
            headers: Vec::new(),
        }
    }

    pub fn status(status: &'static str) -> Self {
        Reply::Head {
            status,
            headers: vec![("Content-Length", "0".to_string())],
        }
    }

    fn render(status: &str, headers: &[(&str, String)]) -> String {
        let mut out = format!("HTTP/1.1 {status}\r\n");
        for (name, value) in headers {
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        out.push_str("Connection: close\r\n\r\n");
        out
    }
}

type Handler = Arc<dyn Fn(&str) -> Reply + Send + Sync>;

/// A loopback server answering each request via a handler on its target.
pub struct RawServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl RawServer {
    pub async fn start(handler: impl Fn(&str) -> Reply + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let seen = requests.clone();
        let task = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let handler = handler.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let request = String::from_utf8_lossy(&buf).to_string();
                    let request_line = request.lines().next().unwrap_or_default().to_string();
                    let target = request_line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push(request_line);

                    match handler(&target) {
                        Reply::Head { status, headers } => {
                            let response = Reply::render(status, &headers);
                            let _ = socket.write_all(response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                        Reply::Hang => {
                            std::future::pending::<()>().await;
                        }
                    }
                });
            }
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    /// Server answering every request the same way.
    pub async fn fixed(reply: fn() -> Reply) -> Self {
        Self::start(move |_| reply()).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Request lines received so far (e.g. `HEAD /a.jpg HTTP/1.1`).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for RawServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A loopback address with nothing listening on it.
pub async fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{path}")
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Record WARN and above on the current thread until the guard drops.
///
/// Only reliable under the default current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
