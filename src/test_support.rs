//! Async test helpers: a per-test current-thread runtime and a scriptable
//! HTTP/1.1 mock server built on a raw `TcpListener`.
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::error::{AppError, AppResult};

const IO_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub method: String,
    /// Request target as sent: path plus query.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Duration,
}

impl MockResponse {
    pub(crate) fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            content_type: "application/json",
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            content_type: "text/plain",
            delay: Duration::ZERO,
        }
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = dyn Fn(&CapturedRequest) -> MockResponse + Send + Sync;

pub(crate) struct MockServer {
    addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn requests(&self) -> Vec<CapturedRequest> {
        self.captured
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Serves every connection with the response `responder` picks for it.
pub(crate) async fn spawn_mock_server<F>(responder: F) -> AppResult<MockServer>
where
    F: Fn(&CapturedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| AppError::validation(format!("Failed to bind mock server: {}", err)))?;
    let addr = listener
        .local_addr()
        .map_err(|err| AppError::validation(format!("Failed to read mock addr: {}", err)))?;
    let captured = Arc::new(Mutex::new(Vec::new()));
    let responder: Arc<Responder> = Arc::new(responder);

    let task_captured = Arc::clone(&captured);
    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let captured = Arc::clone(&task_captured);
            let responder = Arc::clone(&responder);
            tokio::spawn(async move {
                if let Err(err) = serve_connection(stream, &captured, responder.as_ref()).await {
                    tracing::debug!("Mock connection ended: {}", err);
                }
            });
        }
    });

    Ok(MockServer {
        addr,
        captured,
        task,
    })
}

/// Mock that answers every request with the same response.
pub(crate) async fn spawn_fixed_server(response: MockResponse) -> AppResult<MockServer> {
    spawn_mock_server(move |_request| response.clone()).await
}

async fn serve_connection(
    mut stream: TcpStream,
    captured: &Mutex<Vec<CapturedRequest>>,
    responder: &Responder,
) -> AppResult<()> {
    let mut buffer = Vec::with_capacity(1024);
    let head_end = loop {
        if let Some(position) = buffer.windows(4).position(|bytes| bytes == b"\r\n\r\n") {
            break position;
        }
        let mut chunk = [0_u8; 1024];
        let read = timeout(IO_TIMEOUT, stream.read(&mut chunk))
            .await
            .map_err(|_err| AppError::validation("Mock read timed out"))??;
        if read == 0 {
            return Ok(());
        }
        let prefix = chunk
            .get(..read)
            .ok_or_else(|| AppError::validation("Mock read buffer out of range"))?;
        buffer.extend_from_slice(prefix);
    };

    let head = String::from_utf8_lossy(buffer.get(..head_end).unwrap_or_default()).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let target = parts.next().unwrap_or_default().to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end.saturating_add(4);
    let mut body = buffer.get(body_start..).unwrap_or_default().to_vec();
    while body.len() < content_length {
        let mut chunk = [0_u8; 1024];
        let read = timeout(IO_TIMEOUT, stream.read(&mut chunk))
            .await
            .map_err(|_err| AppError::validation("Mock body read timed out"))??;
        if read == 0 {
            break;
        }
        let prefix = chunk
            .get(..read)
            .ok_or_else(|| AppError::validation("Mock read buffer out of range"))?;
        body.extend_from_slice(prefix);
    }

    let request = CapturedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let response = responder(&request);
    if let Ok(mut guard) = captured.lock() {
        guard.push(request);
    }

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.content_type,
        response.body.len(),
        response.body
    );
    timeout(IO_TIMEOUT, stream.write_all(payload.as_bytes()))
        .await
        .map_err(|_err| AppError::validation("Mock write timed out"))??;
    Ok(())
}

const fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
