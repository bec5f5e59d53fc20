//! A minimal HTTP responder standing in for the completion endpoint.

#![allow(dead_code, clippy::unwrap_used)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Reply body for "serendipity", as the upstream would send it.
pub const SERENDIPITY_ENVELOPE: &str = r#"{"candidates":[{"content":{"parts":[{"text":"{\"type\":\"word\",\"word\":\"serendipity\",\"definition\":\"...\",\"examples\":[],\"pronunciation\":\"\",\"persian_definition\":\"تصادف خوشایند\",\"synonyms\":[],\"acronym\":\"\"}"}]}}]}"#;

/// Wraps a model reply in a success envelope.
pub fn envelope(reply: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": reply}], "role": "model"}}]
    })
    .to_string()
}

#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub struct MockUpstream {
    pub addr: std::net::SocketAddr,
    pub endpoint: String,
    requests: mpsc::UnboundedReceiver<CapturedRequest>,
}

impl MockUpstream {
    /// Answers every request with `status` and `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.into();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let Some(request) = read_request(&mut socket).await else {
                    continue;
                };
                let _ = tx.send(request);

                let response = format!(
                    "HTTP/1.1 {status} Mock\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            addr,
            endpoint: format!("http://{addr}/v1beta/models/test:generateContent"),
            requests: rx,
        }
    }

    pub async fn next_request(&mut self) -> CapturedRequest {
        self.requests.recv().await.unwrap()
    }
}

/// An address nothing listens on.
pub async fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/generate")
}

/// Accepts connections and never answers.
pub async fn silent_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}/generate")
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);

        let Some(head_end) = find(&buffer, b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buffer[..head_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();

        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);

        let body_start = head_end + 4;
        if buffer.len() >= body_start + content_length {
            let body =
                String::from_utf8_lossy(&buffer[body_start..body_start + content_length])
                    .to_string();
            return Some(CapturedRequest {
                request_line,
                headers,
                body,
            });
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
