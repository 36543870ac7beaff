//! Single-connection HTTP stub for exercising the reqwest paths.

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::http::USER_AGENT;

/// Builds a raw HTTP/1.1 response with an explicit `Content-Length`.
pub fn http_response(status: &str, content_length: usize, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status, content_length, body
    )
}

/// Client that ignores proxy settings from the environment.
pub fn client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .no_proxy()
        .build()
        .unwrap()
}

/// Answers the first connection with `response` verbatim, then closes it.
///
/// Returns the base URL and a handle resolving to the request head received.
pub async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&head).to_ascii_lowercase()
    });

    (base, handle)
}
