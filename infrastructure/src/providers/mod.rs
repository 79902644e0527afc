//! HTTP provider clients
//!
//! Implements the application's [`ProviderClient`] port for the Anthropic
//! Messages API (slot A) and the OpenAI Chat Completions API (slot B).

pub mod anthropic;
pub mod classify;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use relay_application::{ProviderClient, ProviderSet};
use relay_domain::{ProviderConfig, Role, Turn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors building the provider clients
#[derive(Error, Debug)]
pub enum ProviderSetupError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// One role-tagged message in a chat-style request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// History turns followed by the new prompt as the final user message.
pub(crate) fn conversation_messages<'a>(history: &'a [Turn], prompt: &'a str) -> Vec<ChatMessage<'a>> {
    history
        .iter()
        .map(|turn| ChatMessage {
            role: turn.role().as_str(),
            content: turn.text(),
        })
        .chain(std::iter::once(ChatMessage {
            role: Role::User.as_str(),
            content: prompt,
        }))
        .collect()
}

pub(crate) fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}

/// Build both clients from configuration.
///
/// A missing API key is not fatal here: the affected client reports
/// `AuthError` on every call, so dual mode still degrades to the other one.
pub fn build_providers(config: &ProviderConfig) -> Result<ProviderSet, ProviderSetupError> {
    let http = http_client()?;

    let anthropic = AnthropicClient::new(config.anthropic.clone(), http.clone());
    let openai = OpenAiClient::new(config.openai.clone(), http);

    let keyed = [
        (anthropic.name(), anthropic.has_api_key()),
        (openai.name(), openai.has_api_key()),
    ];
    for (name, has_key) in keyed {
        if !has_key {
            warn!(provider = name, "No API key configured");
        }
    }
    if keyed.iter().all(|(_, has_key)| !has_key) {
        warn!("No provider has an API key; every request will fail");
    }

    Ok(ProviderSet::new(Arc::new(anthropic), Arc::new(openai)))
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP server for exercising the clients end to end.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// The request the server received
    pub struct Captured {
        /// Request line and headers, lowercased
        pub head: String,
        pub body: serde_json::Value,
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Answer the first request with `status` and `body`; returns the base URL.
    pub async fn serve_once(
        status: u16,
        body: &'static str,
    ) -> (String, oneshot::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let (head, request_body) = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find(&buf, b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                    let end = pos + 4 + content_length(&head);
                    while buf.len() < end {
                        let n = socket.read(&mut chunk).await.unwrap();
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                    }
                    let body = buf[pos + 4..end.min(buf.len())].to_vec();
                    break (head, body);
                }
                if n == 0 {
                    break (String::from_utf8_lossy(&buf).to_lowercase(), Vec::new());
                }
            };

            let response = format!(
                "HTTP/1.1 {} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(Captured {
                head,
                body: serde_json::from_slice(&request_body).unwrap_or(serde_json::Value::Null),
            });
        });

        (format!("http://{}", addr), rx)
    }

    /// Accept connections but never answer.
    pub async fn serve_silent() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    /// An address nothing listens on.
    pub async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }
}
