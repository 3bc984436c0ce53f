use reqwest::Client;
use serde_json::Value;

use crate::config::normalize_url;
use crate::error::AppError;

/// Forwards chat payloads to the model backend as-is.
#[derive(Debug, Clone)]
pub struct BackendRelay {
    client: Client,
    endpoint: String,
}

impl BackendRelay {
    pub fn new(backend_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat", normalize_url(backend_url)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One attempt, no retry. Non-2xx and transport failures are both errors.
    pub async fn forward(&self, body: Value) -> Result<Value, AppError> {
        tracing::debug!(endpoint = %self.endpoint, "forwarding chat request");

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BackendStatus(status));
        }

        let data = response.json::<Value>().await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_chat_path() {
        let relay = BackendRelay::new("http://localhost:8000/");
        assert_eq!(relay.endpoint(), "http://localhost:8000/chat");
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = BackendRelay::new(&format!("http://{addr}"));
        let err = relay
            .forward(serde_json::json!({"message": "hello"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}
