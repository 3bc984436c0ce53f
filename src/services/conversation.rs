// src/services/conversation.rs
use std::{
    fmt::Debug,
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use reqwest::Client;
use tokio::sync::RwLock;

use crate::config::normalize_url;
use crate::error::AppError;
use crate::message::{ChatRequest, ChatResponse, Message};

pub const GREETING: &str = "Bonjour ! Je suis une IA basée sur le modèle Gemma de Google. Comment puis-je vous aider aujourd'hui ?";

/// Appended in place of a reply when the request fails for any reason.
pub const CLIENT_FALLBACK: &str = "Désolé, une erreur s'est produite. Veuillez réessayer.";

pub const CLIENT_MAX_TOKENS: u32 = 150;
pub const CLIENT_TEMPERATURE: f32 = 0.7;

/// Carries one chat request to whatever answers it.
pub trait ChatTransport: Send + Sync + 'static {
    fn send(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, AppError>> + Send;
}

/// Talks to the proxy's `/api/chat` route.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(proxy_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", normalize_url(proxy_url)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatTransport for HttpTransport {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BackendStatus(status));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// Another request is still in flight; nothing happened.
    Busy,
    Replied,
    Failed,
}

/// Ordered message list plus the loading gate for one chat session.
pub struct Conversation<T> {
    messages: Arc<RwLock<Vec<Message>>>,
    loading: Arc<AtomicBool>,
    transport: Arc<T>,
}

impl<T> Clone for Conversation<T> {
    fn clone(&self) -> Self {
        Self {
            messages: Arc::clone(&self.messages),
            loading: Arc::clone(&self.loading),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> Debug for Conversation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("loading", &self.is_loading())
            .finish()
    }
}

// Clears the loading flag even if the send future is dropped mid-flight.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T> Conversation<T> {
    pub fn new(transport: T) -> Self {
        Self::from_messages(transport, Vec::new())
    }

    pub fn with_greeting(transport: T) -> Self {
        Self::from_messages(transport, vec![Message::assistant(GREETING)])
    }

    fn from_messages(transport: T, messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(messages)),
            loading: Arc::new(AtomicBool::new(false)),
            transport: Arc::new(transport),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Snapshot of the history in insertion order.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    async fn push(&self, message: Message) {
        self.messages.write().await.push(message);
    }
}

impl<T: ChatTransport> Conversation<T> {
    /// Sends one user message and records exactly one assistant message in reply.
    pub async fn send(&self, input: &str) -> SendOutcome {
        let content = input.trim();
        if content.is_empty() {
            return SendOutcome::Ignored;
        }

        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("send rejected, request already in flight");
            return SendOutcome::Busy;
        }
        let _guard = LoadingGuard(&self.loading);

        self.push(Message::user(content)).await;

        let request = ChatRequest::new(content, CLIENT_MAX_TOKENS, CLIENT_TEMPERATURE);
        match self.transport.send(request).await {
            Ok(reply) => {
                self.push(Message::assistant(reply.response)).await;
                SendOutcome::Replied
            }
            Err(e) => {
                tracing::error!(error = %e, "error sending message");
                self.push(Message::assistant(CLIENT_FALLBACK)).await;
                SendOutcome::Failed
            }
        }
    }
}
