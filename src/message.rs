// src/message.rs
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown by the proxy when the backend cannot be reached or answers with an error.
pub const PROXY_FALLBACK: &str =
    "Désolé, le service est temporairement indisponible. Veuillez réessayer plus tard.";

pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            message: message.into(),
            max_tokens,
            temperature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    // Backends may leave this out; only `response` is shown.
    #[serde(default)]
    pub status: String,
}

impl ChatResponse {
    pub fn fallback() -> Self {
        Self {
            response: PROXY_FALLBACK.to_string(),
            status: "error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    // fr-FR short time: 24h, zero padded
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply_when_fields_missing() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "salut"}"#).unwrap();
        assert_eq!(req.message, "salut");
        assert_eq!(req.max_tokens, 100);
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    }

    #[test]
    fn message_ids_are_unique() {
        let a = Message::user("hello");
        let b = Message::user("hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.time_label().len(), 5);
    }

    #[test]
    fn response_without_status_still_decodes() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response": "hi"}"#).unwrap();
        assert_eq!(resp.response, "hi");
        assert!(resp.status.is_empty());
    }

    #[test]
    fn fallback_payload_is_error_status() {
        let fallback = ChatResponse::fallback();
        assert_eq!(fallback.status, "error");
        assert_eq!(fallback.response, PROXY_FALLBACK);
    }
}
