//! Outbound Mail
//!
//! Mail is delivered through an HTTP relay: the application names a template
//! and supplies its variables, the relay renders and sends the message.
//! [`LogMailSender`] stands in for the relay in local development.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Templated message addressed to one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub recipient: String,
    pub template: String,
    pub variables: BTreeMap<String, String>,
}

impl MailMessage {
    pub fn new(recipient: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            template: template.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Mail relay rejected the message with status {status}")]
    Rejected { status: u16 },
}

#[trait_variant::make(MailSender: Send)]
pub trait LocalMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

// ============================================================================
// HTTP relay
// ============================================================================

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    template: &'a str,
    variables: &'a BTreeMap<String, String>,
}

/// Posts messages as JSON to a mail relay endpoint using a bearer API key
#[derive(Clone)]
pub struct HttpMailSender {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailSender {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

impl std::fmt::Debug for HttpMailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailSender")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

impl MailSender for HttpMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let body = RelayRequest {
            from: &self.from,
            to: &message.recipient,
            template: &message.template,
            variables: &message.variables,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                template = %message.template,
                status = status.as_u16(),
                "Mail relay rejected message"
            );
            return Err(MailError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(template = %message.template, "Mail handed to relay");
        Ok(())
    }
}

// ============================================================================
// Development sender
// ============================================================================

/// Logs the envelope instead of sending. Variable values are never logged
/// since they carry codes and passwords.
#[derive(Debug, Clone, Default)]
pub struct LogMailSender;

impl MailSender for LogMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let variables: Vec<&str> = message.variables.keys().map(String::as_str).collect();
        tracing::info!(
            recipient = %message.recipient,
            template = %message.template,
            ?variables,
            "Mail delivery skipped (log sender)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builder() {
        let message = MailMessage::new("user@example.com", "signup-code")
            .with_variable("code", "123456")
            .with_variable("expiresInMinutes", "3");

        assert_eq!(message.recipient, "user@example.com");
        assert_eq!(message.template, "signup-code");
        assert_eq!(message.variables.get("code").map(String::as_str), Some("123456"));
        assert_eq!(message.variables.len(), 2);
    }

    #[test]
    fn test_relay_request_shape() {
        let message = MailMessage::new("a@b.c", "find-login-id").with_variable("code", "000111");
        let body = RelayRequest {
            from: "noreply@board.test",
            to: &message.recipient,
            template: &message.template,
            variables: &message.variables,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"], "a@b.c");
        assert_eq!(json["template"], "find-login-id");
        assert_eq!(json["variables"]["code"], "000111");
    }

    #[test]
    fn test_http_sender_debug_hides_key() {
        let sender = HttpMailSender::new("http://relay.local/send", "sk-live-123", "noreply@x");
        let debug = format!("{:?}", sender);
        assert!(!debug.contains("sk-live-123"));
    }

    #[tokio::test]
    async fn test_log_sender_always_succeeds() {
        let message = MailMessage::new("user@example.com", "reset-password")
            .with_variable("password", "Abc123Def456");
        assert!(MailSender::send(&LogMailSender, &message).await.is_ok());
    }

    #[tokio::test]
    async fn test_http_sender_unreachable_relay() {
        // Port 9 (discard) on loopback is not expected to accept connections
        let sender = HttpMailSender::new("http://127.0.0.1:9/send", "key", "noreply@x");
        let message = MailMessage::new("user@example.com", "signup-code");
        let result = MailSender::send(&sender, &message).await;
        assert!(matches!(result, Err(MailError::Transport(_))));
    }
}
