//! Mail sender chosen at startup

use platform::mail::{HttpMailSender, LogMailSender, MailError, MailMessage, MailSender};

use crate::config::MailRelayConfig;

#[derive(Debug, Clone)]
pub enum AppMailer {
    Relay(HttpMailSender),
    Log(LogMailSender),
}

impl AppMailer {
    /// Relay when configured, otherwise log only
    pub fn from_config(config: Option<&MailRelayConfig>) -> Self {
        match config {
            Some(relay) => Self::Relay(HttpMailSender::new(
                relay.endpoint.as_str(),
                relay.api_key.as_str(),
                relay.from.as_str(),
            )),
            None => Self::Log(LogMailSender),
        }
    }
}

impl MailSender for AppMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        match self {
            Self::Relay(sender) => sender.send(message).await,
            Self::Log(sender) => sender.send(message).await,
        }
    }
}
