//! Email service for delivering invitation messages.
//!
//! Supports multiple email providers:
//! - `console`: Logs emails to console (development)
//! - `sendgrid`: Uses SendGrid API
//!
//! The invitation issuer calls [`EmailService::send`] while its database
//! transaction is still open; a returned error aborts the transaction.

use crate::config::EmailConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
    /// HTML body (optional)
    pub body_html: Option<String>,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "sendgrid" => self.send_sendgrid(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Console provider - logs email to console (for development).
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );

        info!(
            body_text = %message.body_text,
            "Email body (plain text)"
        );

        if let Some(html) = &message.body_html {
            debug!(
                body_html_length = %html.len(),
                "Email body (HTML)"
            );
        }

        Ok(())
    }

    /// SendGrid provider - sends via SendGrid API.
    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let client = reqwest::Client::new();

        let mut body = serde_json::json!({
            "personalizations": [{
                "to": [{
                    "email": message.to
                }]
            }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": [{
                "type": "text/plain",
                "value": message.body_text
            }]
        });

        if let Some(html) = &message.body_html {
            if let Some(content) = body["content"].as_array_mut() {
                content.push(serde_json::json!({
                    "type": "text/html",
                    "value": html
                }));
            }
        }

        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .header(
                "Authorization",
                format!("Bearer {}", self.config.sendgrid_api_key),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        if response.status().is_success() {
            info!(
                to = %message.to,
                subject = %message.subject,
                "Email sent via SendGrid"
            );
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "SendGrid API error"
            );
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {}: {}",
                status, error_body
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            provider: "console".to_string(),
            sendgrid_api_key: String::new(),
            sender_email: "test@example.com".to_string(),
            sender_name: "Test".to_string(),
        }
    }

    fn test_message() -> EmailMessage {
        EmailMessage {
            to: "mentor@example.com".to_string(),
            subject: "Supervisor Evaluation".to_string(),
            body_text: "Hello!\n\nAnn Smith (a@b.com) asked you to provide feedback: link"
                .to_string(),
            body_html: Some(
                "Hello!<br><br>Ann Smith (a@b.com) asked you to provide feedback: link"
                    .to_string(),
            ),
        }
    }

    #[test]
    fn test_email_service_creation() {
        let service = EmailService::new(test_config());
        assert!(service.is_enabled());
    }

    #[test]
    fn test_email_service_disabled() {
        let mut config = test_config();
        config.enabled = false;
        let service = EmailService::new(config);
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn test_send_console_email() {
        let service = EmailService::new(test_config());
        let result = service.send(test_message()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let mut config = test_config();
        config.enabled = false;
        let service = EmailService::new(config);

        let result = service.send(test_message()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_provider_fails() {
        let mut config = test_config();
        config.provider = "carrier-pigeon".to_string();
        let service = EmailService::new(config);

        let result = service.send(test_message()).await;
        assert!(matches!(result, Err(EmailError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_sendgrid_without_key_fails() {
        let mut config = test_config();
        config.provider = "sendgrid".to_string();
        let service = EmailService::new(config);

        let result = service.send(test_message()).await;
        assert!(matches!(result, Err(EmailError::NotConfigured)));
    }
}
