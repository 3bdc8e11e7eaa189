// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Email service for password-reset notifications.
//!
//! Uses SMTP via lettre for delivery. Sends are always fire-and-forget
//! from the caller's perspective: a delivery failure is logged and never
//! fails the request that triggered it.

use lettre::{
    message::header::ContentType,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// SMTP settings for the email service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
}

/// Email service for transactional mail.
///
/// In development and in tests the service runs disabled: messages are
/// logged instead of delivered.
#[derive(Clone)]
pub struct EmailService {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer: Some(mailer),
            from_address: config.from_address.clone(),
        })
    }

    /// Create a disabled service that logs instead of sending.
    pub fn disabled() -> Self {
        Self {
            mailer: None,
            from_address: "noreply@localhost".to_string(),
        }
    }

    /// Send the password-reset email with the tokenized link.
    pub async fn send_password_reset(
        &self,
        to_address: &str,
        first_name: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        let Some(mailer) = &self.mailer else {
            info!(to = to_address, link, "email disabled; skipping password reset mail");
            return Ok(());
        };

        let body = format!(
            "Hi {first_name},\n\n\
             We received a request to reset your password. Use the link below \
             within the next hour:\n\n{link}\n\n\
             If you did not request this, you can ignore this email."
        );

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to_address
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to_address.to_string()))?)
            .subject("Password Reset Request")
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        mailer.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_service_accepts_sends() {
        let service = EmailService::disabled();
        service
            .send_password_reset("ada@example.com", "Ada", "https://notes.test/reset?token=x")
            .await
            .expect("disabled send is a no-op");
    }
}
