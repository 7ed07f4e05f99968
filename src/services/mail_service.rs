//! services/mail_service.rs
//! Envío de correo vía relay SMTP (lettre).

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::app_config::{MailConfig, MailSecurity};

/// Cualquier cosa capaz de entregar un correo de texto plano a un destinatario.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct SmtpMailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailService {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let sender: Mailbox = config
            .sender
            .parse()
            .with_context(|| format!("Invalid sender address: {}", config.sender))?;

        let tls = match config.security {
            MailSecurity::None => Tls::None,
            MailSecurity::StartTls => Tls::Required(TlsParameters::new(config.host.clone())?),
            MailSecurity::Wrapper => Tls::Wrapper(TlsParameters::new(config.host.clone())?),
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        log::info!(
            "SMTP relay {}:{} (security={:?}, sender={})",
            config.host,
            config.port,
            config.security,
            config.sender
        );

        Ok(Self {
            mailer: builder.build(),
            sender,
        })
    }

    pub fn build_message(&self, recipient: &str, subject: &str, body: &str) -> Result<Message> {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("Invalid recipient address: {recipient}"))?;

        Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("Failed to build email message")
    }
}

#[async_trait]
impl MailTransport for SmtpMailService {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let message = self.build_message(recipient, subject, body)?;
        self.mailer
            .send(message)
            .await
            .context("SMTP relay rejected the message")?;
        Ok(())
    }
}
