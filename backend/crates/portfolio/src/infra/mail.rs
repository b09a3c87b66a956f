//! Contact Mail Relays
//!
//! [`SmtpMailRelay`] forwards each contact message to the site owner over
//! SMTP with STARTTLS. [`LoggingMailRelay`] only logs and stands in when no
//! SMTP server is configured.

use std::fmt;
use std::time::Duration;

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::entities::ContactMessage;
use crate::domain::repository::MailRelay;
use crate::error::{PortfolioError, PortfolioResult};

pub const DEFAULT_SMTP_PORT: u16 = 587;
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Outgoing SMTP server and the addresses contact mail travels between
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender of the notification
    pub from: String,
    /// Owner inbox
    pub to: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpMailRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailRelay {
    /// Must be called inside a Tokio runtime.
    pub fn new(settings: SmtpSettings) -> PortfolioResult<Self> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|e| PortfolioError::Internal(format!("Invalid sender address: {e}")))?;
        let to = settings
            .to
            .parse::<Mailbox>()
            .map_err(|e| PortfolioError::Internal(format!("Invalid recipient address: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| PortfolioError::Internal(format!("SMTP relay {}: {e}", settings.host)))?
            .port(settings.port)
            .timeout(Some(SMTP_TIMEOUT));

        if let Some(username) = settings.username {
            builder = builder.credentials(Credentials::new(
                username,
                settings.password.unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    /// Plain-text notification; replying answers the visitor directly.
    fn compose(&self, message: &ContactMessage) -> PortfolioResult<Message> {
        let visitor = message
            .email
            .as_str()
            .parse::<Address>()
            .map(|address| Mailbox::new(Some(message.name.clone()), address))
            .map_err(|e| PortfolioError::MailDelivery(format!("Visitor address: {e}")))?;

        let body = format!(
            "Nom: {}\nEmail: {}\nSujet: {}\n\n{}\n",
            message.name, message.email, message.subject, message.message
        );

        Message::builder()
            .from(self.from.clone())
            .reply_to(visitor)
            .to(self.to.clone())
            .subject(format!("Nouveau message de contact: {}", message.subject))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| PortfolioError::MailDelivery(format!("Failed to build email: {e}")))
    }
}

impl MailRelay for SmtpMailRelay {
    async fn relay(&self, message: &ContactMessage) -> PortfolioResult<()> {
        let email = self.compose(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| PortfolioError::MailDelivery(e.to_string()))?;

        tracing::info!(contact_id = %message.contact_id, "Contact notification sent");
        Ok(())
    }
}

/// Relay for setups without SMTP; the stored message is the only record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMailRelay;

impl MailRelay for LoggingMailRelay {
    async fn relay(&self, message: &ContactMessage) -> PortfolioResult<()> {
        tracing::info!(
            contact_id = %message.contact_id,
            subject = %message.subject,
            "SMTP not configured, contact notification skipped"
        );
        Ok(())
    }
}

/// Relay chosen from the environment at startup
#[derive(Clone)]
pub enum ConfiguredMailRelay {
    Smtp(SmtpMailRelay),
    Logging(LoggingMailRelay),
}

impl ConfiguredMailRelay {
    /// SMTP when settings are present, logging otherwise
    pub fn from_settings(settings: Option<SmtpSettings>) -> PortfolioResult<Self> {
        match settings {
            Some(settings) => Ok(Self::Smtp(SmtpMailRelay::new(settings)?)),
            None => Ok(Self::Logging(LoggingMailRelay)),
        }
    }
}

impl MailRelay for ConfiguredMailRelay {
    async fn relay(&self, message: &ContactMessage) -> PortfolioResult<()> {
        match self {
            Self::Smtp(relay) => relay.relay(message).await,
            Self::Logging(relay) => relay.relay(message).await,
        }
    }
}
