//! Contact Use Case
//!
//! The message is stored before the owner is notified, so a relay outage
//! never loses it.

use std::sync::Arc;

use crate::domain::entities::ContactMessage;
use crate::domain::repository::{ContactRepository, MailRelay};
use crate::domain::value_objects::EmailAddress;
use crate::error::{PortfolioError, PortfolioResult};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_SUBJECT_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 10_000;

/// Contact form fields, as received
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactInput {
    /// All four fields are required; blank counts as missing.
    pub fn validate(self) -> PortfolioResult<ContactMessage> {
        let name = filled(self.name);
        let email = filled(self.email);
        let subject = filled(self.subject);
        let message = filled(self.message);

        let missing: Vec<&'static str> = [
            ("name", name.is_none()),
            ("email", email.is_none()),
            ("subject", subject.is_none()),
            ("message", message.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (Some(name), Some(email), Some(subject), Some(message)) =
            (name, email, subject, message)
        else {
            return Err(PortfolioError::MissingFields(missing));
        };

        let email = EmailAddress::parse(&email).ok_or(PortfolioError::InvalidEmail)?;

        for (field, value, limit) in [
            ("name", &name, MAX_NAME_LEN),
            ("subject", &subject, MAX_SUBJECT_LEN),
            ("message", &message, MAX_MESSAGE_LEN),
        ] {
            if value.chars().count() > limit {
                return Err(PortfolioError::FieldTooLong(field));
            }
        }

        Ok(ContactMessage::new(name, email, subject, message))
    }
}

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct ContactUseCase<R, M>
where
    R: ContactRepository,
    M: MailRelay,
{
    repo: Arc<R>,
    mail: Arc<M>,
}

impl<R, M> ContactUseCase<R, M>
where
    R: ContactRepository,
    M: MailRelay,
{
    pub fn new(repo: Arc<R>, mail: Arc<M>) -> Self {
        Self { repo, mail }
    }

    pub async fn submit(&self, input: ContactInput) -> PortfolioResult<ContactMessage> {
        let message = input.validate()?;

        self.repo.save(&message).await?;
        tracing::info!(contact_id = %message.contact_id, "Contact message stored");

        self.mail.relay(&message).await?;

        Ok(message)
    }
}
