use nutype::nutype;
use relay_utils::html::{sanitize_email, sanitize_text};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// Subject used when the submitter did not pick one.
pub const DEFAULT_SUBJECT: &str = "Non précisé";

/// Minimum number of characters of a message.
pub const MESSAGE_MIN_LEN: usize = 10;

/// The raw fields of a contact form submission, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub accepted_terms: bool,
    /// Hidden field that only automated clients fill in.
    pub honeypot: Option<String>,
}

/// A submission whose free-text fields are safe to embed into html.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub accepted_terms: bool,
    pub honeypot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactViolation {
    #[error("Le prénom est requis.")]
    Name,
    #[error("Le prénom est trop long.")]
    NameTooLong,
    #[error("Adresse email invalide.")]
    Email,
    #[error("L'objet est trop long.")]
    SubjectTooLong,
    #[error("Le message doit contenir au moins 10 caractères.")]
    Message,
    #[error("Le message est trop long.")]
    MessageTooLong,
    #[error("Tu dois accepter les conditions.")]
    Terms,
}

/// All rules a submission violated, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactViolations(pub Vec<ContactViolation>);

impl std::fmt::Display for ContactViolations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            violation.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ContactViolations {}

impl ContactSubmission {
    pub fn sanitize(&self) -> SanitizedContactSubmission {
        let subject = self
            .subject
            .as_deref()
            .map(sanitize_text)
            .filter(|subject| !subject.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.into());

        SanitizedContactSubmission {
            name: sanitize_text(self.name.as_deref().unwrap_or_default()),
            email: sanitize_email(self.email.as_deref().unwrap_or_default()),
            subject,
            message: sanitize_text(self.message.as_deref().unwrap_or_default()),
            accepted_terms: self.accepted_terms,
            honeypot: self.honeypot.as_deref().is_some_and(|x| !x.is_empty()),
        }
    }
}

impl SanitizedContactSubmission {
    /// Checks every rule and collects all violations instead of stopping at the
    /// first one.
    pub fn validate(self) -> Result<ContactMessage, ContactViolations> {
        let mut violations = Vec::new();

        let name = if self.name.is_empty() {
            violations.push(ContactViolation::Name);
            None
        } else {
            ContactMessageAuthorName::try_new(self.name)
                .inspect_err(|_| violations.push(ContactViolation::NameTooLong))
                .ok()
        };

        let email = EmailAddress::parse_strict(&self.email);
        if email.is_none() {
            violations.push(ContactViolation::Email);
        }

        let subject = ContactMessageSubject::try_new(self.subject)
            .inspect_err(|_| violations.push(ContactViolation::SubjectTooLong))
            .ok();

        let content = if self.message.chars().count() < MESSAGE_MIN_LEN {
            violations.push(ContactViolation::Message);
            None
        } else {
            ContactMessageContent::try_new(self.message)
                .inspect_err(|_| violations.push(ContactViolation::MessageTooLong))
                .ok()
        };

        if !self.accepted_terms {
            violations.push(ContactViolation::Terms);
        }

        match (name, email, subject, content) {
            (Some(name), Some(email), Some(subject), Some(content)) if violations.is_empty() => {
                Ok(ContactMessage {
                    author: ContactMessageAuthor { name, email },
                    subject,
                    content,
                })
            }
            _ => Err(ContactViolations(violations)),
        }
    }
}
