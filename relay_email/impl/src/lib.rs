use anyhow::anyhow;
use lettre::{
    message::{header::ContentType, MessageBuilder, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use relay_email_contracts::{Email, EmailBody, EmailService};
use relay_models::email_address::EmailAddressWithName;
use relay_utils::Apply;
use tracing::{debug, warn};

pub mod template;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Connection parameters of the outgoing smtp server.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub encryption: SmtpEncryption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpEncryption {
    /// Plain connection upgraded with `STARTTLS` (usually port 587).
    StartTls,
    /// Implicit TLS (usually port 465).
    Tls,
    /// No encryption at all. Only meant for local development relays.
    None,
}

impl EmailServiceImpl {
    pub fn new(settings: SmtpSettings, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let builder = match settings.encryption {
            SmtpEncryption::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            SmtpEncryption::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
            SmtpEncryption::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };

        let credentials = match (settings.username, settings.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            (None, None) => None,
            _ => return Err(anyhow!("smtp username and password must be set together")),
        };

        let transport = builder
            .port(settings.port)
            .apply_map(credentials, |builder, credentials| {
                builder.credentials(credentials)
            })
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let builder = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject);

        let message = match email.body {
            EmailBody::Text(text) => builder.header(ContentType::TEXT_PLAIN).body(text)?,
            EmailBody::Html { html, text } => {
                builder.multipart(MultiPart::alternative_plain_html(text, html))?
            }
        };

        Ok(message)
    }
}

impl EmailService for EmailServiceImpl {
    #[tracing::instrument(skip_all, fields(subject = %email.subject))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        let response = self.transport.send(message).await?;
        if !response.is_positive() {
            warn!(code = %response.code(), "smtp server rejected the email");
            return Ok(false);
        }

        debug!("email accepted by smtp server");
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(
            SmtpSettings {
                host: "localhost".into(),
                port: 2525,
                username: None,
                password: None,
                encryption: SmtpEncryption::None,
            },
            "Site Jasmine Dom Pied <noreply@example.com>".parse().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn html_message_has_text_alternative_and_reply_to() {
        // Arrange
        let sut = sut();

        // Act
        let message = sut
            .build_message(Email {
                recipient: "Jasmine Dom Pied <jasminedompied@example.com>".parse().unwrap(),
                subject: "Nouveau contact".into(),
                body: EmailBody::Html {
                    html: "<h1>Hello</h1>".into(),
                    text: "Hello".into(),
                },
                reply_to: Some("Alice <alice@example.com>".parse().unwrap()),
            })
            .unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(header(&formatted, "From").contains("<noreply@example.com>"));
        assert!(header(&formatted, "To").contains("<jasminedompied@example.com>"));
        assert!(header(&formatted, "Reply-To").contains("<alice@example.com>"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("text/plain; charset=utf-8"));
        assert!(formatted.contains("text/html; charset=utf-8"));
        assert!(formatted.contains("<h1>Hello</h1>"));
    }

    #[tokio::test]
    async fn text_message() {
        // Arrange
        let sut = sut();

        // Act
        let message = sut
            .build_message(Email {
                recipient: "test@example.com".parse().unwrap(),
                subject: "Email Deliverability Test".into(),
                body: EmailBody::Text("It works!".into()),
                reply_to: None,
            })
            .unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(!formatted.contains("Reply-To"));
        assert!(formatted.contains("It works!"));
    }

    #[tokio::test]
    async fn send_to_unreachable_server_fails() {
        // Arrange
        let sut = EmailServiceImpl::new(
            SmtpSettings {
                host: "127.0.0.1".into(),
                port: 1,
                username: None,
                password: None,
                encryption: SmtpEncryption::None,
            },
            "noreply@example.com".parse().unwrap(),
        )
        .unwrap();

        // Act
        let result = sut
            .send(Email {
                recipient: "test@example.com".parse().unwrap(),
                subject: "Email Deliverability Test".into(),
                body: EmailBody::Text("It works!".into()),
                reply_to: None,
            })
            .await;

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn credentials_must_be_complete() {
        let result = EmailServiceImpl::new(
            SmtpSettings {
                host: "localhost".into(),
                port: 587,
                username: Some("noreply@example.com".into()),
                password: None,
                encryption: SmtpEncryption::StartTls,
            },
            "noreply@example.com".parse().unwrap(),
        );

        assert!(result.is_err());
    }

    fn header<'a>(formatted: &'a str, name: &str) -> &'a str {
        let prefix = format!("{name}: ");
        formatted
            .lines()
            .find_map(|line| line.strip_prefix(&prefix))
            .unwrap_or_else(|| panic!("missing {name} header"))
    }
}
