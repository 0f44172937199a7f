use anyhow::ensure;
use clap::Subcommand;
use relay_config::Config;
use relay_email_contracts::{Email, EmailBody, EmailService};
use relay_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
    /// Check that the smtp server accepts connections
    Ping,
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
            EmailCommand::Ping => ping(config).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.smtp, config.email.from)?;

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Text("Email deliverability seems to be working!".into()),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}

async fn ping(config: Config) -> anyhow::Result<()> {
    let email_service = email::connect(&config.smtp, config.email.from)?;
    email_service.ping().await?;
    println!("Smtp server at {}:{} is reachable", config.smtp.host, config.smtp.port);
    Ok(())
}
