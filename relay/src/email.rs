use anyhow::Context;
use relay_config::{SmtpConfig, SmtpEncryption};
use relay_email_impl::{EmailServiceImpl, SmtpSettings};
use relay_models::email_address::EmailAddressWithName;

/// Set up the smtp connection pool. No connection is opened yet.
pub fn connect(
    config: &SmtpConfig,
    from: EmailAddressWithName,
) -> anyhow::Result<EmailServiceImpl> {
    let settings = SmtpSettings {
        host: config.host.clone(),
        port: config.port,
        username: config.username.clone(),
        password: config.password.clone(),
        encryption: match config.encryption {
            SmtpEncryption::StartTls => relay_email_impl::SmtpEncryption::StartTls,
            SmtpEncryption::Tls => relay_email_impl::SmtpEncryption::Tls,
            SmtpEncryption::None => relay_email_impl::SmtpEncryption::None,
        },
    };

    EmailServiceImpl::new(settings, from).context("Failed to configure smtp transport")
}
