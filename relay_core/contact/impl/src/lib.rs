use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Local, Utc};
use relay_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use relay_email_contracts::template::TemplateEmailService;
use relay_models::{
    contact::{ContactMessage, ContactSubmission},
    email_address::EmailAddressWithName,
};
use relay_shared_contracts::time::TimeService;
use relay_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};
use tracing::{error, info};


#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Time, TemplateEmail> {
    time: Time,
    template_email: TemplateEmail,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Mailbox of the site operator receiving the notifications.
    pub operator: Arc<EmailAddressWithName>,
}

/// Result of handing both emails to the smtp server.
#[derive(Debug)]
enum DispatchOutcome {
    Delivered,
    TransportFailed(anyhow::Error),
}

impl<Time, TemplateEmail> ContactFeatureServiceImpl<Time, TemplateEmail> {
    pub fn new(time: Time, template_email: TemplateEmail, config: ContactFeatureConfig) -> Self {
        Self {
            time,
            template_email,
            config,
        }
    }
}

impl<Time, TemplateEmail> ContactFeatureService for ContactFeatureServiceImpl<Time, TemplateEmail>
where
    Time: TimeService,
    TemplateEmail: TemplateEmailService,
{
    #[tracing::instrument(skip_all)]
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        let submission = submission.sanitize();

        if submission.honeypot {
            info!("honeypot field is filled, discarding submission");
            return Ok(ContactSubmitOutcome::Discarded);
        }

        let message = submission.validate()?;

        match self.dispatch(&message).await {
            DispatchOutcome::Delivered => Ok(ContactSubmitOutcome::Delivered),
            DispatchOutcome::TransportFailed(err) => {
                error!("Failed to deliver contact message: {err:#}");
                Err(ContactSubmitError::Send)
            }
        }
    }
}

impl<Time, TemplateEmail> ContactFeatureServiceImpl<Time, TemplateEmail>
where
    Time: TimeService,
    TemplateEmail: TemplateEmailService,
{
    async fn dispatch(&self, message: &ContactMessage) -> DispatchOutcome {
        match self.try_dispatch(message).await {
            Ok(()) => DispatchOutcome::Delivered,
            Err(err) => DispatchOutcome::TransportFailed(err),
        }
    }

    async fn try_dispatch(&self, message: &ContactMessage) -> anyhow::Result<()> {
        let author = message
            .author
            .email
            .clone()
            .with_name(message.author.name.clone().into_inner());

        let notification = ContactNotificationTemplate {
            name: message.author.name.clone().into_inner(),
            email: message.author.email.as_str().into(),
            subject: message.subject.clone().into_inner(),
            message: message.content.clone().into_inner(),
            received_at: format_received_at(self.time.now()),
        };

        let accepted = self
            .template_email
            .send_contact_notification_email(
                (*self.config.operator).clone(),
                author.clone(),
                &notification,
            )
            .await?;
        if !accepted {
            return Err(anyhow!("smtp server rejected the notification email"));
        }

        let confirmation = ContactConfirmationTemplate {
            name: message.author.name.clone().into_inner(),
        };

        let accepted = self
            .template_email
            .send_contact_confirmation_email(author, &confirmation)
            .await?;
        if !accepted {
            return Err(anyhow!("smtp server rejected the confirmation email"));
        }

        Ok(())
    }
}

fn format_received_at(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%d/%m/%Y à %H:%M")
        .to_string()
}
