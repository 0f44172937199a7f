use relay_email_contracts::{template::TemplateEmailService, Email, EmailBody, EmailService};
use relay_models::email_address::EmailAddressWithName;
use relay_templates_contracts::{
    ContactConfirmationTemplate, ContactNotificationTemplate, Template, TemplateService,
};

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> TemplateEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

impl<EmailS, Template> TemplateEmailService for TemplateEmailServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<bool> {
        let subject = format!("📩 Nouveau contact : {} – {}", data.name, data.subject);
        self.send_email(recipient, Some(reply_to), data, subject)
            .await
    }

    async fn send_contact_confirmation_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactConfirmationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            None,
            data,
            "Ta demande a été reçue — Jasmine Dom Pied",
        )
        .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<bool> {
        let rendered = self.template.render(data)?;
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: EmailBody::Html {
                    html: rendered.html,
                    text: rendered.text,
                },
                reply_to,
            })
            .await
    }
}
