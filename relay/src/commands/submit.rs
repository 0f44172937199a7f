use anyhow::{bail, Context};
use clap::Args;
use relay_client::{
    api::{ContactApiServiceImpl, ContactFormData},
    view::{Banner, FormField, FormView},
    FormController, SubmitOutcome,
};
use relay_config::Config;
use url::Url;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// First name of the sender
    #[arg(long, default_value = "")]
    name: String,
    /// Email address replies are sent to
    #[arg(long, default_value = "")]
    email: String,
    /// Subject of the message
    #[arg(long, default_value = "")]
    subject: String,
    /// The message itself
    #[arg(long, default_value = "")]
    message: String,
    /// Accept the terms and conditions
    #[arg(long)]
    accept_terms: bool,
    /// Url of the contact endpoint. Defaults to the endpoint of the
    /// configured http server.
    #[arg(long)]
    endpoint: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let endpoint = match self.endpoint.clone() {
            Some(endpoint) => endpoint,
            None => format!("http://{}{}", config.http.address, config.contact.path)
                .parse()
                .context("Invalid contact endpoint")?,
        };

        let api = ContactApiServiceImpl::new(endpoint)?;
        let mut controller = FormController::new(TerminalView::from(self), api);

        match controller.submit().await {
            SubmitOutcome::Succeeded => Ok(()),
            SubmitOutcome::Invalid => bail!("The form contains invalid fields"),
            SubmitOutcome::Failed => bail!("The message could not be sent"),
        }
    }
}

/// Form backed by the command line arguments, reporting to the terminal.
#[derive(Debug)]
struct TerminalView {
    form: ContactFormData,
    field_errors: Vec<FormField>,
}

impl From<SubmitCommand> for TerminalView {
    fn from(value: SubmitCommand) -> Self {
        Self {
            form: ContactFormData {
                name: value.name,
                email: value.email,
                subject: value.subject,
                message: value.message,
                accepted_terms: value.accept_terms,
                website: String::new(),
            },
            field_errors: Vec::new(),
        }
    }
}

impl FormView for TerminalView {
    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.form.name.clone(),
            FormField::Email => self.form.email.clone(),
            FormField::Message => self.form.message.clone(),
        }
    }

    fn terms_accepted(&self) -> bool {
        self.form.accepted_terms
    }

    fn form_data(&self) -> ContactFormData {
        self.form.clone()
    }

    fn has_field_error(&self, field: FormField) -> bool {
        self.field_errors.contains(&field)
    }

    fn set_field_error(&mut self, field: FormField, error: Option<&'static str>) {
        self.field_errors.retain(|&f| f != field);
        if let Some(error) = error {
            eprintln!("{}: {error}", field.name());
            self.field_errors.push(field);
        }
    }

    fn set_terms_error(&mut self, error: Option<&'static str>) {
        if let Some(error) = error {
            eprintln!("conditions: {error}");
        }
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            eprintln!("Envoi en cours…");
        }
    }

    fn show_banner(&mut self, banner: Option<Banner>) {
        match banner {
            Some(Banner::Success) => println!("Message envoyé avec succès."),
            Some(Banner::Error) => eprintln!("Une erreur est survenue. Réessaie plus tard."),
            None => {}
        }
    }

    fn reset(&mut self) {
        self.form = ContactFormData::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn command() -> SubmitCommand {
        SubmitCommand {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            subject: String::new(),
            message: "Bonjour, je suis intéressée.".into(),
            accept_terms: true,
            endpoint: None,
        }
    }

    #[test]
    fn form_data() {
        let view = TerminalView::from(command());

        assert_eq!(view.value(FormField::Name), "Alice");
        assert!(view.terms_accepted());
        assert_eq!(view.form_data().website, "");
    }

    #[test]
    fn field_errors() {
        let mut view = TerminalView::from(command());

        view.set_field_error(FormField::Email, Some("Une adresse email valide est requise."));
        assert!(view.has_field_error(FormField::Email));

        view.set_field_error(FormField::Email, None);
        assert!(!view.has_field_error(FormField::Email));
    }
}
