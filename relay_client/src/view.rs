use crate::{api::ContactFormData, validate::FieldKind};

/// Inputs of the contact form that are checked before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Name of the input as posted to the relay.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "nom",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Email => FieldKind::Email,
            Self::Name | Self::Message => FieldKind::Text,
        }
    }

    /// Message shown below the input while its value is invalid.
    pub fn error_message(self) -> &'static str {
        match self {
            Self::Name => "Ton prénom est requis.",
            Self::Email => "Une adresse email valide est requise.",
            Self::Message => "Ton message ne peut pas être vide.",
        }
    }
}

pub const TERMS_ERROR_MESSAGE: &str = "Tu dois accepter les conditions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Error,
}

/// The rendered form the controller is bound to.
pub trait FormView {
    fn value(&self, field: FormField) -> String;

    fn terms_accepted(&self) -> bool;

    /// Everything the form would post, including optional and hidden inputs.
    fn form_data(&self) -> ContactFormData;

    /// Whether an error message is currently displayed for `field`.
    fn has_field_error(&self, field: FormField) -> bool;

    /// Show `error` below `field` and mark it as invalid, or clear both.
    fn set_field_error(&mut self, field: FormField, error: Option<&'static str>);

    fn set_terms_error(&mut self, error: Option<&'static str>);

    /// Disable the submit control and show the loading label while `busy`.
    fn set_busy(&mut self, busy: bool);

    /// Show a single banner, or hide both when `None`.
    fn show_banner(&mut self, banner: Option<Banner>);

    /// Clear every input.
    fn reset(&mut self);
}
