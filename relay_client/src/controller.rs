use std::ops::{Deref, DerefMut};

use thiserror::Error;
use tracing::error;

use crate::{
    api::{ContactApiResponseBody, ContactApiService, ContactFormData},
    validate::validate_field,
    view::{Banner, FormField, FormView, TERMS_ERROR_MESSAGE},
};

/// Drives a contact form: inline validation while typing and the submission
/// itself.
#[derive(Debug)]
pub struct FormController<View, Api> {
    view: View,
    api: Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one input is invalid, nothing has been sent.
    Invalid,
    Succeeded,
    Failed,
}

#[derive(Debug, Error)]
enum SubmitError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Rejected(String),
    #[error("Unexpected response body")]
    UnexpectedBody,
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl<View, Api> FormController<View, Api>
where
    View: FormView,
    Api: ContactApiService,
{
    pub fn new(view: View, api: Api) -> Self {
        Self { view, api }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn into_view(self) -> View {
        self.view
    }

    /// Validate `field` once it lost focus. Returns whether it is valid.
    pub fn on_blur(&mut self, field: FormField) -> bool {
        self.validate(field)
    }

    /// Re-validate `field` while typing, but only to clear an error that is
    /// already displayed.
    pub fn on_input(&mut self, field: FormField) {
        if self.view.has_field_error(field) {
            self.validate(field);
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let mut valid = true;
        for field in FormField::ALL {
            valid &= self.validate(field);
        }

        let terms_accepted = self.view.terms_accepted();
        self.view
            .set_terms_error((!terms_accepted).then_some(TERMS_ERROR_MESSAGE));

        if !(valid && terms_accepted) {
            return SubmitOutcome::Invalid;
        }

        let form = self.view.form_data();
        let mut view = BusyView::new(&mut self.view);
        view.show_banner(None);

        match send(&self.api, form).await {
            Ok(()) => {
                view.show_banner(Some(Banner::Success));
                view.reset();
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!("Failed to submit contact form: {err:#}");
                view.show_banner(Some(Banner::Error));
                SubmitOutcome::Failed
            }
        }
    }

    fn validate(&mut self, field: FormField) -> bool {
        let valid = validate_field(field.kind(), &self.view.value(field));
        self.view
            .set_field_error(field, (!valid).then(|| field.error_message()));
        valid
    }
}

async fn send(api: &impl ContactApiService, form: ContactFormData) -> Result<(), SubmitError> {
    let response = api.post(form).await?;

    if !response.is_success() {
        return Err(SubmitError::Status(response.status));
    }

    match response.body {
        ContactApiResponseBody::Object {
            success: Some(false),
            message,
        } => Err(SubmitError::Rejected(
            message.unwrap_or_else(|| "Erreur serveur".into()),
        )),
        ContactApiResponseBody::Unexpected => Err(SubmitError::UnexpectedBody),
        ContactApiResponseBody::Unreadable | ContactApiResponseBody::Object { .. } => Ok(()),
    }
}

/// Marks the view busy until dropped, including when the submission is
/// cancelled or unwinds.
struct BusyView<'a, V: FormView>(&'a mut V);

impl<'a, V: FormView> BusyView<'a, V> {
    fn new(view: &'a mut V) -> Self {
        view.set_busy(true);
        Self(view)
    }
}

impl<V: FormView> Deref for BusyView<'_, V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<V: FormView> DerefMut for BusyView<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl<V: FormView> Drop for BusyView<'_, V> {
    fn drop(&mut self) {
        self.0.set_busy(false);
    }
}

#[cfg(test)]
mod tests;
