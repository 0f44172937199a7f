use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use tracing::debug;

use crate::models::contact::ApiContactForm;

/// Contact form fields read from either an urlencoded or a multipart body.
///
/// A body that cannot be read yields a form without any field, which is then
/// rejected by the validation.
pub struct ContactForm(pub ApiContactForm);

#[async_trait]
impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        let form = if is_multipart {
            match Multipart::from_request(request, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(err) => {
                    debug!("failed to read multipart body: {err}");
                    ApiContactForm::default()
                }
            }
        } else {
            match Form::<ApiContactForm>::from_request(request, state).await {
                Ok(Form(form)) => form,
                Err(err) => {
                    debug!("failed to read urlencoded body: {err}");
                    ApiContactForm::default()
                }
            }
        };

        Ok(Self(form))
    }
}

async fn read_multipart(mut multipart: Multipart) -> ApiContactForm {
    let mut form = ApiContactForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                debug!("failed to read multipart field: {err}");
                break;
            }
        };
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        match field.text().await {
            Ok(value) => form.set(&name, value),
            Err(err) => {
                debug!("failed to read multipart field {name:?}: {err}");
                break;
            }
        }
    }
    form
}
