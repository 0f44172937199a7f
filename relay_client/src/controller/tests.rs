use std::{collections::HashMap, panic::AssertUnwindSafe};

use anyhow::anyhow;
use futures::FutureExt;
use pretty_assertions::assert_eq;

use super::*;
use crate::api::{ContactApiResponse, ContactApiResponseBody, ContactFormData, MockContactApiService};

#[derive(Debug, Default)]
struct FakeView {
    values: HashMap<FormField, String>,
    terms_accepted: bool,
    field_errors: HashMap<FormField, &'static str>,
    terms_error: Option<&'static str>,
    busy: Vec<bool>,
    banners: Vec<Option<Banner>>,
    resets: usize,
    panic_on_reset: bool,
}

impl FakeView {
    fn filled() -> Self {
        Self {
            values: [
                (FormField::Name, "Alice"),
                (FormField::Email, "alice@example.com"),
                (FormField::Message, "Bonjour, je suis intéressée."),
            ]
            .into_iter()
            .map(|(field, value)| (field, value.into()))
            .collect(),
            terms_accepted: true,
            ..Default::default()
        }
    }
}

impl FormView for FakeView {
    fn value(&self, field: FormField) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    fn form_data(&self) -> ContactFormData {
        ContactFormData {
            name: self.value(FormField::Name),
            email: self.value(FormField::Email),
            subject: String::new(),
            message: self.value(FormField::Message),
            accepted_terms: self.terms_accepted,
            website: String::new(),
        }
    }

    fn has_field_error(&self, field: FormField) -> bool {
        self.field_errors.contains_key(&field)
    }

    fn set_field_error(&mut self, field: FormField, error: Option<&'static str>) {
        match error {
            Some(error) => self.field_errors.insert(field, error),
            None => self.field_errors.remove(&field),
        };
    }

    fn set_terms_error(&mut self, error: Option<&'static str>) {
        self.terms_error = error;
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy.push(busy);
    }

    fn show_banner(&mut self, banner: Option<Banner>) {
        self.banners.push(banner);
    }

    fn reset(&mut self) {
        assert!(!self.panic_on_reset, "reset failed");
        self.values.clear();
        self.terms_accepted = false;
        self.resets += 1;
    }
}

fn response(status: u16, body: ContactApiResponseBody) -> ContactApiResponse {
    ContactApiResponse { status, body }
}

fn body(success: bool, message: &str) -> ContactApiResponseBody {
    ContactApiResponseBody::Object {
        success: Some(success),
        message: Some(message.into()),
    }
}

#[test]
fn blur_sets_and_clears_error() {
    // Arrange
    let mut sut = FormController::new(FakeView::default(), MockContactApiService::new());

    // Act
    let invalid = sut.on_blur(FormField::Email);
    sut.view.values.insert(FormField::Email, "alice@example.com".into());
    let valid = sut.on_blur(FormField::Email);

    // Assert
    assert!(!invalid);
    assert!(valid);
    assert!(sut.view().field_errors.is_empty());
}

#[test]
fn blur_shows_field_message() {
    let mut sut = FormController::new(FakeView::default(), MockContactApiService::new());

    for field in FormField::ALL {
        sut.on_blur(field);
    }

    assert_eq!(
        sut.view().field_errors,
        HashMap::from([
            (FormField::Name, "Ton prénom est requis."),
            (FormField::Email, "Une adresse email valide est requise."),
            (FormField::Message, "Ton message ne peut pas être vide."),
        ])
    );
}

#[test]
fn input_only_revalidates_shown_errors() {
    // Arrange
    let mut sut = FormController::new(FakeView::default(), MockContactApiService::new());

    // Act + Assert
    sut.on_input(FormField::Name);
    assert!(!sut.view().has_field_error(FormField::Name));

    sut.on_blur(FormField::Name);
    assert!(sut.view().has_field_error(FormField::Name));

    sut.view.values.insert(FormField::Name, "A".into());
    sut.on_input(FormField::Name);
    assert!(!sut.view().has_field_error(FormField::Name));
}

#[tokio::test]
async fn submit_invalid() {
    // Arrange
    let mut sut = FormController::new(FakeView::default(), MockContactApiService::new());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Invalid);
    let view = sut.into_view();
    assert_eq!(view.field_errors.len(), 3);
    assert_eq!(view.terms_error, Some("Tu dois accepter les conditions."));
    assert!(view.busy.is_empty());
    assert!(view.banners.is_empty());
}

#[tokio::test]
async fn submit_terms_not_accepted() {
    // Arrange
    let view = FakeView {
        terms_accepted: false,
        ..FakeView::filled()
    };
    let mut sut = FormController::new(view, MockContactApiService::new());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Invalid);
    let view = sut.into_view();
    assert!(view.field_errors.is_empty());
    assert_eq!(view.terms_error, Some("Tu dois accepter les conditions."));
}

#[tokio::test]
async fn submit_ok() {
    // Arrange
    let view = FakeView::filled();
    let api = MockContactApiService::new().with_post(
        view.form_data(),
        Ok(response(200, body(true, "Message envoyé avec succès."))),
    );
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Succeeded);
    let view = sut.into_view();
    assert_eq!(view.busy, [true, false]);
    assert_eq!(view.banners, [None, Some(Banner::Success)]);
    assert_eq!(view.resets, 1);
    assert_eq!(view.terms_error, None);
}

#[tokio::test]
async fn submit_unparseable_body_counts_as_success() {
    // Arrange
    let view = FakeView::filled();
    let api = MockContactApiService::new().with_post(view.form_data(), Ok(response(200, ContactApiResponseBody::Unreadable)));
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Succeeded);
    assert_eq!(sut.view().resets, 1);
}

#[tokio::test]
async fn submit_rejected() {
    // Arrange
    let view = FakeView::filled();
    let api = MockContactApiService::new().with_post(
        view.form_data(),
        Ok(response(200, body(false, "Erreur lors de l'envoi."))),
    );
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Failed);
    let view = sut.into_view();
    assert_eq!(view.busy, [true, false]);
    assert_eq!(view.banners, [None, Some(Banner::Error)]);
    assert_eq!(view.resets, 0);
}

#[tokio::test]
async fn submit_http_error() {
    // Arrange
    let view = FakeView::filled();
    let api = MockContactApiService::new().with_post(
        view.form_data(),
        Ok(response(422, body(false, "Adresse email invalide."))),
    );
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Failed);
    assert_eq!(sut.view().banners, [None, Some(Banner::Error)]);
}

#[tokio::test]
async fn submit_transport_error() {
    // Arrange
    let view = FakeView::filled();
    let api = MockContactApiService::new()
        .with_post(view.form_data(), Err(anyhow!("connection refused")));
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Failed);
    let view = sut.into_view();
    assert_eq!(view.busy, [true, false]);
    assert_eq!(view.banners, [None, Some(Banner::Error)]);
    assert_eq!(view.resets, 0);
}

#[tokio::test]
async fn submit_unexpected_body_fails() {
    // Arrange
    let view = FakeView::filled();
    let api = MockContactApiService::new().with_post(
        view.form_data(),
        Ok(response(200, ContactApiResponseBody::Unexpected)),
    );
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_eq!(result, SubmitOutcome::Failed);
    let view = sut.into_view();
    assert_eq!(view.busy, [true, false]);
    assert_eq!(view.banners, [None, Some(Banner::Error)]);
    assert_eq!(view.resets, 0);
}

#[test]
fn cancelled_submit_releases_busy() {
    // Arrange
    let view = FakeView::filled();
    let mut api = MockContactApiService::new();
    api.expect_post()
        .once()
        .return_once(|_| Box::pin(std::future::pending()));
    let mut sut = FormController::new(view, api);

    // Act
    let result = sut.submit().now_or_never();

    // Assert
    assert_eq!(result, None);
    let view = sut.into_view();
    assert_eq!(view.busy, [true, false]);
    assert_eq!(view.banners, [None]);
}

#[test]
fn panicking_submit_releases_busy() {
    // Arrange
    let view = FakeView {
        panic_on_reset: true,
        ..FakeView::filled()
    };
    let api = MockContactApiService::new().with_post(
        view.form_data(),
        Ok(response(200, body(true, "Message envoyé avec succès."))),
    );
    let mut sut = FormController::new(view, api);

    // Act
    let result = AssertUnwindSafe(sut.submit()).catch_unwind().now_or_never();

    // Assert
    assert!(matches!(result, Some(Err(_))));
    let view = sut.into_view();
    assert_eq!(view.busy, [true, false]);
    assert_eq!(view.banners, [None, Some(Banner::Success)]);
}
