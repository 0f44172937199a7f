use std::future::Future;

use relay_models::contact::{ContactSubmission, ContactViolations};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Sanitize, check and forward a contact form submission.
    ///
    /// The operator is notified first; the confirmation to the submitter is
    /// only sent once the notification went through.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    /// Both emails have been accepted by the smtp server.
    Delivered,
    /// The honeypot field was filled. Nothing has been sent, but the caller
    /// must not be able to tell.
    Discarded,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ContactViolations),
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
