//! Client side of the contact form: field validation, submission and
//! feedback, independent of the actual ui.

pub use controller::{FormController, SubmitOutcome};

pub mod api;
mod controller;
pub mod validate;
pub mod view;
